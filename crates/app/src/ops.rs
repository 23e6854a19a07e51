//! Operations — one struct per API resource.
//!
//! Each struct borrows a [`BaseOp`] (transport, app and token) for the
//! duration of a call. Arguments are validated before anything is sent, and
//! every non-2xx answer comes back as [`thingif_domain::error::HttpError`].

pub mod base;
pub mod command_ops;
pub mod onboarding_ops;
pub mod push_ops;
pub mod state_ops;
pub mod thing_ops;
pub mod trigger_ops;

pub use base::BaseOp;
pub use command_ops::CommandOps;
pub use onboarding_ops::OnboardingOps;
pub use push_ops::PushOps;
pub use state_ops::StateOps;
pub use thing_ops::ThingOps;
pub use trigger_ops::TriggerOps;
