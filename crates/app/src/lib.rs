//! # thingif-app
//!
//! Application layer — API operations and the **transport port**.
//!
//! ## Responsibilities
//! - Define the [`ports::HttpTransport`] trait that adapters implement, plus
//!   the request/response envelope it carries
//! - One operation struct per resource ([`ops`]): commands, triggers,
//!   onboarding, state, thing attributes and push
//! - Build URLs and common headers, validate arguments before sending, map
//!   non-2xx answers into `HttpError` and decode 2xx bodies into the domain model
//! - [`author::ApiAuthor`] (token + app) and the target-bound
//!   [`thing_if_api::ThingIfApi`] façades
//!
//! ## Dependency rule
//! Depends on `thingif-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod author;
pub mod ops;
pub mod ports;
pub mod thing_if_api;

#[cfg(test)]
mod testing;

pub use author::ApiAuthor;
pub use thing_if_api::ThingIfApi;
