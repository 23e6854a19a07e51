//! # thingif-adapter-http-reqwest
//!
//! HTTP adapter — sends Thing-IF requests with `reqwest`.
//!
//! ## Responsibilities
//! - Implement the [`thingif_app::ports::HttpTransport`] port
//! - Translate [`thingif_app::ports::ApiRequest`] into a `reqwest` call and the
//!   raw answer back into an [`thingif_app::ports::ApiResponse`]
//! - Report connection failures as `ThingIfError::Network`
//!
//! Status codes are passed through untouched; mapping them to errors is the
//! job of the operation layer.
//!
//! ## Dependency rule
//! Depends on `thingif-app` (for the port trait) and `thingif-domain` (for
//! the error type).

pub mod config;
pub mod error;
mod transport;

pub use config::HttpConfig;
pub use error::TransportError;
pub use transport::ReqwestTransport;
