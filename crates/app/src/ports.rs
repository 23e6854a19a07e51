//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the operation layer and the outside
//! world. They live here (in `app`) so that both the operations and the
//! adapter crates can depend on them without creating circular dependencies.

pub mod transport;

pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method};
