//! HTTP transport error types.

use thingif_domain::error::ThingIfError;

/// Errors specific to the reqwest transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client could not be built from the configuration.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// The request could not be sent or its body could not be read.
    #[error("HTTP request failed")]
    Request(#[source] reqwest::Error),

    /// The request body could not be encoded.
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),
}

impl From<TransportError> for ThingIfError {
    fn from(err: TransportError) -> Self {
        ThingIfError::Network(Box::new(err))
    }
}
