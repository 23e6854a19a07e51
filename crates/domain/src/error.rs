//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`ThingIfError`]
//! via `#[from]` / `From` impls. Every failure is surfaced to the caller as-is;
//! nothing in the SDK retries or recovers locally.

use std::error::Error as StdError;

/// Top-level error returned by every SDK operation.
#[derive(Debug, thiserror::Error)]
pub enum ThingIfError {
    /// Invalid or missing caller input, detected before any request is sent.
    #[error("argument error")]
    Argument(#[from] ArgumentError),

    /// The server answered with a non-2xx status.
    #[error("http error")]
    Http(#[from] HttpError),

    /// The operation is not allowed in the current state (e.g. no target bound).
    #[error("illegal state")]
    IllegalState(#[from] IllegalStateError),

    /// The transport failed before a response was received.
    #[error("network error")]
    Network(#[source] Box<dyn StdError + Send + Sync>),

    /// A 2xx response body did not match the expected shape.
    #[error("unexpected response")]
    UnexpectedResponse(#[from] DecodeError),
}

impl ThingIfError {
    /// Stable kind tag for this error, e.g. `"ArgumentError"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Argument(_) => "ArgumentError",
            Self::Http(_) => "HttpError",
            Self::IllegalState(_) => "IllegalStateError",
            Self::Network(_) => "NetworkError",
            Self::UnexpectedResponse(_) => "UnexpectedResponseError",
        }
    }

    /// HTTP status of the failure, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(err) => Some(err.status),
            _ => None,
        }
    }
}

/// Caller input that failed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// A required field was absent or empty.
    #[error("{0} is required")]
    Missing(&'static str),

    /// A field was present but its value is not acceptable.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// A non-2xx response from the server.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Vendor error code (`errorCode` in the body), when present.
    pub error_code: Option<String>,
    /// Human readable message (`message` in the body), when present.
    pub message: Option<String>,
    /// The parsed error body, or the raw text wrapped as a JSON string.
    pub body: Option<serde_json::Value>,
}

impl HttpError {
    /// Build an error from a status and the (already parsed) response body.
    #[must_use]
    pub fn new(status: u16, body: Option<serde_json::Value>) -> Self {
        let field = |key: &str| {
            body.as_ref()
                .and_then(|b| b.get(key))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };
        Self {
            status,
            error_code: field("errorCode"),
            message: field("message"),
            body,
        }
    }

    /// Whether the vendor error code equals `code`.
    #[must_use]
    pub fn has_error_code(&self, code: &str) -> bool {
        self.error_code.as_deref() == Some(code)
    }
}

/// An operation was invoked in a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalStateError {
    /// A target-scoped operation was called before a target was bound.
    #[error("target is not bound")]
    TargetNotBound,
}

/// A response body that could not be mapped into the domain model.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body was missing where one was required.
    #[error("response body is empty")]
    EmptyBody,

    /// The JSON did not match the expected model.
    #[error("malformed response body")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but violates a model invariant.
    #[error("unexpected response shape: {0}")]
    Shape(&'static str),
}
