//! HTTP transport configuration.

use serde::Deserialize;

/// Configuration of the reqwest transport.
///
/// Timeouts are off unless set, so a slow server blocks the call for as long
/// as the connection stays open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Maximum time to establish a connection, in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Maximum time for a whole request, in seconds.
    pub timeout_secs: Option<u64>,
    /// Overrides the default `User-Agent` header.
    pub user_agent: Option<String>,
}
