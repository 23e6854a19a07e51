//! Server code — vendor-hosted scripts a trigger can run instead of a command.

use serde::{Deserialize, Serialize};

use crate::error::ArgumentError;
use crate::time::Timestamp;

/// Reference to a server-side script endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCode {
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor_access_token: Option<String>,
    #[serde(
        rename = "targetAppID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ServerCode {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            executor_access_token: None,
            target_app_id: None,
            parameters: None,
        }
    }

    #[must_use]
    pub fn with_executor_access_token(mut self, token: impl Into<String>) -> Self {
        self.executor_access_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_target_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.target_app_id = Some(app_id.into());
        self
    }

    #[must_use]
    pub fn with_parameters(
        mut self,
        parameters: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when `endpoint` is empty.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if self.endpoint.is_empty() {
            return Err(ArgumentError::Missing("server_code.endpoint"));
        }
        Ok(())
    }
}

/// One execution of a server-code trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCodeResult {
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_value: Option<serde_json::Value>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub executed_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServerCodeError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCodeError {
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ServerCodeErrorDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCodeErrorDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
