//! Push installations — registering a device token for push notifications.

use serde::{Deserialize, Serialize};

use crate::error::ArgumentError;

/// Push service of an installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushDeviceType {
    /// Firebase Cloud Messaging.
    #[serde(rename = "ANDROID")]
    Fcm,
    /// Apple Push Notification service.
    #[serde(rename = "IOS")]
    Apns,
    #[serde(rename = "JPUSH")]
    JPush,
}

/// Body of an installation creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationRequest {
    #[serde(rename = "installationRegistrationID")]
    pub installation_registration_id: String,
    pub device_type: PushDeviceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development: Option<bool>,
}

impl InstallationRequest {
    pub const MEDIA_TYPE: &'static str = "application/vnd.kii.InstallationCreationRequest+json";

    #[must_use]
    pub fn new(registration_id: impl Into<String>, device_type: PushDeviceType) -> Self {
        Self {
            installation_registration_id: registration_id.into(),
            device_type,
            development: None,
        }
    }

    #[must_use]
    pub fn development(mut self, development: bool) -> Self {
        self.development = Some(development);
        self
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when the registration id is empty.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if self.installation_registration_id.is_empty() {
            return Err(ArgumentError::Missing("installation_registration_id"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationResult {
    #[serde(rename = "installationID")]
    pub installation_id: String,
}
