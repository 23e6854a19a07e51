//! Onboarding — binding a thing to its owner and obtaining its credentials.

use serde::{Deserialize, Serialize};

use crate::error::ArgumentError;
use crate::id::TypedId;

/// Position of a thing in a gateway topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutPosition {
    Standalone,
    Gateway,
    Endnode,
}

/// Interval the server uses to group uploaded states into history buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataGroupingInterval {
    #[serde(rename = "1_MINUTE")]
    OneMinute,
    #[serde(rename = "15_MINUTES")]
    FifteenMinutes,
    #[serde(rename = "30_MINUTES")]
    ThirtyMinutes,
    #[serde(rename = "1_HOUR")]
    OneHour,
    #[serde(rename = "12_HOURS")]
    TwelveHours,
}

fn require(value: &str, field: &'static str) -> Result<(), ArgumentError> {
    if value.is_empty() {
        return Err(ArgumentError::Missing(field));
    }
    Ok(())
}

/// Onboard (registering if needed) a thing identified by its vendor thing id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardWithVendorThingIdRequest {
    #[serde(rename = "vendorThingID")]
    pub vendor_thing_id: String,
    pub thing_password: String,
    pub owner: TypedId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thing_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thing_properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_position: Option<LayoutPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_grouping_interval: Option<DataGroupingInterval>,
}

impl OnboardWithVendorThingIdRequest {
    pub const MEDIA_TYPE: &'static str =
        "application/vnd.kii.OnboardingWithVendorThingIDByOwner+json";

    #[must_use]
    pub fn new(
        vendor_thing_id: impl Into<String>,
        thing_password: impl Into<String>,
        owner: TypedId,
    ) -> Self {
        Self {
            vendor_thing_id: vendor_thing_id.into(),
            thing_password: thing_password.into(),
            owner,
            thing_type: None,
            firmware_version: None,
            thing_properties: None,
            layout_position: None,
            data_grouping_interval: None,
        }
    }

    #[must_use]
    pub fn with_thing_type(mut self, thing_type: impl Into<String>) -> Self {
        self.thing_type = Some(thing_type.into());
        self
    }

    #[must_use]
    pub fn with_firmware_version(mut self, version: impl Into<String>) -> Self {
        self.firmware_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_layout_position(mut self, position: LayoutPosition) -> Self {
        self.layout_position = Some(position);
        self
    }

    #[must_use]
    pub fn with_data_grouping_interval(mut self, interval: DataGroupingInterval) -> Self {
        self.data_grouping_interval = Some(interval);
        self
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when the vendor thing id or the
    /// password is empty.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        require(&self.vendor_thing_id, "vendor_thing_id")?;
        require(&self.thing_password, "thing_password")
    }
}

/// Onboard a thing already registered under `thing_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardWithThingIdRequest {
    #[serde(rename = "thingID")]
    pub thing_id: String,
    pub thing_password: String,
    pub owner: TypedId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_position: Option<LayoutPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_grouping_interval: Option<DataGroupingInterval>,
}

impl OnboardWithThingIdRequest {
    pub const MEDIA_TYPE: &'static str = "application/vnd.kii.OnboardingWithThingIDByOwner+json";

    #[must_use]
    pub fn new(
        thing_id: impl Into<String>,
        thing_password: impl Into<String>,
        owner: TypedId,
    ) -> Self {
        Self {
            thing_id: thing_id.into(),
            thing_password: thing_password.into(),
            owner,
            layout_position: None,
            data_grouping_interval: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when the thing id or the password
    /// is empty.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        require(&self.thing_id, "thing_id")?;
        require(&self.thing_password, "thing_password")
    }
}

/// Onboard an end node behind an already-onboarded gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardEndnodeWithGatewayRequest {
    #[serde(rename = "gatewayThingID")]
    pub gateway_thing_id: String,
    #[serde(rename = "endNodeVendorThingID")]
    pub end_node_vendor_thing_id: String,
    pub end_node_password: String,
    pub owner: TypedId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_node_thing_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_node_firmware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_node_thing_properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_grouping_interval: Option<DataGroupingInterval>,
}

impl OnboardEndnodeWithGatewayRequest {
    pub const MEDIA_TYPE: &'static str =
        "application/vnd.kii.OnboardingEndNodeWithGatewayThingID+json";

    #[must_use]
    pub fn new(
        gateway_thing_id: impl Into<String>,
        end_node_vendor_thing_id: impl Into<String>,
        end_node_password: impl Into<String>,
        owner: TypedId,
    ) -> Self {
        Self {
            gateway_thing_id: gateway_thing_id.into(),
            end_node_vendor_thing_id: end_node_vendor_thing_id.into(),
            end_node_password: end_node_password.into(),
            owner,
            end_node_thing_type: None,
            end_node_firmware_version: None,
            end_node_thing_properties: None,
            data_grouping_interval: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when an identifier or the password
    /// is empty.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        require(&self.gateway_thing_id, "gateway_thing_id")?;
        require(&self.end_node_vendor_thing_id, "end_node_vendor_thing_id")?;
        require(&self.end_node_password, "end_node_password")
    }
}

/// MQTT connection details handed out at onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MqttEndpoint {
    #[serde(rename = "installationID")]
    pub installation_id: String,
    pub host: String,
    pub mqtt_topic: String,
    pub username: String,
    pub password: String,
    #[serde(rename = "portSSL")]
    pub port_ssl: u16,
    #[serde(rename = "portTCP")]
    pub port_tcp: u16,
    #[serde(rename = "portWS", default, skip_serializing_if = "Option::is_none")]
    pub port_ws: Option<u16>,
    #[serde(rename = "portWSS", default, skip_serializing_if = "Option::is_none")]
    pub port_wss: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

/// Credentials of a freshly onboarded thing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResult {
    #[serde(rename = "thingID")]
    pub thing_id: String,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_endpoint: Option<MqttEndpoint>,
}

impl OnboardingResult {
    /// The onboarded thing as a typed id.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when the server returned an empty id.
    pub fn target(&self) -> Result<TypedId, ArgumentError> {
        TypedId::thing(self.thing_id.clone())
    }
}
