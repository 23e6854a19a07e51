//! Thing attributes — vendor thing id, firmware version and thing type.

use serde::{Deserialize, Serialize};

use crate::error::ArgumentError;

/// Error code returned with a 404 when a thing has no firmware version.
pub const FIRMWARE_VERSION_NOT_FOUND: &str = "FIRMWARE_VERSION_NOT_FOUND";

/// Error code returned with a 404 when a thing has no thing type.
pub const THING_WITHOUT_THING_TYPE: &str = "THING_WITHOUT_THING_TYPE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorThingIdBody {
    #[serde(rename = "_vendorThingID")]
    pub vendor_thing_id: String,
}

/// New vendor thing id and password for an existing thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateVendorThingIdRequest {
    #[serde(rename = "_vendorThingID")]
    pub vendor_thing_id: String,
    #[serde(rename = "_password")]
    pub password: String,
}

impl UpdateVendorThingIdRequest {
    pub const MEDIA_TYPE: &'static str = "application/vnd.kii.VendorThingIDUpdateRequest+json";

    #[must_use]
    pub fn new(vendor_thing_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            vendor_thing_id: vendor_thing_id.into(),
            password: password.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when either field is empty.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if self.vendor_thing_id.is_empty() {
            return Err(ArgumentError::Missing("vendor_thing_id"));
        }
        if self.password.is_empty() {
            return Err(ArgumentError::Missing("password"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareVersionBody {
    pub firmware_version: String,
}

impl FirmwareVersionBody {
    pub const MEDIA_TYPE: &'static str =
        "application/vnd.kii.ThingFirmwareVersionUpdateRequest+json";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThingTypeBody {
    pub thing_type: String,
}

impl ThingTypeBody {
    pub const MEDIA_TYPE: &'static str = "application/vnd.kii.ThingTypeUpdateRequest+json";
}
