//! Thing attribute operations — vendor thing id, firmware version and thing type.

use thingif_domain::error::ThingIfError;
use thingif_domain::thing::{
    FIRMWARE_VERSION_NOT_FOUND, FirmwareVersionBody, THING_WITHOUT_THING_TYPE, ThingTypeBody,
    UpdateVendorThingIdRequest, VendorThingIdBody,
};

use super::base::{BaseOp, is_not_found_with, require, segment};
use crate::ports::{HttpTransport, Method};

pub struct ThingOps<'a, T> {
    base: BaseOp<'a, T>,
    thing_id: &'a str,
}

impl<'a, T: HttpTransport> ThingOps<'a, T> {
    #[must_use]
    pub fn new(base: BaseOp<'a, T>, thing_id: &'a str) -> Self {
        Self { base, thing_id }
    }

    fn vendor_thing_id_url(&self) -> String {
        self.base
            .kii_cloud_url(&format!("/things/{}/vendor-thing-id", segment(self.thing_id)))
    }

    fn attribute_url(&self, attribute: &str) -> String {
        self.base
            .thing_if_url(&format!("/things/{}/{attribute}", segment(self.thing_id)))
    }

    /// # Errors
    ///
    /// Returns the HTTP/decode error of the request.
    #[tracing::instrument(skip(self), fields(thing_id = %self.thing_id))]
    pub async fn get_vendor_thing_id(&self) -> Result<String, ThingIfError> {
        require(self.thing_id, "thing_id")?;
        let request = self.base.request(Method::Get, self.vendor_thing_id_url());
        let body: VendorThingIdBody = self.base.execute_json(request).await?;
        Ok(body.vendor_thing_id)
    }

    /// Replace the vendor thing id and password of the thing.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when either field is empty, or the
    /// HTTP error of the request.
    #[tracing::instrument(skip(self, request), fields(thing_id = %self.thing_id))]
    pub async fn update_vendor_thing_id(
        &self,
        request: &UpdateVendorThingIdRequest,
    ) -> Result<(), ThingIfError> {
        require(self.thing_id, "thing_id")?;
        request.validate()?;
        let http = self.base.json_request(
            Method::Put,
            self.vendor_thing_id_url(),
            UpdateVendorThingIdRequest::MEDIA_TYPE,
            request,
        )?;
        self.base.execute(http).await?;
        Ok(())
    }

    /// Firmware version of the thing, `None` when it has none.
    ///
    /// # Errors
    ///
    /// Returns the HTTP/decode error of the request.
    #[tracing::instrument(skip(self), fields(thing_id = %self.thing_id))]
    pub async fn get_firmware_version(&self) -> Result<Option<String>, ThingIfError> {
        require(self.thing_id, "thing_id")?;
        let request = self
            .base
            .request(Method::Get, self.attribute_url("firmware-version"));
        match self.base.execute_json::<FirmwareVersionBody>(request).await {
            Ok(body) => Ok(Some(body.firmware_version)),
            Err(err) if is_not_found_with(&err, FIRMWARE_VERSION_NOT_FOUND) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when `firmware_version` is empty, or
    /// the HTTP error of the request.
    #[tracing::instrument(skip(self), fields(thing_id = %self.thing_id))]
    pub async fn update_firmware_version(
        &self,
        firmware_version: &str,
    ) -> Result<(), ThingIfError> {
        require(self.thing_id, "thing_id")?;
        require(firmware_version, "firmware_version")?;
        let http = self.base.json_request(
            Method::Put,
            self.attribute_url("firmware-version"),
            FirmwareVersionBody::MEDIA_TYPE,
            &FirmwareVersionBody {
                firmware_version: firmware_version.to_string(),
            },
        )?;
        self.base.execute(http).await?;
        Ok(())
    }

    /// Thing type of the thing, `None` when it has none.
    ///
    /// # Errors
    ///
    /// Returns the HTTP/decode error of the request.
    #[tracing::instrument(skip(self), fields(thing_id = %self.thing_id))]
    pub async fn get_thing_type(&self) -> Result<Option<String>, ThingIfError> {
        require(self.thing_id, "thing_id")?;
        let request = self
            .base
            .request(Method::Get, self.attribute_url("thing-type"));
        match self.base.execute_json::<ThingTypeBody>(request).await {
            Ok(body) => Ok(Some(body.thing_type)),
            Err(err) if is_not_found_with(&err, THING_WITHOUT_THING_TYPE) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when `thing_type` is empty, or the
    /// HTTP error of the request.
    #[tracing::instrument(skip(self), fields(thing_id = %self.thing_id))]
    pub async fn update_thing_type(&self, thing_type: &str) -> Result<(), ThingIfError> {
        require(self.thing_id, "thing_id")?;
        require(thing_type, "thing_type")?;
        let http = self.base.json_request(
            Method::Put,
            self.attribute_url("thing-type"),
            ThingTypeBody::MEDIA_TYPE,
            &ThingTypeBody {
                thing_type: thing_type.to_string(),
            },
        )?;
        self.base.execute(http).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ApiResponse;
    use crate::testing::{RecordingTransport, app, ok};
    use serde_json::json;

    #[tokio::test]
    async fn should_read_vendor_thing_id_from_kii_cloud_api() {
        let transport =
            RecordingTransport::with_responses(vec![ok(json!({"_vendorThingID": "vid-1"}))]);
        let app = app();
        let ops = ThingOps::new(BaseOp::new(&transport, &app, "t"), "th.1");

        assert_eq!(ops.get_vendor_thing_id().await.unwrap(), "vid-1");
        assert_eq!(
            transport.requests()[0].url,
            "https://api-jp.kii.com/api/apps/app-1/things/th.1/vendor-thing-id"
        );
    }

    #[tokio::test]
    async fn should_put_vendor_thing_id_update() {
        let transport = RecordingTransport::with_responses(vec![ApiResponse::new(204, None)]);
        let app = app();
        let ops = ThingOps::new(BaseOp::new(&transport, &app, "t"), "th.1");

        ops.update_vendor_thing_id(&UpdateVendorThingIdRequest::new("vid-2", "pw"))
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Put);
        assert_eq!(
            request.header_value("Content-Type"),
            Some(UpdateVendorThingIdRequest::MEDIA_TYPE)
        );
        assert_eq!(
            request.body,
            Some(json!({"_vendorThingID": "vid-2", "_password": "pw"}))
        );
    }

    #[tokio::test]
    async fn should_return_none_when_firmware_version_is_not_found() {
        let transport = RecordingTransport::with_responses(vec![ApiResponse::new(
            404,
            Some(json!({"errorCode": "FIRMWARE_VERSION_NOT_FOUND"})),
        )]);
        let app = app();
        let ops = ThingOps::new(BaseOp::new(&transport, &app, "t"), "th.1");

        assert_eq!(ops.get_firmware_version().await.unwrap(), None);
        assert_eq!(
            transport.requests()[0].url,
            "https://api-jp.kii.com/thing-if/apps/app-1/things/th.1/firmware-version"
        );
    }

    #[tokio::test]
    async fn should_propagate_404_when_thing_is_missing() {
        let transport = RecordingTransport::with_responses(vec![ApiResponse::new(
            404,
            Some(json!({"errorCode": "THING_NOT_FOUND"})),
        )]);
        let app = app();
        let ops = ThingOps::new(BaseOp::new(&transport, &app, "t"), "th.1");

        let err = ops.get_thing_type().await.unwrap_err();

        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn should_return_thing_type_when_set() {
        let transport = RecordingTransport::with_responses(vec![ok(json!({"thingType": "Lamp"}))]);
        let app = app();
        let ops = ThingOps::new(BaseOp::new(&transport, &app, "t"), "th.1");

        assert_eq!(ops.get_thing_type().await.unwrap().as_deref(), Some("Lamp"));
    }

    #[tokio::test]
    async fn should_put_firmware_version_with_vendor_media_type() {
        let transport = RecordingTransport::with_responses(vec![ApiResponse::new(204, None)]);
        let app = app();
        let ops = ThingOps::new(BaseOp::new(&transport, &app, "t"), "th.1");

        ops.update_firmware_version("v2").await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(
            request.header_value("Content-Type"),
            Some(FirmwareVersionBody::MEDIA_TYPE)
        );
        assert_eq!(request.body, Some(json!({"firmwareVersion": "v2"})));
    }

    #[tokio::test]
    async fn should_not_send_when_thing_type_is_empty() {
        let transport = RecordingTransport::default();
        let app = app();
        let ops = ThingOps::new(BaseOp::new(&transport, &app, "t"), "th.1");

        assert!(ops.update_thing_type("").await.is_err());
        assert!(transport.requests().is_empty());
    }
}
