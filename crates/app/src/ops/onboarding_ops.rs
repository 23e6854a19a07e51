//! Onboarding operations — bind things to an owner.

use serde::Deserialize;
use thingif_domain::error::ThingIfError;
use thingif_domain::onboarding::{
    OnboardEndnodeWithGatewayRequest, OnboardWithThingIdRequest, OnboardWithVendorThingIdRequest,
    OnboardingResult,
};

use super::base::BaseOp;
use crate::ports::{HttpTransport, Method};

/// End-node onboarding answers with `endNodeThingID` instead of `thingID`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndnodeOnboardingBody {
    #[serde(rename = "endNodeThingID")]
    end_node_thing_id: String,
    access_token: String,
}

pub struct OnboardingOps<'a, T> {
    base: BaseOp<'a, T>,
}

impl<'a, T: HttpTransport> OnboardingOps<'a, T> {
    #[must_use]
    pub fn new(base: BaseOp<'a, T>) -> Self {
        Self { base }
    }

    fn onboardings_url(&self) -> String {
        self.base.thing_if_url("/onboardings")
    }

    /// Onboard a thing by vendor thing id, registering it if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when a required field is empty, or
    /// the HTTP/decode error of the request.
    #[tracing::instrument(skip(self, request), fields(vendor_thing_id = %request.vendor_thing_id))]
    pub async fn onboard_with_vendor_thing_id(
        &self,
        request: &OnboardWithVendorThingIdRequest,
    ) -> Result<OnboardingResult, ThingIfError> {
        request.validate()?;
        let http = self.base.json_request(
            Method::Post,
            self.onboardings_url(),
            OnboardWithVendorThingIdRequest::MEDIA_TYPE,
            request,
        )?;
        self.base.execute_json(http).await
    }

    /// Onboard an already registered thing by its thing id.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when a required field is empty, or
    /// the HTTP/decode error of the request.
    #[tracing::instrument(skip(self, request), fields(thing_id = %request.thing_id))]
    pub async fn onboard_with_thing_id(
        &self,
        request: &OnboardWithThingIdRequest,
    ) -> Result<OnboardingResult, ThingIfError> {
        request.validate()?;
        let http = self.base.json_request(
            Method::Post,
            self.onboardings_url(),
            OnboardWithThingIdRequest::MEDIA_TYPE,
            request,
        )?;
        self.base.execute_json(http).await
    }

    /// Onboard an end node through its gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when a required field is empty, or
    /// the HTTP/decode error of the request.
    #[tracing::instrument(skip(self, request), fields(gateway = %request.gateway_thing_id))]
    pub async fn onboard_endnode_with_gateway(
        &self,
        request: &OnboardEndnodeWithGatewayRequest,
    ) -> Result<OnboardingResult, ThingIfError> {
        request.validate()?;
        let http = self.base.json_request(
            Method::Post,
            self.onboardings_url(),
            OnboardEndnodeWithGatewayRequest::MEDIA_TYPE,
            request,
        )?;
        let body: EndnodeOnboardingBody = self.base.execute_json(http).await?;
        Ok(OnboardingResult {
            thing_id: body.end_node_thing_id,
            access_token: body.access_token,
            mqtt_endpoint: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingTransport, app, ok};
    use serde_json::json;
    use thingif_domain::id::TypedId;

    fn owner() -> TypedId {
        TypedId::user("u-1").unwrap()
    }

    #[tokio::test]
    async fn should_post_vendor_thing_id_onboarding_with_vendor_media_type() {
        let transport = RecordingTransport::with_responses(vec![ok(json!({
            "thingID": "th.01234-abcde",
            "accessToken": "thing-token"
        }))]);
        let app = app();
        let ops = OnboardingOps::new(BaseOp::new(&transport, &app, "owner-token"));

        let result = ops
            .onboard_with_vendor_thing_id(&OnboardWithVendorThingIdRequest::new(
                "vid-1",
                "pass",
                owner(),
            ))
            .await
            .unwrap();

        assert_eq!(result.thing_id, "th.01234-abcde");
        assert_eq!(result.access_token, "thing-token");
        let request = &transport.requests()[0];
        assert_eq!(
            request.url,
            "https://api-jp.kii.com/thing-if/apps/app-1/onboardings"
        );
        assert_eq!(
            request.header_value("Content-Type"),
            Some(OnboardWithVendorThingIdRequest::MEDIA_TYPE)
        );
        assert_eq!(
            request.header_value("Authorization"),
            Some("Bearer owner-token")
        );
    }

    #[tokio::test]
    async fn should_post_thing_id_onboarding() {
        let transport = RecordingTransport::with_responses(vec![ok(json!({
            "thingID": "th.1",
            "accessToken": "tok"
        }))]);
        let app = app();
        let ops = OnboardingOps::new(BaseOp::new(&transport, &app, "t"));

        ops.onboard_with_thing_id(&OnboardWithThingIdRequest::new("th.1", "pass", owner()))
            .await
            .unwrap();

        assert_eq!(
            transport.requests()[0].header_value("Content-Type"),
            Some(OnboardWithThingIdRequest::MEDIA_TYPE)
        );
    }

    #[tokio::test]
    async fn should_map_end_node_thing_id_into_result() {
        let transport = RecordingTransport::with_responses(vec![ok(json!({
            "endNodeThingID": "th.node",
            "accessToken": "node-token"
        }))]);
        let app = app();
        let ops = OnboardingOps::new(BaseOp::new(&transport, &app, "t"));

        let result = ops
            .onboard_endnode_with_gateway(&OnboardEndnodeWithGatewayRequest::new(
                "th.gw", "vid-node", "pw", owner(),
            ))
            .await
            .unwrap();

        assert_eq!(result.thing_id, "th.node");
        assert_eq!(result.access_token, "node-token");
    }

    #[tokio::test]
    async fn should_not_send_when_vendor_thing_id_is_empty() {
        let transport = RecordingTransport::default();
        let app = app();
        let ops = OnboardingOps::new(BaseOp::new(&transport, &app, "t"));

        let err = ops
            .onboard_with_vendor_thing_id(&OnboardWithVendorThingIdRequest::new("", "p", owner()))
            .await
            .unwrap_err();

        assert_eq!(err.name(), "ArgumentError");
        assert!(transport.requests().is_empty());
    }
}
