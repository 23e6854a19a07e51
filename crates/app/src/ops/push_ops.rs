//! Push installation operations.

use thingif_domain::error::ThingIfError;
use thingif_domain::push::{InstallationRequest, InstallationResult, PushDeviceType};

use super::base::{BaseOp, require, segment};
use crate::ports::{HttpTransport, Method};

pub struct PushOps<'a, T> {
    base: BaseOp<'a, T>,
}

impl<'a, T: HttpTransport> PushOps<'a, T> {
    #[must_use]
    pub fn new(base: BaseOp<'a, T>) -> Self {
        Self { base }
    }

    /// Register a device for push notifications and return the installation id.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when the registration id is empty,
    /// or the HTTP/decode error of the request.
    #[tracing::instrument(skip(self, request), fields(device_type = ?request.device_type))]
    pub async fn install(&self, request: &InstallationRequest) -> Result<String, ThingIfError> {
        request.validate()?;
        let http = self.base.json_request(
            Method::Post,
            self.base.kii_cloud_url("/installations"),
            InstallationRequest::MEDIA_TYPE,
            request,
        )?;
        let result: InstallationResult = self.base.execute_json(http).await?;
        Ok(result.installation_id)
    }

    /// # Errors
    ///
    /// See [`PushOps::install`].
    pub async fn install_fcm(
        &self,
        registration_id: &str,
        development: bool,
    ) -> Result<String, ThingIfError> {
        self.install(
            &InstallationRequest::new(registration_id, PushDeviceType::Fcm)
                .development(development),
        )
        .await
    }

    /// # Errors
    ///
    /// See [`PushOps::install`].
    pub async fn install_apns(
        &self,
        device_token: &str,
        development: bool,
    ) -> Result<String, ThingIfError> {
        self.install(
            &InstallationRequest::new(device_token, PushDeviceType::Apns)
                .development(development),
        )
        .await
    }

    /// # Errors
    ///
    /// See [`PushOps::install`].
    pub async fn install_jpush(
        &self,
        registration_id: &str,
        development: bool,
    ) -> Result<String, ThingIfError> {
        self.install(
            &InstallationRequest::new(registration_id, PushDeviceType::JPush)
                .development(development),
        )
        .await
    }

    /// Remove a push installation.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when `installation_id` is empty, or
    /// the HTTP error of the request.
    #[tracing::instrument(skip(self))]
    pub async fn uninstall_push(&self, installation_id: &str) -> Result<(), ThingIfError> {
        require(installation_id, "installation_id")?;
        let url = self
            .base
            .kii_cloud_url(&format!("/installations/{}", segment(installation_id)));
        self.base
            .execute(self.base.request(Method::Delete, url))
            .await?;
        Ok(())
    }
}
