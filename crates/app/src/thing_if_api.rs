//! `ThingIfApi` — an [`ApiAuthor`] bound to an owner and, once known, a target.
//!
//! Target-scoped calls fail with [`IllegalStateError::TargetNotBound`] until a
//! target is set, either explicitly or by a successful onboarding.

use thingif_domain::command::{Command, PostCommandRequest};
use thingif_domain::error::{IllegalStateError, ThingIfError};
use thingif_domain::id::TypedId;
use thingif_domain::onboarding::{
    OnboardEndnodeWithGatewayRequest, OnboardWithThingIdRequest, OnboardWithVendorThingIdRequest,
    OnboardingResult,
};
use thingif_domain::query::{ListQueryOptions, QueryResult};
use thingif_domain::state::{
    AliasState, GroupedHistoryStates, HistoryState, QueryGroupedHistoryStatesRequest,
    QueryHistoryStatesRequest, TargetState,
};
use thingif_domain::thing::UpdateVendorThingIdRequest;
use thingif_domain::trigger::{
    CommandTriggerRequest, PatchCommandTriggerRequest, PatchServerCodeTriggerRequest,
    ServerCodeResult, ServerCodeTriggerRequest, Trigger,
};

use crate::author::ApiAuthor;
use crate::ports::HttpTransport;

pub struct ThingIfApi<T> {
    author: ApiAuthor<T>,
    owner: TypedId,
    target: Option<TypedId>,
}

impl<T> ThingIfApi<T> {
    #[must_use]
    pub fn new(author: ApiAuthor<T>, owner: TypedId) -> Self {
        Self {
            author,
            owner,
            target: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: TypedId) -> Self {
        self.target = Some(target);
        self
    }

    /// Rebind the target used by target-scoped calls.
    pub fn set_target(&mut self, target: TypedId) {
        self.target = Some(target);
    }

    #[must_use]
    pub fn owner(&self) -> &TypedId {
        &self.owner
    }

    #[must_use]
    pub fn target(&self) -> Option<&TypedId> {
        self.target.as_ref()
    }

    /// The underlying author, for calls that are not target-scoped (push).
    #[must_use]
    pub fn author(&self) -> &ApiAuthor<T> {
        &self.author
    }

    fn bound_target(&self) -> Result<&TypedId, ThingIfError> {
        self.target
            .as_ref()
            .ok_or_else(|| IllegalStateError::TargetNotBound.into())
    }

    fn bound_thing_id(&self) -> Result<&str, ThingIfError> {
        self.bound_target().map(TypedId::id)
    }

    fn bind(&mut self, result: &OnboardingResult) -> Result<(), ThingIfError> {
        let target = result.target()?;
        tracing::info!(%target, "target bound");
        self.target = Some(target);
        Ok(())
    }
}

impl<T: HttpTransport> ThingIfApi<T> {
    /// Onboard a thing and bind it as the target.
    ///
    /// # Errors
    ///
    /// See [`ApiAuthor::onboard_with_vendor_thing_id`]. The target is left
    /// unchanged on failure.
    pub async fn onboard_with_vendor_thing_id(
        &mut self,
        request: &OnboardWithVendorThingIdRequest,
    ) -> Result<OnboardingResult, ThingIfError> {
        let result = self.author.onboard_with_vendor_thing_id(request).await?;
        self.bind(&result)?;
        Ok(result)
    }

    /// Onboard a thing and bind it as the target.
    ///
    /// # Errors
    ///
    /// See [`ApiAuthor::onboard_with_thing_id`]. The target is left unchanged
    /// on failure.
    pub async fn onboard_with_thing_id(
        &mut self,
        request: &OnboardWithThingIdRequest,
    ) -> Result<OnboardingResult, ThingIfError> {
        let result = self.author.onboard_with_thing_id(request).await?;
        self.bind(&result)?;
        Ok(result)
    }

    /// Onboard an end node and bind it as the target.
    ///
    /// # Errors
    ///
    /// See [`ApiAuthor::onboard_endnode_with_gateway`]. The target is left
    /// unchanged on failure.
    pub async fn onboard_endnode_with_gateway(
        &mut self,
        request: &OnboardEndnodeWithGatewayRequest,
    ) -> Result<OnboardingResult, ThingIfError> {
        let result = self.author.onboard_endnode_with_gateway(request).await?;
        self.bind(&result)?;
        Ok(result)
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::post_new_command`].
    pub async fn post_new_command(
        &self,
        request: &PostCommandRequest,
    ) -> Result<Command, ThingIfError> {
        self.author
            .post_new_command(self.bound_target()?, request)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::get_command`].
    pub async fn get_command(&self, command_id: &str) -> Result<Command, ThingIfError> {
        self.author
            .get_command(self.bound_target()?, command_id)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::list_commands`].
    pub async fn list_commands(
        &self,
        options: &ListQueryOptions,
    ) -> Result<QueryResult<Command>, ThingIfError> {
        self.author
            .list_commands(self.bound_target()?, options)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::post_command_trigger`].
    pub async fn post_command_trigger(
        &self,
        request: CommandTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        self.author
            .post_command_trigger(self.bound_target()?, request)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::post_server_code_trigger`].
    pub async fn post_server_code_trigger(
        &self,
        request: &ServerCodeTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        self.author
            .post_server_code_trigger(self.bound_target()?, request)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::get_trigger`].
    pub async fn get_trigger(&self, trigger_id: &str) -> Result<Trigger, ThingIfError> {
        self.author
            .get_trigger(self.bound_target()?, trigger_id)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::patch_command_trigger`].
    pub async fn patch_command_trigger(
        &self,
        trigger_id: &str,
        request: PatchCommandTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        self.author
            .patch_command_trigger(self.bound_target()?, trigger_id, request)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::patch_server_code_trigger`].
    pub async fn patch_server_code_trigger(
        &self,
        trigger_id: &str,
        request: &PatchServerCodeTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        self.author
            .patch_server_code_trigger(self.bound_target()?, trigger_id, request)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::enable_trigger`].
    pub async fn enable_trigger(
        &self,
        trigger_id: &str,
        enable: bool,
    ) -> Result<Trigger, ThingIfError> {
        self.author
            .enable_trigger(self.bound_target()?, trigger_id, enable)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::delete_trigger`].
    pub async fn delete_trigger(&self, trigger_id: &str) -> Result<String, ThingIfError> {
        self.author
            .delete_trigger(self.bound_target()?, trigger_id)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::list_triggers`].
    pub async fn list_triggers(
        &self,
        options: &ListQueryOptions,
    ) -> Result<QueryResult<Trigger>, ThingIfError> {
        self.author
            .list_triggers(self.bound_target()?, options)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::list_server_code_execution_results`].
    pub async fn list_server_code_execution_results(
        &self,
        trigger_id: &str,
        options: &ListQueryOptions,
    ) -> Result<QueryResult<ServerCodeResult>, ThingIfError> {
        self.author
            .list_server_code_execution_results(self.bound_target()?, trigger_id, options)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::get_state`].
    pub async fn get_state(&self) -> Result<TargetState, ThingIfError> {
        self.author.get_state(self.bound_target()?).await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::get_state_by_alias`].
    pub async fn get_state_by_alias(&self, alias: &str) -> Result<AliasState, ThingIfError> {
        self.author
            .get_state_by_alias(self.bound_target()?, alias)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::query_history_states`].
    pub async fn query_history_states(
        &self,
        request: &QueryHistoryStatesRequest,
    ) -> Result<QueryResult<HistoryState>, ThingIfError> {
        self.author
            .query_history_states(self.bound_target()?, request)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::query_grouped_history_states`].
    pub async fn query_grouped_history_states(
        &self,
        request: &QueryGroupedHistoryStatesRequest,
    ) -> Result<Vec<GroupedHistoryStates>, ThingIfError> {
        self.author
            .query_grouped_history_states(self.bound_target()?, request)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::get_vendor_thing_id`].
    pub async fn get_vendor_thing_id(&self) -> Result<String, ThingIfError> {
        self.author.get_vendor_thing_id(self.bound_thing_id()?).await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::update_vendor_thing_id`].
    pub async fn update_vendor_thing_id(
        &self,
        request: &UpdateVendorThingIdRequest,
    ) -> Result<(), ThingIfError> {
        self.author
            .update_vendor_thing_id(self.bound_thing_id()?, request)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::get_firmware_version`].
    pub async fn get_firmware_version(&self) -> Result<Option<String>, ThingIfError> {
        self.author
            .get_firmware_version(self.bound_thing_id()?)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::update_firmware_version`].
    pub async fn update_firmware_version(
        &self,
        firmware_version: &str,
    ) -> Result<(), ThingIfError> {
        self.author
            .update_firmware_version(self.bound_thing_id()?, firmware_version)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::get_thing_type`].
    pub async fn get_thing_type(&self) -> Result<Option<String>, ThingIfError> {
        self.author.get_thing_type(self.bound_thing_id()?).await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::IllegalState`] when no target is bound,
    /// otherwise see [`ApiAuthor::update_thing_type`].
    pub async fn update_thing_type(&self, thing_type: &str) -> Result<(), ThingIfError> {
        self.author
            .update_thing_type(self.bound_thing_id()?, thing_type)
            .await
    }
}
