//! `ApiAuthor` — the token-holding entry point to every operation.

use tracing::Instrument;

use thingif_domain::command::{Command, PostCommandRequest};
use thingif_domain::error::ThingIfError;
use thingif_domain::id::TypedId;
use thingif_domain::kii_app::KiiApp;
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

use crate::ops::{BaseOp, CommandOps, OnboardingOps, PushOps, StateOps, ThingOps, TriggerOps};
use crate::ports::HttpTransport;

/// Issues API calls on behalf of the holder of `token`.
///
/// Every call runs inside `span`, so the per-operation spans and events can
/// be routed or filtered by whoever built the author.
pub struct ApiAuthor<T> {
    token: String,
    app: KiiApp,
    transport: T,
    span: tracing::Span,
}

impl<T: std::fmt::Debug> std::fmt::Debug for ApiAuthor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiAuthor")
            .field("app", &self.app)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl<T> ApiAuthor<T> {
    /// Create an author for `app` using `token`.
    pub fn new(token: impl Into<String>, app: KiiApp, transport: T) -> Self {
        let span = tracing::info_span!("thingif", app_id = %app.app_id());
        Self {
            token: token.into(),
            app,
            transport,
            span,
        }
    }

    /// Run every call inside `span` instead of the default `thingif` span.
    #[must_use]
    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn app(&self) -> &KiiApp {
        &self.app
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: HttpTransport> ApiAuthor<T> {
    fn base(&self) -> BaseOp<'_, T> {
        BaseOp::new(&self.transport, &self.app, &self.token)
    }

    // -- Onboarding --

    /// # Errors
    ///
    /// See [`OnboardingOps::onboard_with_vendor_thing_id`].
    pub async fn onboard_with_vendor_thing_id(
        &self,
        request: &OnboardWithVendorThingIdRequest,
    ) -> Result<OnboardingResult, ThingIfError> {
        OnboardingOps::new(self.base())
            .onboard_with_vendor_thing_id(request)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`OnboardingOps::onboard_with_thing_id`].
    pub async fn onboard_with_thing_id(
        &self,
        request: &OnboardWithThingIdRequest,
    ) -> Result<OnboardingResult, ThingIfError> {
        OnboardingOps::new(self.base())
            .onboard_with_thing_id(request)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`OnboardingOps::onboard_endnode_with_gateway`].
    pub async fn onboard_endnode_with_gateway(
        &self,
        request: &OnboardEndnodeWithGatewayRequest,
    ) -> Result<OnboardingResult, ThingIfError> {
        OnboardingOps::new(self.base())
            .onboard_endnode_with_gateway(request)
            .instrument(self.span.clone())
            .await
    }

    // -- Commands --

    /// # Errors
    ///
    /// See [`CommandOps::post_new_command`].
    pub async fn post_new_command(
        &self,
        target: &TypedId,
        request: &PostCommandRequest,
    ) -> Result<Command, ThingIfError> {
        CommandOps::new(self.base(), target)
            .post_new_command(request)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`CommandOps::get_command`].
    pub async fn get_command(
        &self,
        target: &TypedId,
        command_id: &str,
    ) -> Result<Command, ThingIfError> {
        CommandOps::new(self.base(), target)
            .get_command(command_id)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`CommandOps::list_commands`].
    pub async fn list_commands(
        &self,
        target: &TypedId,
        options: &ListQueryOptions,
    ) -> Result<QueryResult<Command>, ThingIfError> {
        CommandOps::new(self.base(), target)
            .list_commands(options)
            .instrument(self.span.clone())
            .await
    }

    // -- Triggers --

    /// # Errors
    ///
    /// See [`TriggerOps::post_command_trigger`].
    pub async fn post_command_trigger(
        &self,
        target: &TypedId,
        request: CommandTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        TriggerOps::new(self.base(), target)
            .post_command_trigger(request)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`TriggerOps::post_server_code_trigger`].
    pub async fn post_server_code_trigger(
        &self,
        target: &TypedId,
        request: &ServerCodeTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        TriggerOps::new(self.base(), target)
            .post_server_code_trigger(request)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`TriggerOps::get_trigger`].
    pub async fn get_trigger(
        &self,
        target: &TypedId,
        trigger_id: &str,
    ) -> Result<Trigger, ThingIfError> {
        TriggerOps::new(self.base(), target)
            .get_trigger(trigger_id)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`TriggerOps::patch_command_trigger`].
    pub async fn patch_command_trigger(
        &self,
        target: &TypedId,
        trigger_id: &str,
        request: PatchCommandTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        TriggerOps::new(self.base(), target)
            .patch_command_trigger(trigger_id, request)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`TriggerOps::patch_server_code_trigger`].
    pub async fn patch_server_code_trigger(
        &self,
        target: &TypedId,
        trigger_id: &str,
        request: &PatchServerCodeTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        TriggerOps::new(self.base(), target)
            .patch_server_code_trigger(trigger_id, request)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`TriggerOps::enable_trigger`].
    pub async fn enable_trigger(
        &self,
        target: &TypedId,
        trigger_id: &str,
        enable: bool,
    ) -> Result<Trigger, ThingIfError> {
        TriggerOps::new(self.base(), target)
            .enable_trigger(trigger_id, enable)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`TriggerOps::delete_trigger`].
    pub async fn delete_trigger(
        &self,
        target: &TypedId,
        trigger_id: &str,
    ) -> Result<String, ThingIfError> {
        TriggerOps::new(self.base(), target)
            .delete_trigger(trigger_id)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`TriggerOps::list_triggers`].
    pub async fn list_triggers(
        &self,
        target: &TypedId,
        options: &ListQueryOptions,
    ) -> Result<QueryResult<Trigger>, ThingIfError> {
        TriggerOps::new(self.base(), target)
            .list_triggers(options)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`TriggerOps::list_server_code_execution_results`].
    pub async fn list_server_code_execution_results(
        &self,
        target: &TypedId,
        trigger_id: &str,
        options: &ListQueryOptions,
    ) -> Result<QueryResult<ServerCodeResult>, ThingIfError> {
        TriggerOps::new(self.base(), target)
            .list_server_code_execution_results(trigger_id, options)
            .instrument(self.span.clone())
            .await
    }

    // -- State --

    /// # Errors
    ///
    /// See [`StateOps::get_state`].
    pub async fn get_state(&self, target: &TypedId) -> Result<TargetState, ThingIfError> {
        StateOps::new(self.base(), target)
            .get_state()
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`StateOps::get_state_by_alias`].
    pub async fn get_state_by_alias(
        &self,
        target: &TypedId,
        alias: &str,
    ) -> Result<AliasState, ThingIfError> {
        StateOps::new(self.base(), target)
            .get_state_by_alias(alias)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`StateOps::query_history_states`].
    pub async fn query_history_states(
        &self,
        target: &TypedId,
        request: &QueryHistoryStatesRequest,
    ) -> Result<QueryResult<HistoryState>, ThingIfError> {
        StateOps::new(self.base(), target)
            .query_history_states(request)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`StateOps::query_grouped_history_states`].
    pub async fn query_grouped_history_states(
        &self,
        target: &TypedId,
        request: &QueryGroupedHistoryStatesRequest,
    ) -> Result<Vec<GroupedHistoryStates>, ThingIfError> {
        StateOps::new(self.base(), target)
            .query_grouped_history_states(request)
            .instrument(self.span.clone())
            .await
    }

    // -- Thing attributes --

    /// # Errors
    ///
    /// See [`ThingOps::get_vendor_thing_id`].
    pub async fn get_vendor_thing_id(&self, thing_id: &str) -> Result<String, ThingIfError> {
        ThingOps::new(self.base(), thing_id)
            .get_vendor_thing_id()
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`ThingOps::update_vendor_thing_id`].
    pub async fn update_vendor_thing_id(
        &self,
        thing_id: &str,
        request: &UpdateVendorThingIdRequest,
    ) -> Result<(), ThingIfError> {
        ThingOps::new(self.base(), thing_id)
            .update_vendor_thing_id(request)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`ThingOps::get_firmware_version`].
    pub async fn get_firmware_version(
        &self,
        thing_id: &str,
    ) -> Result<Option<String>, ThingIfError> {
        ThingOps::new(self.base(), thing_id)
            .get_firmware_version()
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`ThingOps::update_firmware_version`].
    pub async fn update_firmware_version(
        &self,
        thing_id: &str,
        firmware_version: &str,
    ) -> Result<(), ThingIfError> {
        ThingOps::new(self.base(), thing_id)
            .update_firmware_version(firmware_version)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`ThingOps::get_thing_type`].
    pub async fn get_thing_type(&self, thing_id: &str) -> Result<Option<String>, ThingIfError> {
        ThingOps::new(self.base(), thing_id)
            .get_thing_type()
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`ThingOps::update_thing_type`].
    pub async fn update_thing_type(
        &self,
        thing_id: &str,
        thing_type: &str,
    ) -> Result<(), ThingIfError> {
        ThingOps::new(self.base(), thing_id)
            .update_thing_type(thing_type)
            .instrument(self.span.clone())
            .await
    }

    // -- Push --

    /// # Errors
    ///
    /// See [`PushOps::install`].
    pub async fn install_fcm(
        &self,
        registration_id: &str,
        development: bool,
    ) -> Result<String, ThingIfError> {
        PushOps::new(self.base())
            .install_fcm(registration_id, development)
            .instrument(self.span.clone())
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
        PushOps::new(self.base())
            .install_apns(device_token, development)
            .instrument(self.span.clone())
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
        PushOps::new(self.base())
            .install_jpush(registration_id, development)
            .instrument(self.span.clone())
            .await
    }

    /// # Errors
    ///
    /// See [`PushOps::uninstall_push`].
    pub async fn uninstall_push(&self, installation_id: &str) -> Result<(), ThingIfError> {
        PushOps::new(self.base())
            .uninstall_push(installation_id)
            .instrument(self.span.clone())
            .await
    }
}
