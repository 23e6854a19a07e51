//! Trigger operations — create, patch, toggle, delete and list triggers.

use serde::Deserialize;
use thingif_domain::error::ThingIfError;
use thingif_domain::id::TypedId;
use thingif_domain::query::{ListQueryOptions, QueryResult};
use thingif_domain::trigger::{
    CommandTriggerRequest, PatchCommandTriggerRequest, PatchServerCodeTriggerRequest,
    ServerCodeResult, ServerCodeTriggerRequest, Trigger,
};

use super::base::{BaseOp, JSON, require, segment};
use crate::ports::{HttpTransport, Method};

#[derive(Deserialize)]
struct TriggerIdBody {
    #[serde(rename = "triggerID")]
    trigger_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriggersPage {
    #[serde(default)]
    triggers: Vec<Trigger>,
    next_pagination_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerCodeResultsPage {
    #[serde(default)]
    trigger_server_code_results: Vec<ServerCodeResult>,
    next_pagination_key: Option<String>,
}

/// Triggers of one target.
pub struct TriggerOps<'a, T> {
    base: BaseOp<'a, T>,
    target: &'a TypedId,
}

impl<'a, T: HttpTransport> TriggerOps<'a, T> {
    #[must_use]
    pub fn new(base: BaseOp<'a, T>, target: &'a TypedId) -> Self {
        Self { base, target }
    }

    fn triggers_url(&self) -> String {
        let target = self.target.to_string();
        self.base
            .thing_if_url(&format!("/targets/{}/triggers", segment(&target)))
    }

    fn trigger_url(&self, trigger_id: &str) -> String {
        format!("{}/{}", self.triggers_url(), segment(trigger_id))
    }

    async fn post_trigger<B: serde::Serialize>(&self, body: &B) -> Result<Trigger, ThingIfError> {
        let http = self
            .base
            .json_request(Method::Post, self.triggers_url(), JSON, body)?;
        let created: TriggerIdBody = self.base.execute_json(http).await?;
        self.get_trigger(&created.trigger_id).await
    }

    async fn patch_trigger<B: serde::Serialize>(
        &self,
        trigger_id: &str,
        body: &B,
    ) -> Result<Trigger, ThingIfError> {
        let http =
            self.base
                .json_request(Method::Patch, self.trigger_url(trigger_id), JSON, body)?;
        self.base.execute(http).await?;
        self.get_trigger(trigger_id).await
    }

    /// Create a trigger that sends a command. A command without an explicit
    /// target is sent to this target.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] if the request is incomplete, or the
    /// error of the POST or the follow-up GET.
    #[tracing::instrument(skip(self, request), fields(target = %self.target))]
    pub async fn post_command_trigger(
        &self,
        request: CommandTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        request.validate()?;
        let request = request.with_default_target(self.target);
        self.post_trigger(&request).await
    }

    /// Create a trigger that runs server code.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] if the request is incomplete, or the
    /// error of the POST or the follow-up GET.
    #[tracing::instrument(
        skip(self, request),
        fields(target = %self.target, endpoint = %request.server_code.endpoint)
    )]
    pub async fn post_server_code_trigger(
        &self,
        request: &ServerCodeTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        request.validate()?;
        self.post_trigger(request).await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when `trigger_id` is empty, or the
    /// HTTP/decode error of the request.
    #[tracing::instrument(skip(self), fields(target = %self.target))]
    pub async fn get_trigger(&self, trigger_id: &str) -> Result<Trigger, ThingIfError> {
        require(trigger_id, "trigger_id")?;
        let request = self.base.request(Method::Get, self.trigger_url(trigger_id));
        self.base.execute_json(request).await
    }

    /// Update the set fields of a command trigger.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] if nothing would change, or the
    /// error of the PATCH or the follow-up GET.
    #[tracing::instrument(skip(self, request), fields(target = %self.target))]
    pub async fn patch_command_trigger(
        &self,
        trigger_id: &str,
        request: PatchCommandTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        require(trigger_id, "trigger_id")?;
        request.validate()?;
        let request = request.with_default_target(self.target);
        self.patch_trigger(trigger_id, &request).await
    }

    /// Update the set fields of a server-code trigger.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] if nothing would change, or the
    /// error of the PATCH or the follow-up GET.
    #[tracing::instrument(skip(self, request), fields(target = %self.target))]
    pub async fn patch_server_code_trigger(
        &self,
        trigger_id: &str,
        request: &PatchServerCodeTriggerRequest,
    ) -> Result<Trigger, ThingIfError> {
        require(trigger_id, "trigger_id")?;
        request.validate()?;
        self.patch_trigger(trigger_id, request).await
    }

    /// Enable (`true`) or disable (`false`) a trigger and return its new state.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when `trigger_id` is empty, or the
    /// error of the PUT or the follow-up GET.
    #[tracing::instrument(skip(self), fields(target = %self.target))]
    pub async fn enable_trigger(
        &self,
        trigger_id: &str,
        enable: bool,
    ) -> Result<Trigger, ThingIfError> {
        require(trigger_id, "trigger_id")?;
        let verb = if enable { "enable" } else { "disable" };
        let url = format!("{}/{verb}", self.trigger_url(trigger_id));
        self.base
            .execute(self.base.request(Method::Put, url))
            .await?;
        self.get_trigger(trigger_id).await
    }

    /// Delete a trigger and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when `trigger_id` is empty, or the
    /// HTTP error of the request.
    #[tracing::instrument(skip(self), fields(target = %self.target))]
    pub async fn delete_trigger(&self, trigger_id: &str) -> Result<String, ThingIfError> {
        require(trigger_id, "trigger_id")?;
        let request = self
            .base
            .request(Method::Delete, self.trigger_url(trigger_id));
        self.base.execute(request).await?;
        Ok(trigger_id.to_string())
    }

    /// One page of the target's triggers.
    ///
    /// # Errors
    ///
    /// Returns the HTTP/decode error of the request.
    #[tracing::instrument(skip(self, options), fields(target = %self.target))]
    pub async fn list_triggers(
        &self,
        options: &ListQueryOptions,
    ) -> Result<QueryResult<Trigger>, ThingIfError> {
        let request = self
            .base
            .request(Method::Get, self.triggers_url())
            .query(options.to_query());
        let page: TriggersPage = self.base.execute_json(request).await?;
        Ok(QueryResult::new(page.triggers, page.next_pagination_key))
    }

    /// One page of the server-code executions of a trigger.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when `trigger_id` is empty, or the
    /// HTTP/decode error of the request.
    #[tracing::instrument(skip(self, options), fields(target = %self.target))]
    pub async fn list_server_code_execution_results(
        &self,
        trigger_id: &str,
        options: &ListQueryOptions,
    ) -> Result<QueryResult<ServerCodeResult>, ThingIfError> {
        require(trigger_id, "trigger_id")?;
        let url = format!("{}/results/server-code", self.trigger_url(trigger_id));
        let request = self
            .base
            .request(Method::Get, url)
            .query(options.to_query());
        let page: ServerCodeResultsPage = self.base.execute_json(request).await?;
        Ok(QueryResult::new(
            page.trigger_server_code_results,
            page.next_pagination_key,
        ))
    }
}
