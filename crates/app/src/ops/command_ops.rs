//! Command operations — send commands to a target and read them back.

use serde::Deserialize;
use thingif_domain::command::{Command, PostCommandRequest};
use thingif_domain::error::ThingIfError;
use thingif_domain::id::TypedId;
use thingif_domain::query::{ListQueryOptions, QueryResult};

use super::base::{BaseOp, JSON, require, segment};
use crate::ports::{HttpTransport, Method};

#[derive(Deserialize)]
struct CommandIdBody {
    #[serde(rename = "commandID")]
    command_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommandsPage {
    #[serde(default)]
    commands: Vec<Command>,
    next_pagination_key: Option<String>,
}

/// Commands of one target.
pub struct CommandOps<'a, T> {
    base: BaseOp<'a, T>,
    target: &'a TypedId,
}

impl<'a, T: HttpTransport> CommandOps<'a, T> {
    #[must_use]
    pub fn new(base: BaseOp<'a, T>, target: &'a TypedId) -> Self {
        Self { base, target }
    }

    fn commands_url(&self) -> String {
        let target = self.target.to_string();
        self.base
            .thing_if_url(&format!("/targets/{}/commands", segment(&target)))
    }

    /// Send a new command and return it as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] if the request is incomplete (no
    /// request is sent then), or the error of the POST or the follow-up GET.
    #[tracing::instrument(
        skip(self, request),
        fields(target = %self.target, schema = %request.schema)
    )]
    pub async fn post_new_command(
        &self,
        request: &PostCommandRequest,
    ) -> Result<Command, ThingIfError> {
        request.validate()?;
        let http = self
            .base
            .json_request(Method::Post, self.commands_url(), JSON, request)?;
        let created: CommandIdBody = self.base.execute_json(http).await?;
        self.get_command(&created.command_id).await
    }

    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when `command_id` is empty, or the
    /// HTTP/decode error of the request.
    #[tracing::instrument(skip(self), fields(target = %self.target))]
    pub async fn get_command(&self, command_id: &str) -> Result<Command, ThingIfError> {
        require(command_id, "command_id")?;
        let url = format!("{}/{}", self.commands_url(), segment(command_id));
        self.base
            .execute_json(self.base.request(Method::Get, url))
            .await
    }

    /// One page of the target's commands.
    ///
    /// # Errors
    ///
    /// Returns the HTTP/decode error of the request.
    #[tracing::instrument(skip(self, options), fields(target = %self.target))]
    pub async fn list_commands(
        &self,
        options: &ListQueryOptions,
    ) -> Result<QueryResult<Command>, ThingIfError> {
        let request = self
            .base
            .request(Method::Get, self.commands_url())
            .query(options.to_query());
        let page: CommandsPage = self.base.execute_json(request).await?;
        Ok(QueryResult::new(page.commands, page.next_pagination_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ApiResponse;
    use crate::testing::{RecordingTransport, app, ok};
    use serde_json::json;
    use thingif_domain::command::{Action, AliasAction, CommandState};
    use thingif_domain::error::ArgumentError;

    fn target() -> TypedId {
        TypedId::thing("th.01234-abcde").unwrap()
    }

    fn command_json(id: &str) -> serde_json::Value {
        json!({
            "commandID": id,
            "target": "thing:th.01234-abcde",
            "issuer": "user:u-1",
            "actions": [{"AirConditionerAlias": [{"turnPower": true}]}],
            "commandState": "SENDING",
            "createdAt": 1_456_456_456_000_i64,
            "modifiedAt": 1_456_456_457_000_i64
        })
    }

    fn request() -> PostCommandRequest {
        PostCommandRequest::builder()
            .schema("AirConditioner", 1)
            .alias_action(AliasAction::new(
                "AirConditionerAlias",
                vec![Action::new("turnPower", true)],
            ))
            .issuer(TypedId::user("u-1").unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_post_then_fetch_command_when_request_is_valid() {
        let transport = RecordingTransport::with_responses(vec![
            ApiResponse::new(201, Some(json!({"commandID": "c-1"}))),
            ok(command_json("c-1")),
        ]);
        let app = app();
        let target = target();
        let ops = CommandOps::new(BaseOp::new(&transport, &app, "t"), &target);

        let command = ops.post_new_command(&request()).await.unwrap();

        assert_eq!(command.command_id, "c-1");
        assert_eq!(command.command_state, Some(CommandState::Sending));
        assert_eq!(
            command.created.map(|t| t.timestamp_millis()),
            Some(1_456_456_456_000)
        );
        assert_eq!(
            command.modified.map(|t| t.timestamp_millis()),
            Some(1_456_456_457_000)
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(
            requests[0].url,
            "https://api-jp.kii.com/thing-if/apps/app-1/targets/thing:th.01234-abcde/commands"
        );
        assert_eq!(requests[0].header_value("Content-Type"), Some(JSON));
        assert_eq!(
            requests[0].body,
            Some(json!({
                "schema": "AirConditioner",
                "schemaVersion": 1,
                "actions": [{"AirConditionerAlias": [{"turnPower": true}]}],
                "issuer": "user:u-1"
            }))
        );
        assert_eq!(requests[1].method, Method::Get);
        assert!(requests[1].url.ends_with("/commands/c-1"));
    }

    #[tokio::test]
    async fn should_return_argument_error_without_sending_when_schema_is_empty() {
        let transport = RecordingTransport::default();
        let app = app();
        let target = target();
        let ops = CommandOps::new(BaseOp::new(&transport, &app, "t"), &target);
        let mut request = request();
        request.schema = String::new();

        let err = ops.post_new_command(&request).await.unwrap_err();

        assert!(matches!(
            err,
            ThingIfError::Argument(ArgumentError::Missing("schema"))
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn should_return_http_error_with_status_and_body_when_server_rejects() {
        let body = json!({"errorCode": "TARGET_NOT_FOUND", "message": "no such target"});
        let transport =
            RecordingTransport::with_responses(vec![ApiResponse::new(404, Some(body.clone()))]);
        let app = app();
        let target = target();
        let ops = CommandOps::new(BaseOp::new(&transport, &app, "t"), &target);

        let err = ops.get_command("c-1").await.unwrap_err();

        let ThingIfError::Http(http) = err else {
            panic!("expected http error, got {err:?}");
        };
        assert_eq!(http.status, 404);
        assert_eq!(http.body, Some(body));
        assert_eq!(http.message.as_deref(), Some("no such target"));
    }

    #[tokio::test]
    async fn should_pass_paging_options_when_listing_commands() {
        let transport = RecordingTransport::with_responses(vec![ok(json!({
            "commands": [command_json("c-1"), command_json("c-2")],
            "nextPaginationKey": "p-2"
        }))]);
        let app = app();
        let target = target();
        let ops = CommandOps::new(BaseOp::new(&transport, &app, "t"), &target);

        let page = ops
            .list_commands(&ListQueryOptions::limit(2).next_page("p-1"))
            .await
            .unwrap();

        assert_eq!(page.results.len(), 2);
        assert!(page.has_next());
        assert_eq!(
            transport.requests()[0].query,
            vec![
                ("bestEffortLimit".to_string(), "2".to_string()),
                ("paginationKey".to_string(), "p-1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn should_return_last_page_when_pagination_key_is_absent() {
        let transport = RecordingTransport::with_responses(vec![ok(json!({"commands": []}))]);
        let app = app();
        let target = target();
        let ops = CommandOps::new(BaseOp::new(&transport, &app, "t"), &target);

        let page = ops.list_commands(&ListQueryOptions::default()).await.unwrap();

        assert!(page.results.is_empty());
        assert!(!page.has_next());
        assert!(transport.requests()[0].query.is_empty());
    }

    #[tokio::test]
    async fn should_reject_empty_command_id() {
        let transport = RecordingTransport::default();
        let app = app();
        let target = target();
        let ops = CommandOps::new(BaseOp::new(&transport, &app, "t"), &target);

        assert_eq!(ops.get_command("").await.unwrap_err().name(), "ArgumentError");
        assert!(transport.requests().is_empty());
    }
}
