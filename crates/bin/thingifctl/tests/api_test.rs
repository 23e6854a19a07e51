//! End-to-end tests of the full client stack.
//!
//! Each test wires the real reqwest transport into an `ApiAuthor` and talks
//! to a local `mockito` server standing in for the Thing-IF cloud.

use mockito::Matcher;
use serde_json::json;
use thingif_adapter_http_reqwest::{HttpConfig, ReqwestTransport};
use thingif_app::{ApiAuthor, ThingIfApi};
use thingif_domain::clause::TriggerClause;
use thingif_domain::command::{Action, AliasAction, CommandState};
use thingif_domain::error::ThingIfError;
use thingif_domain::id::TypedId;
use thingif_domain::kii_app::{KiiApp, Site};
use thingif_domain::trigger::{
    CommandTriggerRequest, Condition, Predicate, TriggerCommand, TriggersWhen,
};

const TRIGGERS_PATH: &str = "/thing-if/apps/app-1/targets/thing:th.01234-abcde/triggers";

fn author(server: &mockito::ServerGuard) -> ApiAuthor<ReqwestTransport> {
    let app = KiiApp::new("app-1", "key-1", Site::Custom(server.url())).unwrap();
    let transport = ReqwestTransport::new(&HttpConfig::default()).unwrap();
    ApiAuthor::new("owner-token", app, transport)
}

fn target() -> TypedId {
    TypedId::thing("th.01234-abcde").unwrap()
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_post_state_trigger_then_fetch_it() {
    let mut server = mockito::Server::new_async().await;
    let post = server
        .mock("POST", TRIGGERS_PATH)
        .match_header("authorization", "Bearer owner-token")
        .match_header("x-kii-appid", "app-1")
        .match_header("x-kii-appkey", "key-1")
        .match_header("x-kii-sdk", Matcher::Regex("^sn=rsti;sv=".into()))
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "predicate": {
                "eventSource": "STATES",
                "condition": {"type": "eq", "field": "power", "value": "false"},
                "triggersWhen": "CONDITION_CHANGED"
            },
            "triggersWhat": "COMMAND",
            "command": {
                "target": "thing:th.01234-abcde",
                "issuer": "user:u-1",
                "actions": [{"AirConditionerAlias": [{"turnPower": true}]}]
            }
        })))
        .with_status(201)
        .with_body(r#"{"triggerID":"tr-1"}"#)
        .create_async()
        .await;
    let get = server
        .mock("GET", format!("{TRIGGERS_PATH}/tr-1").as_str())
        .with_status(200)
        .with_body(
            json!({
                "triggerID": "tr-1",
                "predicate": {
                    "eventSource": "STATES",
                    "condition": {"type": "eq", "field": "power", "value": "false"},
                    "triggersWhen": "CONDITION_CHANGED"
                },
                "triggersWhat": "COMMAND",
                "command": {
                    "target": "thing:th.01234-abcde",
                    "issuer": "user:u-1",
                    "actions": [{"AirConditionerAlias": [{"turnPower": true}]}]
                },
                "disabled": false
            })
            .to_string(),
        )
        .create_async()
        .await;

    let command = TriggerCommand::new(
        TypedId::user("u-1").unwrap(),
        vec![AliasAction::new(
            "AirConditionerAlias",
            vec![Action::new("turnPower", true)],
        )],
    );
    let predicate = Predicate::state(
        Condition::new(TriggerClause::equals("power", "false")),
        TriggersWhen::ConditionChanged,
    );

    let trigger = author(&server)
        .post_command_trigger(&target(), CommandTriggerRequest::new(command, predicate))
        .await
        .unwrap();

    post.assert_async().await;
    get.assert_async().await;
    assert_eq!(trigger.trigger_id, "tr-1");
    assert!(!trigger.disabled);
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_map_command_fields_from_server_json() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            "/thing-if/apps/app-1/targets/thing:th.01234-abcde/commands/c-1",
        )
        .with_status(200)
        .with_body(
            json!({
                "commandID": "c-1",
                "target": "thing:th.01234-abcde",
                "issuer": "user:u-1",
                "actions": [{"AirConditionerAlias": [{"turnPower": true}]}],
                "actionResults": [{"AirConditionerAlias": [{"turnPower": {"succeeded": true}}]}],
                "commandState": "DONE",
                "createdAt": 1_456_456_456_000_i64,
                "modifiedAt": 1_456_456_457_000_i64
            })
            .to_string(),
        )
        .create_async()
        .await;

    let command = author(&server)
        .get_command(&target(), "c-1")
        .await
        .unwrap();

    assert_eq!(command.command_state, Some(CommandState::Done));
    assert_eq!(
        command.created.map(|t| t.timestamp_millis()),
        Some(1_456_456_456_000)
    );
    assert_eq!(
        command.modified.map(|t| t.timestamp_millis()),
        Some(1_456_456_457_000)
    );
    assert!(command.results_for("AirConditionerAlias").is_some());
}

#[tokio::test]
async fn should_surface_http_error_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            "/thing-if/apps/app-1/targets/thing:th.01234-abcde/commands/missing",
        )
        .with_status(404)
        .with_body(r#"{"errorCode":"COMMAND_NOT_FOUND","message":"Command missing not found"}"#)
        .create_async()
        .await;

    let err = author(&server)
        .get_command(&target(), "missing")
        .await
        .unwrap_err();

    let ThingIfError::Http(http) = err else {
        panic!("expected http error, got {err:?}");
    };
    assert_eq!(http.status, 404);
    assert_eq!(http.error_code.as_deref(), Some("COMMAND_NOT_FOUND"));
    assert_eq!(
        http.body,
        Some(json!({"errorCode": "COMMAND_NOT_FOUND", "message": "Command missing not found"}))
    );
}

// ---------------------------------------------------------------------------
// Onboarding and target binding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_bind_onboarded_thing_as_target() {
    let mut server = mockito::Server::new_async().await;
    let _onboard = server
        .mock("POST", "/thing-if/apps/app-1/onboardings")
        .match_header(
            "content-type",
            "application/vnd.kii.OnboardingWithVendorThingIDByOwner+json",
        )
        .with_status(200)
        .with_body(r#"{"thingID":"th.01234-abcde","accessToken":"thing-token"}"#)
        .create_async()
        .await;
    let _state = server
        .mock(
            "GET",
            "/thing-if/apps/app-1/targets/thing:th.01234-abcde/states",
        )
        .with_status(200)
        .with_body(r#"{"AirConditionerAlias":{"power":true}}"#)
        .create_async()
        .await;

    let mut api = ThingIfApi::new(author(&server), TypedId::user("u-1").unwrap());
    assert_eq!(api.get_state().await.unwrap_err().name(), "IllegalStateError");

    let request = thingif_domain::onboarding::OnboardWithVendorThingIdRequest::new(
        "vid-1",
        "pass",
        api.owner().clone(),
    );
    api.onboard_with_vendor_thing_id(&request).await.unwrap();
    let state = api.get_state().await.unwrap();

    assert_eq!(state["AirConditionerAlias"]["power"], json!(true));
}
