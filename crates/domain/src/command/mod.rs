//! Command — a set of aliased actions sent to a target thing.
//!
//! A command is issued by a user (or fired by a trigger), delivered to the
//! target, and later carries the per-action results reported back.

mod alias_action;
mod request;

pub use alias_action::{Action, ActionResult, AliasAction, AliasActionResult};
pub use request::{PostCommandRequest, PostCommandRequestBuilder};

use serde::{Deserialize, Serialize};

use crate::id::TypedId;
use crate::time::Timestamp;

/// Delivery state of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandState {
    Sending,
    SendFailed,
    Incomplete,
    Done,
}

impl std::fmt::Display for CommandState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Sending => "SENDING",
            Self::SendFailed => "SEND_FAILED",
            Self::Incomplete => "INCOMPLETE",
            Self::Done => "DONE",
        })
    }
}

/// A command as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    #[serde(rename = "commandID")]
    pub command_id: String,
    pub target: TypedId,
    pub issuer: TypedId,
    #[serde(rename = "actions")]
    pub alias_actions: Vec<AliasAction>,
    #[serde(
        rename = "actionResults",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub alias_action_results: Option<Vec<AliasActionResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_state: Option<CommandState>,
    #[serde(
        rename = "firedByTriggerID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fired_by_trigger_id: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<Timestamp>,
    #[serde(
        rename = "modifiedAt",
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Command {
    /// Results reported for `alias`, if the thing has answered.
    #[must_use]
    pub fn results_for(&self, alias: &str) -> Option<&AliasActionResult> {
        self.alias_action_results
            .as_ref()?
            .iter()
            .find(|r| r.alias == alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command_json() -> serde_json::Value {
        json!({
            "commandID": "c-1",
            "target": "thing:th.01234-abcde",
            "issuer": "user:u-1",
            "actions": [{"AirConditionerAlias": [{"turnPower": true}]}],
            "actionResults": [{"AirConditionerAlias": [{"turnPower": {"succeeded": true}}]}],
            "commandState": "DONE",
            "firedByTriggerID": "t-1",
            "createdAt": 1_456_456_456_000_i64,
            "modifiedAt": 1_456_456_457_000_i64,
            "title": "power on",
            "metadata": {"k": "v"}
        })
    }

    #[test]
    fn should_map_wire_fields_to_command() {
        let cmd: Command = serde_json::from_value(command_json()).unwrap();
        assert_eq!(cmd.command_id, "c-1");
        assert_eq!(cmd.target.to_string(), "thing:th.01234-abcde");
        assert_eq!(cmd.issuer.to_string(), "user:u-1");
        assert_eq!(cmd.command_state, Some(CommandState::Done));
        assert_eq!(cmd.fired_by_trigger_id.as_deref(), Some("t-1"));
        assert_eq!(
            cmd.created.map(|t| t.timestamp_millis()),
            Some(1_456_456_456_000)
        );
        assert_eq!(
            cmd.modified.map(|t| t.timestamp_millis()),
            Some(1_456_456_457_000)
        );
        assert_eq!(cmd.title.as_deref(), Some("power on"));
        assert!(cmd.description.is_none());
        assert!(cmd.results_for("AirConditionerAlias").is_some());
        assert!(cmd.results_for("Other").is_none());
    }

    #[test]
    fn should_accept_minimal_command() {
        let cmd: Command = serde_json::from_value(json!({
            "commandID": "c-2",
            "target": "thing:th.1",
            "issuer": "user:u-1",
            "actions": []
        }))
        .unwrap();
        assert!(cmd.alias_action_results.is_none());
        assert!(cmd.command_state.is_none());
        assert!(cmd.created.is_none());
    }

    #[test]
    fn should_reject_command_with_invalid_target() {
        let mut value = command_json();
        value["target"] = json!("th.01234-abcde");
        assert!(serde_json::from_value::<Command>(value).is_err());
    }

    #[test]
    fn should_serialize_command_state_in_screaming_case() {
        assert_eq!(
            serde_json::to_value(CommandState::SendFailed).unwrap(),
            json!("SEND_FAILED")
        );
        assert_eq!(CommandState::Incomplete.to_string(), "INCOMPLETE");
    }
}
