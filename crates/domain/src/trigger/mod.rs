//! Trigger — a stored rule that issues a command or runs server code when
//! its [`Predicate`] is met.
//!
//! A trigger carries exactly one action. On the wire this is expressed by
//! `triggersWhat` plus either a `command` or a `serverCode` member; here it
//! is the [`TriggerAction`] enum, so the "exactly one" invariant holds by
//! construction and is checked when decoding.

mod predicate;
mod request;
mod server_code;

pub use predicate::{Condition, Predicate, TriggersWhen};
pub use request::{
    CommandTriggerRequest, PatchCommandTriggerRequest, PatchServerCodeTriggerRequest,
    ServerCodeTriggerRequest, TriggerOptions,
};
pub use server_code::{ServerCode, ServerCodeError, ServerCodeErrorDetails, ServerCodeResult};

use serde::{Deserialize, Serialize};

use crate::command::AliasAction;
use crate::error::{ArgumentError, DecodeError};
use crate::id::TypedId;

/// What a trigger does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggersWhat {
    Command,
    ServerCode,
}

/// The command template issued each time a command trigger fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerCommand {
    /// Target of the fired command; the trigger's own target when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TypedId>,
    pub issuer: TypedId,
    #[serde(rename = "actions")]
    pub alias_actions: Vec<AliasAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TriggerCommand {
    #[must_use]
    pub fn new(issuer: TypedId, alias_actions: Vec<AliasAction>) -> Self {
        Self {
            target: None,
            issuer,
            alias_actions,
            schema: None,
            schema_version: None,
            title: None,
            description: None,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: TypedId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>, version: u32) -> Self {
        self.schema = Some(schema.into());
        self.schema_version = Some(version);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when `alias_actions` is empty.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if self.alias_actions.is_empty() {
            return Err(ArgumentError::Missing("command.alias_actions"));
        }
        Ok(())
    }
}

/// The single action of a trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerAction {
    Command(TriggerCommand),
    ServerCode(ServerCode),
}

impl TriggerAction {
    #[must_use]
    pub fn triggers_what(&self) -> TriggersWhat {
        match self {
            Self::Command(_) => TriggersWhat::Command,
            Self::ServerCode(_) => TriggersWhat::ServerCode,
        }
    }
}

/// A trigger as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireTrigger", into = "WireTrigger")]
pub struct Trigger {
    pub trigger_id: String,
    pub predicate: Predicate,
    pub action: TriggerAction,
    pub disabled: bool,
    pub disabled_reason: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Trigger {
    /// The command template, for command triggers.
    #[must_use]
    pub fn command(&self) -> Option<&TriggerCommand> {
        match &self.action {
            TriggerAction::Command(c) => Some(c),
            TriggerAction::ServerCode(_) => None,
        }
    }

    /// The server code, for server-code triggers.
    #[must_use]
    pub fn server_code(&self) -> Option<&ServerCode> {
        match &self.action {
            TriggerAction::ServerCode(s) => Some(s),
            TriggerAction::Command(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTrigger {
    #[serde(rename = "triggerID")]
    trigger_id: String,
    predicate: Predicate,
    #[serde(default)]
    triggers_what: Option<TriggersWhat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    command: Option<TriggerCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    server_code: Option<ServerCode>,
    #[serde(default)]
    disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    disabled_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TryFrom<WireTrigger> for Trigger {
    type Error = DecodeError;

    fn try_from(wire: WireTrigger) -> Result<Self, Self::Error> {
        let action = match (wire.triggers_what, wire.command, wire.server_code) {
            (Some(TriggersWhat::Command) | None, Some(command), None) => {
                TriggerAction::Command(command)
            }
            (Some(TriggersWhat::ServerCode) | None, None, Some(server_code)) => {
                TriggerAction::ServerCode(server_code)
            }
            (_, None, None) => {
                return Err(DecodeError::Shape("trigger has neither command nor serverCode"));
            }
            (_, Some(_), Some(_)) => {
                return Err(DecodeError::Shape("trigger has both command and serverCode"));
            }
            _ => {
                return Err(DecodeError::Shape("triggersWhat does not match the trigger action"));
            }
        };
        Ok(Self {
            trigger_id: wire.trigger_id,
            predicate: wire.predicate,
            action,
            disabled: wire.disabled,
            disabled_reason: wire.disabled_reason,
            title: wire.title,
            description: wire.description,
            metadata: wire.metadata,
        })
    }
}

impl From<Trigger> for WireTrigger {
    fn from(trigger: Trigger) -> Self {
        let triggers_what = Some(trigger.action.triggers_what());
        let (command, server_code) = match trigger.action {
            TriggerAction::Command(c) => (Some(c), None),
            TriggerAction::ServerCode(s) => (None, Some(s)),
        };
        Self {
            trigger_id: trigger.trigger_id,
            predicate: trigger.predicate,
            triggers_what,
            command,
            server_code,
            disabled: trigger.disabled,
            disabled_reason: trigger.disabled_reason,
            title: trigger.title,
            description: trigger.description,
            metadata: trigger.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command_trigger_json() -> serde_json::Value {
        json!({
            "triggerID": "t-1",
            "predicate": {
                "eventSource": "STATES",
                "condition": {"type": "eq", "field": "power", "value": "false"},
                "triggersWhen": "CONDITION_CHANGED"
            },
            "triggersWhat": "COMMAND",
            "command": {
                "schema": "AirConditioner",
                "schemaVersion": 1,
                "target": "thing:th.01234-abcde",
                "issuer": "user:u-1",
                "actions": [{"AirConditionerAlias": [{"turnPower": true}]}]
            },
            "disabled": false
        })
    }

    #[test]
    fn should_decode_command_trigger() {
        let trigger: Trigger = serde_json::from_value(command_trigger_json()).unwrap();
        assert_eq!(trigger.trigger_id, "t-1");
        assert!(!trigger.disabled);
        let command = trigger.command().unwrap();
        assert_eq!(command.schema.as_deref(), Some("AirConditioner"));
        assert_eq!(
            command.target.as_ref().map(ToString::to_string).as_deref(),
            Some("thing:th.01234-abcde")
        );
        assert!(trigger.server_code().is_none());
        assert!(matches!(
            trigger.predicate,
            Predicate::State {
                triggers_when: TriggersWhen::ConditionChanged,
                ..
            }
        ));
    }

    #[test]
    fn should_decode_server_code_trigger() {
        let trigger: Trigger = serde_json::from_value(json!({
            "triggerID": "t-2",
            "predicate": {"eventSource": "SCHEDULE", "schedule": "0 8 * * *"},
            "triggersWhat": "SERVER_CODE",
            "serverCode": {"endpoint": "my_function"},
            "disabled": true,
            "disabledReason": "COMMAND_EXECUTION_FAILED"
        }))
        .unwrap();
        assert!(trigger.disabled);
        assert_eq!(trigger.disabled_reason.as_deref(), Some("COMMAND_EXECUTION_FAILED"));
        assert_eq!(trigger.server_code().unwrap().endpoint, "my_function");
    }

    #[test]
    fn should_reject_trigger_without_action() {
        let mut value = command_trigger_json();
        value.as_object_mut().unwrap().remove("command");
        assert!(serde_json::from_value::<Trigger>(value).is_err());
    }

    #[test]
    fn should_reject_trigger_with_both_actions() {
        let mut value = command_trigger_json();
        value["serverCode"] = json!({"endpoint": "f"});
        assert!(serde_json::from_value::<Trigger>(value).is_err());
    }

    #[test]
    fn should_reject_trigger_whose_triggers_what_disagrees() {
        let mut value = command_trigger_json();
        value["triggersWhat"] = json!("SERVER_CODE");
        assert!(serde_json::from_value::<Trigger>(value).is_err());
    }

    #[test]
    fn should_default_disabled_to_false() {
        let mut value = command_trigger_json();
        value.as_object_mut().unwrap().remove("disabled");
        let trigger: Trigger = serde_json::from_value(value).unwrap();
        assert!(!trigger.disabled);
    }

    #[test]
    fn should_roundtrip_trigger_through_serde_json() {
        let trigger: Trigger = serde_json::from_value(command_trigger_json()).unwrap();
        let json = serde_json::to_value(&trigger).unwrap();
        assert_eq!(json["triggersWhat"], "COMMAND");
        let parsed: Trigger = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, trigger);
    }
}
