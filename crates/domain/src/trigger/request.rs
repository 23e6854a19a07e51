//! Request bodies for creating and patching triggers.

use serde::{Deserialize, Serialize};

use super::{Predicate, ServerCode, TriggerCommand, TriggersWhat};
use crate::error::ArgumentError;
use crate::id::TypedId;

/// Descriptive fields shared by all trigger requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TriggerOptions {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    predicate: Option<&'a Predicate>,
    triggers_what: TriggersWhat,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a TriggerCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    server_code: Option<&'a ServerCode>,
    #[serde(flatten)]
    options: Option<&'a TriggerOptions>,
}

/// Create a trigger that issues `command` whenever `predicate` is met.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandTriggerRequest {
    pub command: TriggerCommand,
    pub predicate: Predicate,
    pub options: Option<TriggerOptions>,
}

impl CommandTriggerRequest {
    #[must_use]
    pub fn new(command: TriggerCommand, predicate: Predicate) -> Self {
        Self {
            command,
            predicate,
            options: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TriggerOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Point the command at `target` unless it already names one.
    #[must_use]
    pub fn with_default_target(mut self, target: &TypedId) -> Self {
        if self.command.target.is_none() {
            self.command.target = Some(target.clone());
        }
        self
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when the command has no actions.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        self.command.validate()
    }
}

impl Serialize for CommandTriggerRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TriggerBody {
            predicate: Some(&self.predicate),
            triggers_what: TriggersWhat::Command,
            command: Some(&self.command),
            server_code: None,
            options: self.options.as_ref(),
        }
        .serialize(serializer)
    }
}

/// Create a trigger that runs `server_code` whenever `predicate` is met.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerCodeTriggerRequest {
    pub server_code: ServerCode,
    pub predicate: Predicate,
    pub options: Option<TriggerOptions>,
}

impl ServerCodeTriggerRequest {
    #[must_use]
    pub fn new(server_code: ServerCode, predicate: Predicate) -> Self {
        Self {
            server_code,
            predicate,
            options: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TriggerOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when the server code has no endpoint.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        self.server_code.validate()
    }
}

impl Serialize for ServerCodeTriggerRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TriggerBody {
            predicate: Some(&self.predicate),
            triggers_what: TriggersWhat::ServerCode,
            command: None,
            server_code: Some(&self.server_code),
            options: self.options.as_ref(),
        }
        .serialize(serializer)
    }
}

/// Partial update of a command trigger. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchCommandTriggerRequest {
    pub command: Option<TriggerCommand>,
    pub predicate: Option<Predicate>,
    pub options: Option<TriggerOptions>,
}

impl PatchCommandTriggerRequest {
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when nothing would be patched, or
    /// when the new command has no actions.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if self.command.is_none() && self.predicate.is_none() && self.options.is_none() {
            return Err(ArgumentError::Missing("command, predicate or options"));
        }
        if let Some(command) = &self.command {
            command.validate()?;
        }
        Ok(())
    }

    /// Point the new command at `target` unless it already names one.
    #[must_use]
    pub fn with_default_target(mut self, target: &TypedId) -> Self {
        if let Some(command) = self.command.as_mut() {
            if command.target.is_none() {
                command.target = Some(target.clone());
            }
        }
        self
    }
}

impl Serialize for PatchCommandTriggerRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TriggerBody {
            predicate: self.predicate.as_ref(),
            triggers_what: TriggersWhat::Command,
            command: self.command.as_ref(),
            server_code: None,
            options: self.options.as_ref(),
        }
        .serialize(serializer)
    }
}

/// Partial update of a server-code trigger. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchServerCodeTriggerRequest {
    pub server_code: Option<ServerCode>,
    pub predicate: Option<Predicate>,
    pub options: Option<TriggerOptions>,
}

impl PatchServerCodeTriggerRequest {
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when nothing would be patched, or
    /// when the new server code has no endpoint.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if self.server_code.is_none() && self.predicate.is_none() && self.options.is_none() {
            return Err(ArgumentError::Missing("server_code, predicate or options"));
        }
        if let Some(server_code) = &self.server_code {
            server_code.validate()?;
        }
        Ok(())
    }
}

impl Serialize for PatchServerCodeTriggerRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TriggerBody {
            predicate: self.predicate.as_ref(),
            triggers_what: TriggersWhat::ServerCode,
            command: None,
            server_code: self.server_code.as_ref(),
            options: self.options.as_ref(),
        }
        .serialize(serializer)
    }
}
