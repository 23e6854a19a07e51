//! Request body for posting a new command.

use serde::Serialize;

use super::AliasAction;
use crate::error::ArgumentError;
use crate::id::TypedId;

/// Parameters of a new command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommandRequest {
    pub schema: String,
    pub schema_version: u32,
    #[serde(rename = "actions")]
    pub alias_actions: Vec<AliasAction>,
    pub issuer: TypedId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl PostCommandRequest {
    /// Create a builder for constructing a [`PostCommandRequest`].
    #[must_use]
    pub fn builder() -> PostCommandRequestBuilder {
        PostCommandRequestBuilder::default()
    }

    /// Check the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when:
    /// - `schema` is empty
    /// - `schema_version` is zero
    /// - `alias_actions` is empty
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if self.schema.is_empty() {
            return Err(ArgumentError::Missing("schema"));
        }
        if self.schema_version == 0 {
            return Err(ArgumentError::Missing("schema_version"));
        }
        if self.alias_actions.is_empty() {
            return Err(ArgumentError::Missing("alias_actions"));
        }
        Ok(())
    }
}

/// Step-by-step builder for [`PostCommandRequest`].
#[derive(Debug, Default)]
pub struct PostCommandRequestBuilder {
    schema: Option<String>,
    schema_version: Option<u32>,
    alias_actions: Vec<AliasAction>,
    issuer: Option<TypedId>,
    title: Option<String>,
    description: Option<String>,
    metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl PostCommandRequestBuilder {
    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>, version: u32) -> Self {
        self.schema = Some(schema.into());
        self.schema_version = Some(version);
        self
    }

    #[must_use]
    pub fn alias_action(mut self, alias_action: AliasAction) -> Self {
        self.alias_actions.push(alias_action);
        self
    }

    #[must_use]
    pub fn issuer(mut self, issuer: TypedId) -> Self {
        self.issuer = Some(issuer);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn metadata(mut self, metadata: serde_json::Map<String, serde_json::Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Consume the builder, validate, and return a [`PostCommandRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] if a required field is missing or empty.
    pub fn build(self) -> Result<PostCommandRequest, ArgumentError> {
        let request = PostCommandRequest {
            schema: self.schema.unwrap_or_default(),
            schema_version: self.schema_version.unwrap_or_default(),
            alias_actions: self.alias_actions,
            issuer: self.issuer.ok_or(ArgumentError::Missing("issuer"))?,
            title: self.title,
            description: self.description,
            metadata: self.metadata,
        };
        request.validate()?;
        Ok(request)
    }
}
