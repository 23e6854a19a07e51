//! Typed identifiers (`"<kind>:<id>"`) for users, groups and things.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArgumentError;

/// The kind of principal a [`TypedId`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedIdKind {
    User,
    Group,
    Thing,
}

impl TypedIdKind {
    /// Lowercase wire name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Thing => "thing",
        }
    }
}

impl fmt::Display for TypedIdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypedIdKind {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "group" => Ok(Self::Group),
            "thing" => Ok(Self::Thing),
            other => Err(ArgumentError::Invalid {
                field: "typed id",
                reason: format!("unknown kind `{other}`"),
            }),
        }
    }
}

/// Identifier of a user, group or thing, serialized as `"<kind>:<id>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypedId {
    kind: TypedIdKind,
    id: String,
}

impl TypedId {
    /// Build a typed id from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when `id` is empty.
    pub fn new(kind: TypedIdKind, id: impl Into<String>) -> Result<Self, ArgumentError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ArgumentError::Missing("id"));
        }
        Ok(Self { kind, id })
    }

    /// Shorthand for a `thing:<id>` identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when `id` is empty.
    pub fn thing(id: impl Into<String>) -> Result<Self, ArgumentError> {
        Self::new(TypedIdKind::Thing, id)
    }

    /// Shorthand for a `user:<id>` identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when `id` is empty.
    pub fn user(id: impl Into<String>) -> Result<Self, ArgumentError> {
        Self::new(TypedIdKind::User, id)
    }

    /// Shorthand for a `group:<id>` identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when `id` is empty.
    pub fn group(id: impl Into<String>) -> Result<Self, ArgumentError> {
        Self::new(TypedIdKind::Group, id)
    }

    #[must_use]
    pub fn kind(&self) -> TypedIdKind {
        self.kind
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for TypedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for TypedId {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s.split_once(':').ok_or_else(|| ArgumentError::Invalid {
            field: "typed id",
            reason: format!("`{s}` is not of the form <kind>:<id>"),
        })?;
        Self::new(kind.parse()?, id)
    }
}

impl TryFrom<String> for TypedId {
    type Error = ArgumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypedId> for String {
    fn from(value: TypedId) -> Self {
        value.to_string()
    }
}
