//! Clauses — the boolean expression trees used by state predicates and
//! state-history queries.
//!
//! Both trees share their leaves ([`EqualsClause`], [`RangeClause`]) and
//! their wire shape: every node is an object with a `type` tag
//! (`eq`, `not`, `and`, `or`, `range`, and `all` for queries). `not` only
//! ever wraps an `eq` node. Unknown tags are decoding errors.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// `field == value`, optionally scoped to an alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqualsClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub field: String,
    pub value: Value,
}

/// Numeric range on `field`. Either bound may be open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_included: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_limit: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_included: Option<bool>,
}

impl RangeClause {
    fn lower(field: String, limit: Number, included: bool) -> Self {
        Self {
            alias: None,
            field,
            upper_limit: None,
            upper_included: None,
            lower_limit: Some(limit),
            lower_included: Some(included),
        }
    }

    fn upper(field: String, limit: Number, included: bool) -> Self {
        Self {
            alias: None,
            field,
            upper_limit: Some(limit),
            upper_included: Some(included),
            lower_limit: None,
            lower_included: None,
        }
    }
}

/// Condition tree evaluated by the server against a target's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireTriggerClause", into = "WireTriggerClause")]
pub enum TriggerClause {
    Equals(EqualsClause),
    NotEquals(EqualsClause),
    And(Vec<TriggerClause>),
    Or(Vec<TriggerClause>),
    Range(RangeClause),
}

impl TriggerClause {
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals(EqualsClause {
            alias: None,
            field: field.into(),
            value: value.into(),
        })
    }

    #[must_use]
    pub fn not_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::NotEquals(EqualsClause {
            alias: None,
            field: field.into(),
            value: value.into(),
        })
    }

    #[must_use]
    pub fn and(clauses: Vec<Self>) -> Self {
        Self::And(clauses)
    }

    #[must_use]
    pub fn or(clauses: Vec<Self>) -> Self {
        Self::Or(clauses)
    }

    /// `field > limit`
    #[must_use]
    pub fn greater_than(field: impl Into<String>, limit: impl Into<Number>) -> Self {
        Self::Range(RangeClause::lower(field.into(), limit.into(), false))
    }

    /// `field >= limit`
    #[must_use]
    pub fn greater_than_or_equal_to(field: impl Into<String>, limit: impl Into<Number>) -> Self {
        Self::Range(RangeClause::lower(field.into(), limit.into(), true))
    }

    /// `field < limit`
    #[must_use]
    pub fn less_than(field: impl Into<String>, limit: impl Into<Number>) -> Self {
        Self::Range(RangeClause::upper(field.into(), limit.into(), false))
    }

    /// `field <= limit`
    #[must_use]
    pub fn less_than_or_equal_to(field: impl Into<String>, limit: impl Into<Number>) -> Self {
        Self::Range(RangeClause::upper(field.into(), limit.into(), true))
    }

    /// Bounded range on both ends.
    #[must_use]
    pub fn range(
        field: impl Into<String>,
        lower: (impl Into<Number>, bool),
        upper: (impl Into<Number>, bool),
    ) -> Self {
        Self::Range(RangeClause {
            alias: None,
            field: field.into(),
            upper_limit: Some(upper.0.into()),
            upper_included: Some(upper.1),
            lower_limit: Some(lower.0.into()),
            lower_included: Some(lower.1),
        })
    }

    /// Scope a leaf clause to `alias`. Composite clauses are returned unchanged.
    #[must_use]
    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        match self {
            Self::Equals(mut c) => {
                c.alias = Some(alias.into());
                Self::Equals(c)
            }
            Self::NotEquals(mut c) => {
                c.alias = Some(alias.into());
                Self::NotEquals(c)
            }
            Self::Range(mut c) => {
                c.alias = Some(alias.into());
                Self::Range(c)
            }
            composite @ (Self::And(_) | Self::Or(_)) => composite,
        }
    }
}

/// Filter tree for state-history queries: a [`TriggerClause`] plus `all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireQueryClause", into = "WireQueryClause")]
pub enum QueryClause {
    All,
    Equals(EqualsClause),
    NotEquals(EqualsClause),
    And(Vec<QueryClause>),
    Or(Vec<QueryClause>),
    Range(RangeClause),
}

impl From<TriggerClause> for QueryClause {
    fn from(clause: TriggerClause) -> Self {
        match clause {
            TriggerClause::Equals(c) => Self::Equals(c),
            TriggerClause::NotEquals(c) => Self::NotEquals(c),
            TriggerClause::And(cs) => Self::And(cs.into_iter().map(Self::from).collect()),
            TriggerClause::Or(cs) => Self::Or(cs.into_iter().map(Self::from).collect()),
            TriggerClause::Range(c) => Self::Range(c),
        }
    }
}

/// The only node `not` may wrap.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum NegatedClause {
    Eq(EqualsClause),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireTriggerClause {
    Eq(EqualsClause),
    Not { clause: NegatedClause },
    And { clauses: Vec<TriggerClause> },
    Or { clauses: Vec<TriggerClause> },
    Range(RangeClause),
}

impl From<WireTriggerClause> for TriggerClause {
    fn from(wire: WireTriggerClause) -> Self {
        match wire {
            WireTriggerClause::Eq(c) => Self::Equals(c),
            WireTriggerClause::Not {
                clause: NegatedClause::Eq(c),
            } => Self::NotEquals(c),
            WireTriggerClause::And { clauses } => Self::And(clauses),
            WireTriggerClause::Or { clauses } => Self::Or(clauses),
            WireTriggerClause::Range(c) => Self::Range(c),
        }
    }
}

impl From<TriggerClause> for WireTriggerClause {
    fn from(clause: TriggerClause) -> Self {
        match clause {
            TriggerClause::Equals(c) => Self::Eq(c),
            TriggerClause::NotEquals(c) => Self::Not {
                clause: NegatedClause::Eq(c),
            },
            TriggerClause::And(clauses) => Self::And { clauses },
            TriggerClause::Or(clauses) => Self::Or { clauses },
            TriggerClause::Range(c) => Self::Range(c),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireQueryClause {
    All,
    Eq(EqualsClause),
    Not { clause: NegatedClause },
    And { clauses: Vec<QueryClause> },
    Or { clauses: Vec<QueryClause> },
    Range(RangeClause),
}

impl From<WireQueryClause> for QueryClause {
    fn from(wire: WireQueryClause) -> Self {
        match wire {
            WireQueryClause::All => Self::All,
            WireQueryClause::Eq(c) => Self::Equals(c),
            WireQueryClause::Not {
                clause: NegatedClause::Eq(c),
            } => Self::NotEquals(c),
            WireQueryClause::And { clauses } => Self::And(clauses),
            WireQueryClause::Or { clauses } => Self::Or(clauses),
            WireQueryClause::Range(c) => Self::Range(c),
        }
    }
}

impl From<QueryClause> for WireQueryClause {
    fn from(clause: QueryClause) -> Self {
        match clause {
            QueryClause::All => Self::All,
            QueryClause::Equals(c) => Self::Eq(c),
            QueryClause::NotEquals(c) => Self::Not {
                clause: NegatedClause::Eq(c),
            },
            QueryClause::And(clauses) => Self::And { clauses },
            QueryClause::Or(clauses) => Self::Or { clauses },
            QueryClause::Range(c) => Self::Range(c),
        }
    }
}
