//! Target state and state history.

use serde::{Deserialize, Serialize};

use crate::clause::QueryClause;
use crate::error::ArgumentError;
use crate::time::Timestamp;

/// Error code returned with a 409 when history is not recorded for a target.
pub const STATE_HISTORY_NOT_AVAILABLE: &str = "STATE_HISTORY_NOT_AVAILABLE";

/// Latest state of one alias: a free-form JSON object.
pub type AliasState = serde_json::Map<String, serde_json::Value>;

/// Latest state of a whole target, keyed by alias.
pub type TargetState = serde_json::Map<String, serde_json::Value>;

/// A state snapshot recorded by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    #[serde(rename = "_created", with = "chrono::serde::ts_milliseconds")]
    pub created_at: Timestamp,
    #[serde(flatten)]
    pub state: AliasState,
}

/// Query the recorded states of one alias.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryHistoryStatesRequest {
    pub alias: String,
    pub clause: QueryClause,
    pub firmware_version: Option<String>,
    pub best_effort_limit: Option<u32>,
    pub pagination_key: Option<String>,
}

impl QueryHistoryStatesRequest {
    pub const MEDIA_TYPE: &'static str = "application/vnd.kii.TraitStateQueryRequest+json";

    #[must_use]
    pub fn new(alias: impl Into<String>, clause: QueryClause) -> Self {
        Self {
            alias: alias.into(),
            clause,
            firmware_version: None,
            best_effort_limit: None,
            pagination_key: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.best_effort_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_pagination_key(mut self, key: impl Into<String>) -> Self {
        self.pagination_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_firmware_version(mut self, version: impl Into<String>) -> Self {
        self.firmware_version = Some(version.into());
        self
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when `alias` is empty.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if self.alias.is_empty() {
            return Err(ArgumentError::Missing("alias"));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct QueryBody<'a> {
    clause: &'a QueryClause,
    grouped: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequestBody<'a> {
    query: QueryBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    firmware_version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    best_effort_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination_key: Option<&'a str>,
}

impl Serialize for QueryHistoryStatesRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        QueryRequestBody {
            query: QueryBody {
                clause: &self.clause,
                grouped: false,
            },
            firmware_version: self.firmware_version.as_deref(),
            best_effort_limit: self.best_effort_limit,
            pagination_key: self.pagination_key.as_deref(),
        }
        .serialize(serializer)
    }
}

/// Query the recorded states of one alias, grouped by the target's data
/// grouping interval.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryGroupedHistoryStatesRequest {
    pub alias: String,
    pub clause: QueryClause,
    pub firmware_version: Option<String>,
}

impl QueryGroupedHistoryStatesRequest {
    #[must_use]
    pub fn new(alias: impl Into<String>, clause: QueryClause) -> Self {
        Self {
            alias: alias.into(),
            clause,
            firmware_version: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when `alias` is empty.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if self.alias.is_empty() {
            return Err(ArgumentError::Missing("alias"));
        }
        Ok(())
    }
}

impl Serialize for QueryGroupedHistoryStatesRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        QueryRequestBody {
            query: QueryBody {
                clause: &self.clause,
                grouped: true,
            },
            firmware_version: self.firmware_version.as_deref(),
            best_effort_limit: None,
            pagination_key: None,
        }
        .serialize(serializer)
    }
}

/// Bounds of one history bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub from: Timestamp,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub to: Timestamp,
}

/// States recorded within one [`TimeRange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedHistoryStates {
    pub range: TimeRange,
    pub objects: Vec<HistoryState>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::TriggerClause;
    use serde_json::json;

    #[test]
    fn should_split_created_from_state_fields() {
        let h: HistoryState = serde_json::from_value(json!({
            "_created": 1_000,
            "power": true,
            "temperature": 23
        }))
        .unwrap();
        assert_eq!(h.created_at.timestamp_millis(), 1_000);
        assert_eq!(h.state.get("power"), Some(&json!(true)));
        assert!(!h.state.contains_key("_created"));
    }

    #[test]
    fn should_serialize_history_query_body() {
        let request = QueryHistoryStatesRequest::new("AirConditionerAlias", QueryClause::All)
            .with_limit(5)
            .with_pagination_key("p-1");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": {"clause": {"type": "all"}, "grouped": false},
                "bestEffortLimit": 5,
                "paginationKey": "p-1"
            })
        );
    }

    #[test]
    fn should_serialize_grouped_query_body() {
        let request = QueryGroupedHistoryStatesRequest::new(
            "AirConditionerAlias",
            TriggerClause::equals("power", true).into(),
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": {
                    "clause": {"type": "eq", "field": "power", "value": true},
                    "grouped": true
                }
            })
        );
    }

    #[test]
    fn should_return_argument_error_when_alias_is_empty() {
        let request = QueryHistoryStatesRequest::new("", QueryClause::All);
        assert_eq!(request.validate(), Err(ArgumentError::Missing("alias")));
    }

    #[test]
    fn should_decode_grouped_history_states() {
        let groups: Vec<GroupedHistoryStates> = serde_json::from_value(json!([
            {"range": {"from": 0, "to": 60_000}, "objects": [{"_created": 10, "power": false}]}
        ]))
        .unwrap();
        assert_eq!(groups[0].range.to.timestamp_millis(), 60_000);
        assert_eq!(groups[0].objects.len(), 1);
    }
}
