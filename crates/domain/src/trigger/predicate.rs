//! Predicate — when a trigger fires.

use serde::{Deserialize, Serialize};

use crate::clause::TriggerClause;
use crate::time::Timestamp;

/// How a state condition turns into firings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggersWhen {
    /// Every state update for which the condition holds.
    ConditionTrue,
    /// Only when the condition goes from false to true.
    ConditionFalseToTrue,
    /// Whenever the result of the condition changes.
    ConditionChanged,
}

/// Wrapper around the clause tree of a state predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition {
    pub clause: TriggerClause,
}

impl Condition {
    #[must_use]
    pub fn new(clause: TriggerClause) -> Self {
        Self { clause }
    }
}

/// The firing rule of a trigger, discriminated by `eventSource`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventSource", rename_all_fields = "camelCase")]
pub enum Predicate {
    /// Fires on state updates matching `condition`.
    #[serde(rename = "STATES")]
    State {
        condition: Condition,
        triggers_when: TriggersWhen,
    },
    /// Fires on a cron schedule, e.g. `"0 8 * * *"`.
    #[serde(rename = "SCHEDULE")]
    Schedule { schedule: String },
    /// Fires once at `schedule_at`.
    #[serde(rename = "SCHEDULE_ONCE")]
    ScheduleOnce {
        #[serde(with = "chrono::serde::ts_milliseconds")]
        schedule_at: Timestamp,
    },
}

impl Predicate {
    #[must_use]
    pub fn state(condition: Condition, triggers_when: TriggersWhen) -> Self {
        Self::State {
            condition,
            triggers_when,
        }
    }

    #[must_use]
    pub fn schedule(cron: impl Into<String>) -> Self {
        Self::Schedule {
            schedule: cron.into(),
        }
    }

    #[must_use]
    pub fn schedule_once(at: Timestamp) -> Self {
        Self::ScheduleOnce { schedule_at: at }
    }

    /// Wire name of the event source.
    #[must_use]
    pub fn event_source(&self) -> &'static str {
        match self {
            Self::State { .. } => "STATES",
            Self::Schedule { .. } => "SCHEDULE",
            Self::ScheduleOnce { .. } => "SCHEDULE_ONCE",
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::State { triggers_when, .. } => write!(f, "states({triggers_when:?})"),
            Self::Schedule { schedule } => write!(f, "schedule({schedule})"),
            Self::ScheduleOnce { schedule_at } => write!(f, "schedule_once({schedule_at})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_serialize_state_predicate() {
        let p = Predicate::state(
            Condition::new(TriggerClause::equals("power", "false")),
            TriggersWhen::ConditionChanged,
        );
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({
                "eventSource": "STATES",
                "condition": {"type": "eq", "field": "power", "value": "false"},
                "triggersWhen": "CONDITION_CHANGED"
            })
        );
    }

    #[test]
    fn should_serialize_schedule_predicate() {
        let p = Predicate::schedule("0 8 * * *");
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"eventSource": "SCHEDULE", "schedule": "0 8 * * *"})
        );
    }

    #[test]
    fn should_serialize_schedule_once_as_epoch_millis() {
        let at = crate::time::from_millis(1_700_000_000_000).unwrap();
        let p = Predicate::schedule_once(at);
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"eventSource": "SCHEDULE_ONCE", "scheduleAt": 1_700_000_000_000_i64})
        );
    }

    #[test]
    fn should_roundtrip_predicates_through_serde_json() {
        let predicates = vec![
            Predicate::state(
                Condition::new(TriggerClause::and(vec![
                    TriggerClause::equals("power", true),
                    TriggerClause::greater_than("temperature", 30),
                ])),
                TriggersWhen::ConditionFalseToTrue,
            ),
            Predicate::schedule("*/5 * * * *"),
            Predicate::schedule_once(crate::time::from_millis(42_000).unwrap()),
        ];
        for p in &predicates {
            let json = serde_json::to_string(p).unwrap();
            let parsed: Predicate = serde_json::from_str(&json).unwrap();
            assert_eq!(&parsed, p);
        }
    }

    #[test]
    fn should_reject_unknown_event_source() {
        let result: Result<Predicate, _> =
            serde_json::from_value(json!({"eventSource": "WEATHER"}));
        assert!(result.is_err());
    }

    #[test]
    fn should_display_predicate_variants() {
        assert_eq!(Predicate::schedule("0 8 * * *").to_string(), "schedule(0 8 * * *)");
        assert_eq!(Predicate::schedule("x").event_source(), "SCHEDULE");
    }
}
