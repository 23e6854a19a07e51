//! Aliased actions and their results.
//!
//! On the wire every item is a single-key object: an action is
//! `{"<name>": <value>}`, an aliased action `{"<alias>": [<action>, ..]}`,
//! and a result `{"<name>": {"succeeded": .., "errorMessage": .., "data": ..}}`.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Take the single `(key, value)` pair out of a one-entry object.
fn single_entry<E: serde::de::Error>(
    map: Map<String, Value>,
    what: &str,
) -> Result<(String, Value), E> {
    if map.len() != 1 {
        return Err(E::custom(format!(
            "{what} must have exactly one key, found {}",
            map.len()
        )));
    }
    map.into_iter()
        .next()
        .ok_or_else(|| E::custom(format!("{what} is empty")))
}

/// A single device action, e.g. `turnPower: true`.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: String,
    pub value: Value,
}

impl Action {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (name, value) = single_entry::<D::Error>(Map::deserialize(deserializer)?, "action")?;
        Ok(Self { name, value })
    }
}

/// A group of actions addressed to one alias (trait instance) of a thing.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasAction {
    pub alias: String,
    pub actions: Vec<Action>,
}

impl AliasAction {
    #[must_use]
    pub fn new(alias: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            alias: alias.into(),
            actions,
        }
    }
}

impl Serialize for AliasAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.alias, &self.actions)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for AliasAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (alias, actions) =
            single_entry::<D::Error>(Map::deserialize(deserializer)?, "alias action")?;
        let actions = Vec::<Action>::deserialize(actions).map_err(D::Error::custom)?;
        Ok(Self { alias, actions })
    }
}

/// Outcome of one action as reported by the thing.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub action_name: String,
    pub succeeded: bool,
    pub error_message: Option<String>,
    pub data: Option<Value>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionResultBody {
    succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl Serialize for ActionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = ActionResultBody {
            succeeded: self.succeeded,
            error_message: self.error_message.clone(),
            data: self.data.clone(),
        };
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.action_name, &body)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (action_name, body) =
            single_entry::<D::Error>(Map::deserialize(deserializer)?, "action result")?;
        let body = ActionResultBody::deserialize(body).map_err(D::Error::custom)?;
        Ok(Self {
            action_name,
            succeeded: body.succeeded,
            error_message: body.error_message,
            data: body.data,
        })
    }
}

/// Results for every action sent to one alias.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasActionResult {
    pub alias: String,
    pub results: Vec<ActionResult>,
}

impl Serialize for AliasActionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.alias, &self.results)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for AliasActionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (alias, results) =
            single_entry::<D::Error>(Map::deserialize(deserializer)?, "alias action result")?;
        let results = Vec::<ActionResult>::deserialize(results).map_err(D::Error::custom)?;
        Ok(Self { alias, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_serialize_alias_action_as_single_key_object() {
        let aa = AliasAction::new(
            "AirConditionerAlias",
            vec![Action::new("turnPower", true), Action::new("setPresetTemperature", 25)],
        );
        assert_eq!(
            serde_json::to_value(&aa).unwrap(),
            json!({"AirConditionerAlias": [{"turnPower": true}, {"setPresetTemperature": 25}]})
        );
    }

    #[test]
    fn should_deserialize_alias_action() {
        let aa: AliasAction =
            serde_json::from_value(json!({"HumidityAlias": [{"setPresetHumidity": 45}]})).unwrap();
        assert_eq!(aa.alias, "HumidityAlias");
        assert_eq!(aa.actions, vec![Action::new("setPresetHumidity", 45)]);
    }

    #[test]
    fn should_reject_alias_action_with_two_keys() {
        let result: Result<AliasAction, _> =
            serde_json::from_value(json!({"A": [], "B": []}));
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_alias_action_whose_value_is_not_a_list() {
        let result: Result<AliasAction, _> = serde_json::from_value(json!({"A": {"x": 1}}));
        assert!(result.is_err());
    }

    #[test]
    fn should_deserialize_alias_action_result_with_error() {
        let r: AliasActionResult = serde_json::from_value(json!({
            "AirConditionerAlias": [
                {"turnPower": {"succeeded": true}},
                {"setPresetTemperature": {"succeeded": false, "errorMessage": "out of range"}}
            ]
        }))
        .unwrap();
        assert_eq!(r.alias, "AirConditionerAlias");
        assert_eq!(r.results.len(), 2);
        assert!(r.results[0].succeeded);
        assert_eq!(r.results[1].error_message.as_deref(), Some("out of range"));
    }

    #[test]
    fn should_omit_absent_fields_when_serializing_action_result() {
        let r = ActionResult {
            action_name: "turnPower".into(),
            succeeded: true,
            error_message: None,
            data: None,
        };
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"turnPower": {"succeeded": true}})
        );
    }
}
