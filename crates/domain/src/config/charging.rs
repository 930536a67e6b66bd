//! Charging detection rules.

use serde::{Deserialize, Serialize};

use crate::entity::AttributeValue;
use crate::util::OneOrMany;

/// An attribute whose presence (or value) signals charging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingAttribute {
    pub name: String,
    /// Expected value. When absent, presence of the attribute is enough.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
}

impl ChargingAttribute {
    #[must_use]
    pub fn present(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn equals(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// How a row decides whether its battery is charging, and how it looks when it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargingStateConfig {
    /// Inspect this entity instead of the row's own one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<OneOrMany<ChargingAttribute>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_info_text: Option<String>,
}

impl ChargingStateConfig {
    /// Candidate attributes, in priority order.
    #[must_use]
    pub fn attributes(&self) -> &[ChargingAttribute] {
        match &self.attribute {
            Some(attributes) => attributes.as_slice(),
            None => &[],
        }
    }

    /// States that mean "charging".
    #[must_use]
    pub fn states(&self) -> &[String] {
        match &self.state {
            Some(states) => states.as_slice(),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_single_attribute_object() {
        let config: ChargingStateConfig = serde_json::from_value(serde_json::json!({
            "attribute": { "name": "charging", "value": "true" }
        }))
        .unwrap();
        assert_eq!(
            config.attributes(),
            [ChargingAttribute::equals("charging", "true")]
        );
    }

    #[test]
    fn should_accept_attribute_list_without_values() {
        let config: ChargingStateConfig = serde_json::from_value(serde_json::json!({
            "attribute": [{ "name": "is_charging" }, { "name": "plugged", "value": true }]
        }))
        .unwrap();
        let attributes = config.attributes();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0], ChargingAttribute::present("is_charging"));
        assert_eq!(attributes[1].value, Some(AttributeValue::Bool(true)));
    }

    #[test]
    fn should_accept_single_state_string() {
        let config: ChargingStateConfig =
            serde_json::from_value(serde_json::json!({ "state": "charging" })).unwrap();
        assert_eq!(config.states(), ["charging".to_string()]);
    }

    #[test]
    fn should_report_no_rules_when_empty() {
        let config = ChargingStateConfig::default();
        assert!(config.attributes().is_empty());
        assert!(config.states().is_empty());
    }
}
