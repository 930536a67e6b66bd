//! Card configuration: a list of rows plus card-wide defaults.

use serde::{Deserialize, Deserializer, Serialize};

use super::{ChargingStateConfig, ColorThreshold, RowConfig};
use crate::error::{CardError, ValidationError};

/// Ordering applied to rows by numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Configuration of a whole card.
///
/// The `color_*`, `charging_state` and `secondary_info` fields act as
/// defaults for every row that leaves them unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_rows")]
    pub entities: Vec<RowConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_level: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_thresholds: Option<Vec<ColorThreshold>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_gradient: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_state: Option<ChargingStateConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_info: Option<String>,
}

impl CardConfig {
    /// Check configuration invariants for the card and each of its rows.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Validation`] when:
    /// - `entities` is empty ([`ValidationError::NoEntities`])
    /// - a row has no entity ([`ValidationError::MissingEntity`])
    pub fn validate(&self) -> Result<(), CardError> {
        if self.entities.is_empty() {
            return Err(ValidationError::NoEntities.into());
        }
        self.entities.iter().try_for_each(RowConfig::validate)
    }

    /// Row configurations with the card-wide defaults filled in.
    #[must_use]
    pub fn rows(&self) -> Vec<RowConfig> {
        self.entities
            .iter()
            .cloned()
            .map(|mut row| {
                if row.color_thresholds.is_none() {
                    row.color_thresholds.clone_from(&self.color_thresholds);
                }
                if row.color_gradient.is_none() {
                    row.color_gradient.clone_from(&self.color_gradient);
                }
                if row.charging_state.is_none() {
                    row.charging_state.clone_from(&self.charging_state);
                }
                if row.secondary_info.is_none() {
                    row.secondary_info.clone_from(&self.secondary_info);
                }
                row
            })
            .collect()
    }

    /// Canonical serialized form used to detect configuration changes.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Serialize`] if a value cannot be represented as JSON.
    pub fn fingerprint(&self) -> Result<String, CardError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Rows may be written as a bare entity id or as a full object.
fn deserialize_rows<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<RowConfig>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Id(String),
        Row(Box<RowConfig>),
    }

    let entries = Vec::<Entry>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            Entry::Id(entity) => RowConfig {
                entity,
                ..RowConfig::default()
            },
            Entry::Row(row) => *row,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_bare_ids_and_objects() {
        let config: CardConfig = serde_json::from_value(serde_json::json!({
            "title": "Batteries",
            "entities": [
                "sensor.phone",
                { "entity": "sensor.tablet", "name": "Tablet" }
            ]
        }))
        .unwrap();
        assert_eq!(config.entities.len(), 2);
        assert_eq!(config.entities[0].entity, "sensor.phone");
        assert_eq!(config.entities[1].name.as_deref(), Some("Tablet"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_return_validation_error_when_entities_is_empty() {
        let config = CardConfig::default();
        assert!(matches!(
            config.validate(),
            Err(CardError::Validation(ValidationError::NoEntities))
        ));
    }

    #[test]
    fn should_return_validation_error_when_a_row_has_no_entity() {
        let config: CardConfig = serde_json::from_value(serde_json::json!({
            "entities": ["sensor.a", { "name": "nameless" }]
        }))
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(CardError::Validation(ValidationError::MissingEntity))
        ));
    }

    #[test]
    fn should_parse_sort_order() {
        let config: CardConfig = serde_json::from_value(serde_json::json!({
            "entities": ["sensor.a"],
            "sort_by_level": "desc"
        }))
        .unwrap();
        assert_eq!(config.sort_by_level, Some(SortOrder::Desc));
    }

    #[test]
    fn should_apply_card_defaults_to_rows_that_leave_them_unset() {
        let config: CardConfig = serde_json::from_value(serde_json::json!({
            "entities": [
                "sensor.a",
                { "entity": "sensor.b", "secondary_info": "last_changed" }
            ],
            "secondary_info": "charging",
            "color_thresholds": [{ "value": 50, "color": "blue" }]
        }))
        .unwrap();
        let rows = config.rows();
        assert_eq!(rows[0].secondary_info.as_deref(), Some("charging"));
        assert_eq!(rows[1].secondary_info.as_deref(), Some("last_changed"));
        assert_eq!(rows[1].thresholds(), vec![ColorThreshold::new(50.0, "blue")]);
    }
}
