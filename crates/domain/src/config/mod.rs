//! Row and card configuration as written by the user.
//!
//! Configurations are validated once when assigned and treated as
//! immutable afterwards. Their canonical JSON form doubles as a cheap
//! identity for change detection.

mod card;
mod charging;

pub use card::{CardConfig, SortOrder};
pub use charging::{ChargingAttribute, ChargingStateConfig};

use serde::{Deserialize, Serialize};

use crate::entity::AttributeValue;
use crate::error::{CardError, ValidationError};

/// One `{from, to}` entry of a `state_map`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMapping {
    pub from: AttributeValue,
    pub to: AttributeValue,
}

/// One step of a color threshold table: levels up to `value` get `color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorThreshold {
    pub value: f64,
    pub color: String,
}

impl ColorThreshold {
    #[must_use]
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }

    /// Threshold table used when none is configured.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(20.0, "var(--label-badge-red)"),
            Self::new(55.0, "var(--label-badge-yellow)"),
            Self::new(100.0, "var(--label-badge-green)"),
        ]
    }
}

/// Configuration of a single battery row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowConfig {
    /// Entity id the row reads its level from.
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Attribute holding the level, instead of the built-in lookup chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_map: Option<Vec<StateMapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    /// Replaces the resolved level unconditionally, even when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_override: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_gradient: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_thresholds: Option<Vec<ColorThreshold>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_state: Option<ChargingStateConfig>,
    /// `"charging"`, or the name of a field/attribute to show under the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_info: Option<String>,
}

impl RowConfig {
    /// Create a builder for constructing a [`RowConfig`].
    #[must_use]
    pub fn builder() -> RowConfigBuilder {
        RowConfigBuilder::default()
    }

    /// Check configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Validation`] when `entity` is missing or blank.
    pub fn validate(&self) -> Result<(), CardError> {
        if self.entity.trim().is_empty() {
            return Err(ValidationError::MissingEntity.into());
        }
        Ok(())
    }

    /// Canonical serialized form used to detect configuration changes.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Serialize`] if a value cannot be represented as JSON.
    pub fn fingerprint(&self) -> Result<String, CardError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Threshold table in effect for this row.
    #[must_use]
    pub fn thresholds(&self) -> Vec<ColorThreshold> {
        self.color_thresholds
            .clone()
            .unwrap_or_else(ColorThreshold::defaults)
    }
}

/// Step-by-step builder for [`RowConfig`].
#[derive(Debug, Default)]
pub struct RowConfigBuilder {
    config: RowConfig,
}

impl RowConfigBuilder {
    #[must_use]
    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.config.entity = entity.into();
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.config.attribute = Some(attribute.into());
        self
    }

    /// Append a `state_map` entry.
    #[must_use]
    pub fn state_map(
        mut self,
        from: impl Into<AttributeValue>,
        to: impl Into<AttributeValue>,
    ) -> Self {
        self.config
            .state_map
            .get_or_insert_with(Vec::new)
            .push(StateMapping {
                from: from.into(),
                to: to.into(),
            });
        self
    }

    #[must_use]
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.config.multiplier = Some(multiplier);
        self
    }

    #[must_use]
    pub fn value_override(mut self, value: impl Into<AttributeValue>) -> Self {
        self.config.value_override = Some(value.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.config.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.config.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn color_gradient<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.color_gradient = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    /// Append a threshold to the color table.
    #[must_use]
    pub fn color_threshold(mut self, value: f64, color: impl Into<String>) -> Self {
        self.config
            .color_thresholds
            .get_or_insert_with(Vec::new)
            .push(ColorThreshold::new(value, color));
        self
    }

    #[must_use]
    pub fn charging_state(mut self, charging_state: ChargingStateConfig) -> Self {
        self.config.charging_state = Some(charging_state);
        self
    }

    #[must_use]
    pub fn secondary_info(mut self, secondary_info: impl Into<String>) -> Self {
        self.config.secondary_info = Some(secondary_info.into());
        self
    }

    /// Consume the builder, validate, and return a [`RowConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Validation`] if `entity` is missing.
    pub fn build(self) -> Result<RowConfig, CardError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
