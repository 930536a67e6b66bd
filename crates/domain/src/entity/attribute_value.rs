//! Typed attribute values attached to entities.

use serde::{Deserialize, Serialize};

use crate::util::format_number;

/// A single typed attribute value.
///
/// Also used wherever the configuration accepts a free-form scalar
/// (`state_map` entries, expected charging attribute values).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Json(serde_json::Value),
}

impl AttributeValue {
    /// Whether the value carries anything (`null` counts as absent).
    #[must_use]
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Null | Self::Json(serde_json::Value::Null))
    }

    /// Text form used for comparisons and display, `None` for `null`.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null | Self::Json(serde_json::Value::Null) => None,
            Self::Bool(value) => Some(value.to_string()),
            Self::Int(value) => Some(value.to_string()),
            Self::Float(value) => Some(format_number(*value)),
            Self::String(value) => Some(value.clone()),
            Self::Json(serde_json::Value::String(value)) => Some(value.clone()),
            Self::Json(value) => Some(value.to_string()),
        }
    }

    /// Compare two values by their text form, so `"100"` matches `100`.
    #[must_use]
    pub fn text_eq(&self, other: &Self) -> bool {
        match (self.as_text(), other.as_text()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
