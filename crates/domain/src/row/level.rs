//! Level resolution: turns raw entity data into the level text of a row.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{RowConfig, StateMapping};
use crate::diagnostics::Diagnostics;
use crate::entity::{AttributeValue, EntitySnapshot};
use crate::util::{capitalize_first, format_number, is_numeric, parse_number};

/// Attributes consulted, in order, before falling back to the state.
const LEVEL_ATTRIBUTES: &[&str] = &["battery_level", "battery"];

static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{1,3})\s?%").expect("regex for percentage extraction"));

/// Resolve the level text for `entity`.
///
/// The result is either numeric text or a status word with its first
/// letter capitalized. Missing data degrades to `unknown`.
pub fn resolve_level(
    entity: &EntitySnapshot,
    config: &RowConfig,
    unknown: &str,
    diagnostics: &dyn Diagnostics,
) -> String {
    let mut level = raw_level(entity, config, unknown, diagnostics);

    if let Some(state_map) = &config.state_map {
        level = map_state(&config.entity, level, state_map, diagnostics);
    }

    if !is_numeric(&level) {
        if let Some(digits) = extract_percentage(&level) {
            level = digits;
        }
    }

    if let Some(multiplier) = config.multiplier {
        if let Some(value) = parse_number(&level) {
            level = format_number(value * multiplier);
        }
    }

    if let Some(value_override) = &config.value_override {
        level = value_override.as_text().unwrap_or_default();
    }

    if is_numeric(&level) {
        level
    } else {
        capitalize_first(&level)
    }
}

fn raw_level(
    entity: &EntitySnapshot,
    config: &RowConfig,
    unknown: &str,
    diagnostics: &dyn Diagnostics,
) -> String {
    if let Some(attribute) = &config.attribute {
        return match entity.get_attribute(attribute).and_then(AttributeValue::as_text) {
            Some(value) => value,
            None => {
                diagnostics.warn(
                    &config.entity,
                    &format!(
                        "attribute \"{attribute}\" doesn't exist on \"{}\" entity",
                        entity.entity_id
                    ),
                );
                unknown.to_string()
            }
        };
    }

    LEVEL_ATTRIBUTES
        .iter()
        .find_map(|name| entity.get_attribute(name).and_then(AttributeValue::as_text))
        .or_else(|| entity.state.clone())
        .unwrap_or_else(|| unknown.to_string())
}

fn map_state(
    entity_id: &str,
    level: String,
    state_map: &[StateMapping],
    diagnostics: &dyn Diagnostics,
) -> String {
    let current = AttributeValue::from(level.as_str());
    match state_map.iter().find(|entry| entry.from.text_eq(&current)) {
        Some(entry) => entry.to.as_text().unwrap_or_default(),
        None => {
            diagnostics.warn(entity_id, &format!("missing option for \"{level}\" in state_map"));
            level
        }
    }
}

fn extract_percentage(text: &str) -> Option<String> {
    PERCENTAGE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|digits| digits.as_str().to_string())
}
