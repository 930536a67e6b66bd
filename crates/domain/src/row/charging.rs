//! Charging detection.

use crate::config::ChargingStateConfig;
use crate::diagnostics::Diagnostics;
use crate::entity::{EntitySnapshot, EntityTable};

/// Decide whether the battery of `entity` is charging.
///
/// Rules are tried in order: configured attributes, configured states,
/// then the truthiness of the inspected entity's state. Without a
/// `charging_state` config the answer is always `false`.
pub fn resolve_charging(
    table: &EntityTable,
    entity: &EntitySnapshot,
    config: Option<&ChargingStateConfig>,
    diagnostics: &dyn Diagnostics,
) -> bool {
    let Some(config) = config else {
        return false;
    };

    let target = match &config.entity_id {
        Some(entity_id) => match table.get(entity_id) {
            Some(found) => found,
            None => {
                diagnostics.warn(
                    &entity.entity_id,
                    &format!("charging_state entity id ({entity_id}) not found"),
                );
                return false;
            }
        },
        None => entity,
    };

    // A `null` attribute still counts as present; only a missing key skips
    // to the next candidate.
    if config.attribute.is_some() {
        return config
            .attributes()
            .iter()
            .find_map(|candidate| {
                target
                    .attributes
                    .get(&candidate.name)
                    .map(|actual| match &candidate.value {
                        Some(expected) => actual.text_eq(expected),
                        None => true,
                    })
            })
            .unwrap_or(false);
    }

    if config.state.is_some() {
        return config
            .states()
            .iter()
            .any(|state| target.state.as_deref() == Some(state.as_str()));
    }

    // Any non-empty state counts, "off" included.
    target.state.as_deref().is_some_and(|state| !state.is_empty())
}
