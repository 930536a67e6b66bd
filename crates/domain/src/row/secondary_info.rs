//! Secondary info: the subtitle rendered under the row name.

use crate::config::RowConfig;
use crate::entity::{AttributeValue, EntitySnapshot};
use crate::locale::Localization;
use crate::time::{Timestamp, parse_timestamp, relative_time};

/// `secondary_info` keyword that shows the charging text while charging.
pub const CHARGING_KEYWORD: &str = "charging";

/// Resolve the secondary text for a row, `None` when nothing should render.
#[must_use]
pub fn resolve_secondary_info(
    entity: &EntitySnapshot,
    config: &RowConfig,
    is_charging: bool,
    locale: &Localization,
    now: Timestamp,
) -> Option<String> {
    let key = config.secondary_info.as_deref()?;

    if key == CHARGING_KEYWORD {
        return is_charging.then(|| {
            config
                .charging_state
                .as_ref()
                .and_then(|c| c.secondary_info_text.clone())
                .unwrap_or_else(|| locale.charging.clone())
        });
    }

    let value = entity
        .field(key)
        .map(str::to_string)
        .or_else(|| entity.get_attribute(key).and_then(AttributeValue::as_text))
        .unwrap_or_else(|| key.to_string());

    match parse_timestamp(&value) {
        Some(ts) => Some(relative_time(ts, now)),
        None => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChargingStateConfig;
    use chrono::{TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn entity() -> EntitySnapshot {
        EntitySnapshot::builder()
            .entity_id("sensor.phone")
            .state("80")
            .attribute("battery_state", "discharging")
            .attribute("voltage", 3.7)
            .attribute("last_seen", "2024-05-01T11:58:00Z")
            .last_changed("2024-05-01T09:00:00+00:00")
            .build()
    }

    fn with_secondary(key: &str) -> RowConfig {
        RowConfig::builder()
            .entity("sensor.phone")
            .secondary_info(key)
            .build()
            .unwrap()
    }

    fn resolve(config: &RowConfig, is_charging: bool) -> Option<String> {
        resolve_secondary_info(&entity(), config, is_charging, &Localization::default(), now())
    }

    #[test]
    fn should_render_nothing_when_not_configured() {
        let config = RowConfig::builder().entity("sensor.phone").build().unwrap();
        assert_eq!(resolve(&config, true), None);
    }

    #[test]
    fn should_show_default_charging_text_only_while_charging() {
        let config = with_secondary("charging");
        assert_eq!(resolve(&config, true).as_deref(), Some("Charging"));
        assert_eq!(resolve(&config, false), None);
    }

    #[test]
    fn should_show_configured_charging_text() {
        let config = RowConfig::builder()
            .entity("sensor.phone")
            .secondary_info("charging")
            .charging_state(ChargingStateConfig {
                secondary_info_text: Some("Plugged in".to_string()),
                ..ChargingStateConfig::default()
            })
            .build()
            .unwrap();
        assert_eq!(resolve(&config, true).as_deref(), Some("Plugged in"));
    }

    #[test]
    fn should_format_top_level_timestamp_as_relative_time() {
        let config = with_secondary("last_changed");
        assert_eq!(resolve(&config, false).as_deref(), Some("3 hours ago"));
    }

    #[test]
    fn should_format_attribute_timestamp_as_relative_time() {
        let config = with_secondary("last_seen");
        assert_eq!(resolve(&config, false).as_deref(), Some("2 minutes ago"));
    }

    #[test]
    fn should_return_attribute_value_verbatim() {
        assert_eq!(
            resolve(&with_secondary("battery_state"), false).as_deref(),
            Some("discharging")
        );
        assert_eq!(
            resolve(&with_secondary("voltage"), false).as_deref(),
            Some("3.7")
        );
    }

    #[test]
    fn should_prefer_top_level_field_over_attribute() {
        let entity = EntitySnapshot::builder()
            .entity_id("sensor.phone")
            .state("80")
            .attribute("state", "shadowed")
            .build();
        let value = resolve_secondary_info(
            &entity,
            &with_secondary("state"),
            false,
            &Localization::default(),
            now(),
        );
        assert_eq!(value.as_deref(), Some("80"));
    }

    #[test]
    fn should_treat_unknown_key_as_literal_text() {
        assert_eq!(
            resolve(&with_secondary("Living room"), false).as_deref(),
            Some("Living room")
        );
    }
}
