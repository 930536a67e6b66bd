//! Icon selection.

use crate::config::RowConfig;

/// Icon shown when the level is not a percentage.
pub const UNKNOWN_ICON: &str = "mdi:battery-unknown";

/// Pick the icon for a row.
#[must_use]
pub fn select_icon(level: Option<f64>, is_charging: bool, config: &RowConfig) -> String {
    if is_charging {
        if let Some(icon) = config.charging_state.as_ref().and_then(|c| c.icon.as_ref()) {
            return icon.clone();
        }
    }

    if let Some(icon) = &config.icon {
        return icon.clone();
    }

    match level {
        Some(level) if (0.0..=100.0).contains(&level) => battery_icon(level, is_charging),
        _ => UNKNOWN_ICON.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn battery_icon(level: f64, is_charging: bool) -> String {
    let decile = ((level / 10.0).round() * 10.0) as u8;
    match (decile, is_charging) {
        (0, false) => "mdi:battery-outline".to_string(),
        (0, true) => "mdi:battery-charging-outline".to_string(),
        (100, false) => "mdi:battery".to_string(),
        (100, true) => "mdi:battery-charging-100".to_string(),
        (step, false) => format!("mdi:battery-{step}"),
        (step, true) => format!("mdi:battery-charging-{step}"),
    }
}
