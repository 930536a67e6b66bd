//! Color selection: charging override, gradient interpolation, or threshold table.

use crate::config::{ColorThreshold, RowConfig};
use crate::diagnostics::Diagnostics;

/// Color used when nothing more specific applies.
pub const DEFAULT_COLOR: &str = "inherit";

/// Pick the display color for a row.
pub fn select_color(
    level: Option<f64>,
    is_charging: bool,
    config: &RowConfig,
    diagnostics: &dyn Diagnostics,
) -> String {
    if is_charging {
        if let Some(color) = config.charging_state.as_ref().and_then(|c| c.color.as_ref()) {
            return color.clone();
        }
    }

    let Some(level) = level.filter(|level| (0.0..=100.0).contains(level)) else {
        return DEFAULT_COLOR.to_string();
    };

    if let Some(gradient) = &config.color_gradient {
        if is_valid_gradient(&config.entity, gradient, diagnostics) {
            if let Some(color) = interpolate(gradient, level) {
                return color;
            }
        }
    }

    threshold_color(&config.thresholds(), level)
}

fn is_valid_gradient(entity_id: &str, gradient: &[String], diagnostics: &dyn Diagnostics) -> bool {
    if gradient.len() < 2 {
        diagnostics.warn(entity_id, "color_gradient needs at least two colors");
        return false;
    }
    if let Some(invalid) = gradient.iter().find(|color| Rgb::from_hex(color).is_none()) {
        diagnostics.warn(entity_id, &format!("invalid color_gradient value: {invalid}"));
        return false;
    }
    true
}

fn threshold_color(thresholds: &[ColorThreshold], level: f64) -> String {
    thresholds
        .iter()
        .find(|threshold| level <= threshold.value)
        .map_or_else(|| DEFAULT_COLOR.to_string(), |threshold| threshold.color.clone())
}

/// Interpolate linearly between the gradient stops surrounding `percentage`.
///
/// Stops are spread evenly over 0–100. A level sitting exactly on a stop
/// returns that stop as configured.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn interpolate(gradient: &[String], percentage: f64) -> Option<String> {
    let position = percentage / 100.0 * (gradient.len() - 1) as f64;
    let index = position.floor() as usize;
    let weight = position - position.floor();

    if weight == 0.0 {
        return gradient.get(index).cloned();
    }

    let lower = Rgb::from_hex(gradient.get(index)?)?;
    let upper = Rgb::from_hex(gradient.get(index + 1)?)?;
    Some(lower.lerp(upper, weight).to_hex())
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    /// Parse a strict `#RRGGBB` string.
    fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChargingStateConfig;
    use crate::diagnostics::testing::RecordingDiagnostics;

    fn color(level: Option<f64>, is_charging: bool, config: &RowConfig) -> String {
        select_color(level, is_charging, config, &RecordingDiagnostics::default())
    }

    fn plain() -> RowConfig {
        RowConfig::builder().entity("sensor.a").build().unwrap()
    }

    fn gradient(colors: &[&str]) -> RowConfig {
        RowConfig::builder()
            .entity("sensor.a")
            .color_gradient(colors.iter().copied())
            .build()
            .unwrap()
    }

    #[test]
    fn should_use_default_thresholds() {
        assert_eq!(color(Some(0.0), false, &plain()), "var(--label-badge-red)");
        assert_eq!(color(Some(20.0), false, &plain()), "var(--label-badge-red)");
        assert_eq!(color(Some(21.0), false, &plain()), "var(--label-badge-yellow)");
        assert_eq!(color(Some(55.0), false, &plain()), "var(--label-badge-yellow)");
        assert_eq!(color(Some(100.0), false, &plain()), "var(--label-badge-green)");
    }

    #[test]
    fn should_use_first_threshold_at_or_above_level() {
        let config = RowConfig::builder()
            .entity("sensor.a")
            .color_threshold(10.0, "red")
            .color_threshold(50.0, "orange")
            .build()
            .unwrap();
        assert_eq!(color(Some(30.0), false, &config), "orange");
        assert_eq!(color(Some(80.0), false, &config), DEFAULT_COLOR);
    }

    #[test]
    fn should_use_default_color_outside_range() {
        assert_eq!(color(Some(150.0), false, &plain()), DEFAULT_COLOR);
        assert_eq!(color(Some(-5.0), false, &plain()), DEFAULT_COLOR);
        assert_eq!(color(None, false, &plain()), DEFAULT_COLOR);
    }

    #[test]
    fn should_prefer_charging_color_while_charging() {
        let config = RowConfig::builder()
            .entity("sensor.a")
            .charging_state(ChargingStateConfig {
                color: Some("blue".to_string()),
                ..ChargingStateConfig::default()
            })
            .build()
            .unwrap();
        assert_eq!(color(None, true, &config), "blue");
        assert_eq!(color(Some(10.0), false, &config), "var(--label-badge-red)");
    }

    #[test]
    fn should_return_stops_verbatim_on_exact_positions() {
        let config = gradient(&["#FF0000", "#FFFF00", "#00FF00"]);
        assert_eq!(color(Some(0.0), false, &config), "#FF0000");
        assert_eq!(color(Some(50.0), false, &config), "#FFFF00");
        assert_eq!(color(Some(100.0), false, &config), "#00FF00");
    }

    #[test]
    fn should_interpolate_between_stops() {
        let config = gradient(&["#ff0000", "#00ff00"]);
        assert_eq!(color(Some(50.0), false, &config), "#808000");
        assert_eq!(color(Some(25.0), false, &config), "#bf4000");
    }

    #[test]
    fn should_reject_invalid_gradient_and_use_thresholds() {
        let config = gradient(&["red", "#00ff00"]);
        let diagnostics = RecordingDiagnostics::default();
        assert_eq!(
            select_color(Some(10.0), false, &config, &diagnostics),
            "var(--label-badge-red)"
        );
        assert_eq!(diagnostics.messages(), ["invalid color_gradient value: red"]);
        assert_eq!(diagnostics.entity_ids(), ["sensor.a"]);
    }

    #[test]
    fn should_reject_single_stop_gradient() {
        let config = gradient(&["#00ff00"]);
        let diagnostics = RecordingDiagnostics::default();
        assert_eq!(
            select_color(Some(90.0), false, &config, &diagnostics),
            "var(--label-badge-green)"
        );
        assert_eq!(diagnostics.messages().len(), 1);
    }

    #[test]
    fn should_parse_only_strict_hex_colors() {
        assert!(Rgb::from_hex("#a1B2c3").is_some());
        assert!(Rgb::from_hex("a1b2c3").is_none());
        assert!(Rgb::from_hex("#abc").is_none());
        assert!(Rgb::from_hex("#gggggg").is_none());
        assert!(Rgb::from_hex("#a1b2c3ff").is_none());
    }
}
