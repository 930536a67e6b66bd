//! User-facing strings that depend on the UI language.

use serde::{Deserialize, Serialize};

/// Localized fallback texts used while deriving rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Localization {
    /// Level shown when no value can be found.
    pub unknown: String,
    /// Secondary text shown for `secondary_info: charging`.
    pub charging: String,
}

impl Default for Localization {
    fn default() -> Self {
        Self {
            unknown: "Unknown".to_string(),
            charging: "Charging".to_string(),
        }
    }
}
