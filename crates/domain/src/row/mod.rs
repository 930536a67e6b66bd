//! Row derivation: computes the visual state of one battery row.
//!
//! Derivation runs in dependency order: level, then charging, then icon,
//! color and secondary info. It never fails; every missing piece of data
//! has a fallback and recoverable problems are reported through the
//! [`Diagnostics`] sink carried by [`RowContext`].

mod charging;
mod color;
mod icon;
mod level;
mod secondary_info;

pub use charging::resolve_charging;
pub use color::{DEFAULT_COLOR, select_color};
pub use icon::{UNKNOWN_ICON, select_icon};
pub use level::resolve_level;
pub use secondary_info::{CHARGING_KEYWORD, resolve_secondary_info};

use serde::{Deserialize, Serialize};

use crate::config::RowConfig;
use crate::diagnostics::Diagnostics;
use crate::entity::{AttributeValue, EntitySnapshot, EntityTable};
use crate::locale::Localization;
use crate::time::Timestamp;
use crate::util::parse_number;

/// Unit shown after numeric levels when none is configured.
pub const DEFAULT_UNIT: &str = "%";

/// Everything a derivation needs besides the entity data and the config.
#[derive(Clone, Copy)]
pub struct RowContext<'a> {
    /// Reference instant for relative time rendering.
    pub now: Timestamp,
    pub locale: &'a Localization,
    pub diagnostics: &'a dyn Diagnostics,
}

/// Display values handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRowState {
    pub entity_id: String,
    pub name: String,
    /// Numeric text, or a capitalized status word.
    pub level: String,
    /// Unit rendered after the level; only set for numeric levels.
    pub unit: Option<String>,
    pub is_charging: bool,
    pub icon: String,
    pub color: String,
    pub secondary_info: Option<String>,
}

impl DerivedRowState {
    /// The level as a number, when it is one.
    #[must_use]
    pub fn numeric_level(&self) -> Option<f64> {
        parse_number(&self.level)
    }
}

/// Derive the row state for `config` from the current entity table.
///
/// Returns `None` when the configured entity is not in the table; the
/// update is then skipped rather than rendered with made-up data.
#[must_use]
pub fn derive_row_state(
    table: &EntityTable,
    config: &RowConfig,
    ctx: &RowContext<'_>,
) -> Option<DerivedRowState> {
    let entity = table.get(&config.entity)?;

    let level = resolve_level(entity, config, &ctx.locale.unknown, ctx.diagnostics);
    let is_charging = resolve_charging(
        table,
        entity,
        config.charging_state.as_ref(),
        ctx.diagnostics,
    );
    let numeric = parse_number(&level);

    Some(DerivedRowState {
        entity_id: config.entity.clone(),
        name: resolve_name(entity, config),
        unit: numeric.map(|_| {
            config
                .unit
                .clone()
                .unwrap_or_else(|| DEFAULT_UNIT.to_string())
        }),
        is_charging,
        icon: select_icon(numeric, is_charging, config),
        color: select_color(numeric, is_charging, config, ctx.diagnostics),
        secondary_info: resolve_secondary_info(entity, config, is_charging, ctx.locale, ctx.now),
        level,
    })
}

/// Display name: configured name, then `friendly_name`, then the entity id.
#[must_use]
pub fn resolve_name(entity: &EntitySnapshot, config: &RowConfig) -> String {
    config
        .name
        .clone()
        .or_else(|| {
            entity
                .get_attribute("friendly_name")
                .and_then(AttributeValue::as_text)
        })
        .unwrap_or_else(|| config.entity.clone())
}
