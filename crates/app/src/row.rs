//! Battery row: holds one row's configuration and its last derived state.

use std::rc::Rc;

use batterycard_domain::config::RowConfig;
use batterycard_domain::diagnostics::Diagnostics;
use batterycard_domain::entity::EntityTable;
use batterycard_domain::error::CardError;
use batterycard_domain::locale::Localization;
use batterycard_domain::row::{DerivedRowState, RowContext, derive_row_state};
use batterycard_domain::time::{self, Timestamp};

use crate::diagnostics::TracingDiagnostics;

/// Source of the reference instant used for relative times.
pub type Clock = fn() -> Timestamp;

/// One battery row driven by configuration assignments and state pushes.
///
/// The derived state is replaced wholesale on every push that reaches the
/// row's entity. Pushes that do not contain the entity leave it untouched.
/// The last pushed table is kept so a configuration change can be applied
/// without waiting for the next push.
pub struct BatteryRow<D = TracingDiagnostics> {
    config: Option<RowConfig>,
    fingerprint: Option<String>,
    table: Option<Rc<EntityTable>>,
    state: Option<DerivedRowState>,
    changed: bool,
    locale: Localization,
    diagnostics: D,
    clock: Clock,
}

impl Default for BatteryRow {
    fn default() -> Self {
        Self::new(TracingDiagnostics)
    }
}

impl<D: Diagnostics> BatteryRow<D> {
    /// Create an unconfigured row reporting to `diagnostics`.
    pub fn new(diagnostics: D) -> Self {
        Self {
            config: None,
            fingerprint: None,
            table: None,
            state: None,
            changed: false,
            locale: Localization::default(),
            diagnostics,
            clock: time::now,
        }
    }

    /// Use `locale` for fallback texts.
    #[must_use]
    pub fn with_locale(mut self, locale: Localization) -> Self {
        self.locale = locale;
        self
    }

    /// Use `clock` instead of the system clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Assign a new configuration.
    ///
    /// Returns `Ok(false)` without touching anything when the configuration
    /// serializes identically to the current one. Otherwise the previous
    /// derived state is replaced by one derived from the last pushed table,
    /// if any, and `Ok(true)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Validation`] if the configuration has no entity.
    pub fn set_config(&mut self, config: RowConfig) -> Result<bool, CardError> {
        config.validate()?;
        let fingerprint = config.fingerprint()?;
        if self.fingerprint.as_deref() == Some(fingerprint.as_str()) {
            tracing::debug!(entity = %config.entity, "row configuration unchanged");
            return Ok(false);
        }

        self.config = Some(config);
        self.fingerprint = Some(fingerprint);
        self.state = None;
        if let Some(table) = self.table.clone() {
            self.on_state_update(table);
        }
        self.changed = true;
        Ok(true)
    }

    /// Recompute the row from a state push.
    ///
    /// Returns `None` when the row is not configured yet or its entity is
    /// missing from `table`; the previous state is kept in that case.
    pub fn on_state_update(
        &mut self,
        table: impl Into<Rc<EntityTable>>,
    ) -> Option<&DerivedRowState> {
        let table = Rc::clone(self.table.insert(table.into()));
        let config = self.config.as_ref()?;
        let _span = tracing::debug_span!("battery_row", entity = %config.entity).entered();

        let ctx = RowContext {
            now: (self.clock)(),
            locale: &self.locale,
            diagnostics: &self.diagnostics,
        };
        let Some(derived) = derive_row_state(&table, config, &ctx) else {
            tracing::debug!("entity missing from state push, skipping");
            self.changed = false;
            return None;
        };

        self.changed = self.state.as_ref() != Some(&derived);
        if self.changed {
            tracing::trace!(level = %derived.level, icon = %derived.icon, "row state changed");
        }
        self.state = Some(derived);
        self.state.as_ref()
    }

    /// The last derived state, if any.
    #[must_use]
    pub fn state(&self) -> Option<&DerivedRowState> {
        self.state.as_ref()
    }

    /// Whether the last configuration assignment or push changed what is shown.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.changed
    }
}
