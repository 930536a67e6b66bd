//! Battery card: a titled list of battery rows fed by one state push.

use std::cmp::Ordering;
use std::rc::Rc;

use batterycard_domain::config::{CardConfig, SortOrder};
use batterycard_domain::diagnostics::Diagnostics;
use batterycard_domain::entity::EntityTable;
use batterycard_domain::error::CardError;
use batterycard_domain::locale::Localization;
use batterycard_domain::row::DerivedRowState;
use batterycard_domain::time;

use crate::diagnostics::TracingDiagnostics;
use crate::row::{BatteryRow, Clock};

/// A card rendering one row per configured entity.
///
/// The card keeps the last pushed entity table so that a configuration
/// change can be reflected immediately, without waiting for the next push.
pub struct BatteryCard<D = TracingDiagnostics> {
    config: Option<CardConfig>,
    fingerprint: Option<String>,
    rows: Vec<BatteryRow<D>>,
    table: Option<Rc<EntityTable>>,
    states: Vec<DerivedRowState>,
    locale: Localization,
    diagnostics: D,
    clock: Clock,
}

impl Default for BatteryCard {
    fn default() -> Self {
        Self::new(TracingDiagnostics)
    }
}

impl<D: Diagnostics + Clone> BatteryCard<D> {
    /// Create an unconfigured card whose rows report to `diagnostics`.
    pub fn new(diagnostics: D) -> Self {
        Self {
            config: None,
            fingerprint: None,
            rows: Vec::new(),
            table: None,
            states: Vec::new(),
            locale: Localization::default(),
            diagnostics,
            clock: time::now,
        }
    }

    /// Use `locale` for fallback texts in every row.
    #[must_use]
    pub fn with_locale(mut self, locale: Localization) -> Self {
        self.locale = locale;
        self
    }

    /// Use `clock` instead of the system clock in every row.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Assign a new card configuration.
    ///
    /// Identical configurations (same serialized form) are ignored and
    /// return `Ok(false)`. Otherwise the rows are rebuilt, re-derived from
    /// the last pushed table if there is one, and `Ok(true)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Validation`] if the card has no rows or a row
    /// has no entity. The previous configuration stays in place.
    #[tracing::instrument(skip_all, fields(rows = config.entities.len()))]
    pub fn set_config(&mut self, config: CardConfig) -> Result<bool, CardError> {
        config.validate()?;
        let fingerprint = config.fingerprint()?;
        if self.fingerprint.as_deref() == Some(fingerprint.as_str()) {
            tracing::debug!("card configuration unchanged");
            return Ok(false);
        }

        let mut rows = Vec::with_capacity(config.entities.len());
        for row_config in config.rows() {
            let mut row = BatteryRow::new(self.diagnostics.clone())
                .with_locale(self.locale.clone())
                .with_clock(self.clock);
            row.set_config(row_config)?;
            rows.push(row);
        }

        self.rows = rows;
        self.states = match &self.table {
            Some(table) => derive_states(&mut self.rows, table, config.sort_by_level),
            None => Vec::new(),
        };
        self.config = Some(config);
        self.fingerprint = Some(fingerprint);
        Ok(true)
    }

    /// Apply a state push and return the rows to render.
    ///
    /// Rows whose entity is missing from `table` are left out.
    pub fn on_state_update(&mut self, table: impl Into<Rc<EntityTable>>) -> &[DerivedRowState] {
        let table = table.into();
        let _span = tracing::debug_span!("battery_card", entities = table.len()).entered();
        let order = self.config.as_ref().and_then(|c| c.sort_by_level);
        self.states = derive_states(&mut self.rows, &table, order);
        self.table = Some(table);
        &self.states
    }

    /// Card title, if configured.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.config.as_ref().and_then(|c| c.title.as_deref())
    }

    /// Rows derived from the last push.
    #[must_use]
    pub fn states(&self) -> &[DerivedRowState] {
        &self.states
    }
}

fn derive_states<D: Diagnostics>(
    rows: &mut [BatteryRow<D>],
    table: &Rc<EntityTable>,
    order: Option<SortOrder>,
) -> Vec<DerivedRowState> {
    let mut states: Vec<DerivedRowState> = rows
        .iter_mut()
        .filter_map(|row| row.on_state_update(Rc::clone(table)).cloned())
        .collect();
    if let Some(order) = order {
        sort_by_level(&mut states, order);
    }
    states
}

/// Stable sort on numeric level; non-numeric levels always go last.
fn sort_by_level(states: &mut [DerivedRowState], order: SortOrder) {
    states.sort_by(|a, b| match (a.numeric_level(), b.numeric_level()) {
        (Some(left), Some(right)) => match order {
            SortOrder::Asc => left.total_cmp(&right),
            SortOrder::Desc => right.total_cmp(&left),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
