//! Diagnostics sink backed by `tracing`.

use batterycard_domain::diagnostics::Diagnostics;

/// Forwards derivation warnings to `tracing` at `WARN` level, with the
/// row's entity id as the `entity` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, entity_id: &str, message: &str) {
        tracing::warn!(entity = %entity_id, "{message}");
    }
}
