//! # batterycard-app
//!
//! Application layer: drives the domain derivation from the outside world.
//!
//! ## Responsibilities
//! - **`BatteryRow`**: validates and assigns a row configuration, coalesces
//!   identical assignments, recomputes the derived state on each state push
//! - **`BatteryCard`**: owns a list of rows, applies card-wide defaults,
//!   filters and sorts the rendered rows
//! - **`TracingDiagnostics`**: the `tracing`-backed implementation of the
//!   domain's diagnostics sink
//!
//! ## Dependency rule
//! Depends on `batterycard-domain` only (plus `tracing`). Knows nothing about
//! how configurations or entity tables are read.

pub mod card;
pub mod diagnostics;
pub mod row;

pub use card::BatteryCard;
pub use diagnostics::TracingDiagnostics;
pub use row::BatteryRow;
