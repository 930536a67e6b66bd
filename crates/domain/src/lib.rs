//! # batterycard-domain
//!
//! Pure domain model for the batterycard dashboard widget.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps, text helpers
//! - Define **Entities** (snapshots of sensor state pushed by the host)
//! - Define **Configuration** (rows, charging rules, color tables, cards)
//! - Derive the **Row state** (level, charging, icon, color, secondary info)
//!   deterministically and without failing on malformed sensor data
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and does no IO or logging.
//! Recoverable problems are reported through the [`diagnostics::Diagnostics`]
//! trait, implemented by the `app` crate.

pub mod diagnostics;
pub mod error;
pub mod locale;
pub mod time;
pub mod util;

pub mod config;
pub mod entity;
pub mod row;
