//! Diagnostics sink for recoverable data problems.
//!
//! The resolvers never fail on malformed sensor data. When they fall back
//! to a default they report why through this trait, and the caller decides
//! where the message goes.

/// Receives non-fatal warnings raised while deriving a row.
pub trait Diagnostics {
    /// Report a recoverable problem found while deriving the row of `entity_id`.
    fn warn(&self, entity_id: &str, message: &str);
}
