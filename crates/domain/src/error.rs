//! Common error types used across the workspace.
//!
//! Only configuration assignment can fail. Everything that happens while
//! deriving a row from live state degrades to a fallback and is reported
//! through [`Diagnostics`](crate::diagnostics::Diagnostics) instead.

/// Base error for the batterycard workspace.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("failed to serialize configuration")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration invariants that were violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A row was configured without an `entity` id.
    #[error("entity must be specified")]
    MissingEntity,

    /// A card was configured without any rows.
    #[error("entities must not be empty")]
    NoEntities,
}
