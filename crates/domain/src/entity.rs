//! Entity: a named sensor or device as published by the host.
//!
//! An entity exposes a free-form state string plus a bag of typed
//! attributes. Snapshots arrive wholesale with every state push and are
//! never mutated by the card.

mod attribute_value;
mod snapshot;

pub use attribute_value::AttributeValue;
pub use snapshot::{EntitySnapshot, EntitySnapshotBuilder, EntityTable};
