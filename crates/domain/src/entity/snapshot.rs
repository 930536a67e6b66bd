//! Entity snapshots and the table of all known entities.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::AttributeValue;

/// Immutable view of one entity at the time of a state push.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    #[serde(default)]
    pub entity_id: String,
    /// `None` when the host sent no state at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl EntitySnapshot {
    /// Create a builder for constructing an [`EntitySnapshot`].
    #[must_use]
    pub fn builder() -> EntitySnapshotBuilder {
        EntitySnapshotBuilder::default()
    }

    /// Look up an attribute by key. `null` attributes are reported as missing.
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key).filter(|value| value.is_present())
    }

    /// Read a top-level field (`entity_id`, `state`, `last_changed`,
    /// `last_updated`) by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "entity_id" => Some(self.entity_id.as_str()),
            "state" => self.state.as_deref(),
            "last_changed" => self.last_changed.as_deref(),
            "last_updated" => self.last_updated.as_deref(),
            _ => None,
        }
    }
}

/// Step-by-step builder for [`EntitySnapshot`].
#[derive(Debug, Default)]
pub struct EntitySnapshotBuilder {
    entity_id: Option<String>,
    state: Option<String>,
    attributes: HashMap<String, AttributeValue>,
    last_changed: Option<String>,
    last_updated: Option<String>,
}

impl EntitySnapshotBuilder {
    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn last_changed(mut self, ts: impl Into<String>) -> Self {
        self.last_changed = Some(ts.into());
        self
    }

    #[must_use]
    pub fn last_updated(mut self, ts: impl Into<String>) -> Self {
        self.last_updated = Some(ts.into());
        self
    }

    /// Consume the builder and return the snapshot.
    #[must_use]
    pub fn build(self) -> EntitySnapshot {
        EntitySnapshot {
            entity_id: self.entity_id.unwrap_or_default(),
            state: self.state,
            attributes: self.attributes,
            last_changed: self.last_changed,
            last_updated: self.last_updated,
        }
    }
}

/// Every entity known to the host, keyed by entity id.
///
/// Deserializes from either an object keyed by id or a list of snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityTable(HashMap<String, EntitySnapshot>);

impl EntityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a snapshot under its own `entity_id`, replacing any previous one.
    pub fn insert(&mut self, snapshot: EntitySnapshot) {
        self.0.insert(snapshot.entity_id.clone(), snapshot);
    }

    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&EntitySnapshot> {
        self.0.get(entity_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<EntitySnapshot> for EntityTable {
    fn from_iter<I: IntoIterator<Item = EntitySnapshot>>(iter: I) -> Self {
        let mut table = Self::new();
        for snapshot in iter {
            table.insert(snapshot);
        }
        table
    }
}

impl<'de> Deserialize<'de> for EntityTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Keyed(HashMap<String, EntitySnapshot>),
            Listed(Vec<EntitySnapshot>),
        }

        let table = match Repr::deserialize(deserializer)? {
            Repr::Keyed(map) => map
                .into_iter()
                .map(|(id, mut snapshot)| {
                    if snapshot.entity_id.is_empty() {
                        snapshot.entity_id.clone_from(&id);
                    }
                    (id, snapshot)
                })
                .collect(),
            Repr::Listed(list) => list.into_iter().map(|s| (s.entity_id.clone(), s)).collect(),
        };
        Ok(Self(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> EntitySnapshot {
        EntitySnapshot::builder()
            .entity_id("sensor.phone_battery")
            .state("80")
            .attribute("battery_level", 80)
            .attribute("unit_of_measurement", "%")
            .last_changed("2024-05-01T12:00:00+00:00")
            .build()
    }

    #[test]
    fn should_build_snapshot_with_attributes() {
        let snapshot = phone();
        assert_eq!(snapshot.state.as_deref(), Some("80"));
        assert_eq!(
            snapshot.get_attribute("battery_level"),
            Some(&AttributeValue::Int(80))
        );
    }

    #[test]
    fn should_hide_null_attributes() {
        let snapshot: EntitySnapshot = serde_json::from_value(serde_json::json!({
            "entity_id": "sensor.a",
            "state": "on",
            "attributes": { "battery_level": null }
        }))
        .unwrap();
        assert!(snapshot.get_attribute("battery_level").is_none());
    }

    #[test]
    fn should_read_top_level_fields_by_name() {
        let snapshot = phone();
        assert_eq!(snapshot.field("state"), Some("80"));
        assert_eq!(snapshot.field("entity_id"), Some("sensor.phone_battery"));
        assert_eq!(
            snapshot.field("last_changed"),
            Some("2024-05-01T12:00:00+00:00")
        );
        assert_eq!(snapshot.field("last_updated"), None);
        assert_eq!(snapshot.field("battery_level"), None);
    }

    #[test]
    fn should_tell_missing_state_from_empty_state() {
        let table: EntityTable = serde_json::from_value(serde_json::json!({
            "sensor.a": { "attributes": {} },
            "sensor.b": { "state": "" }
        }))
        .unwrap();
        let missing = table.get("sensor.a").unwrap();
        assert_eq!(missing.state, None);
        assert_eq!(missing.field("state"), None);
        assert_eq!(table.get("sensor.b").unwrap().field("state"), Some(""));
    }

    #[test]
    fn should_deserialize_keyed_table_and_fill_missing_ids() {
        let table: EntityTable = serde_json::from_value(serde_json::json!({
            "sensor.a": { "state": "50" },
            "sensor.b": { "entity_id": "sensor.b", "state": "on" }
        }))
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("sensor.a").unwrap().entity_id, "sensor.a");
    }

    #[test]
    fn should_deserialize_listed_table() {
        let table: EntityTable = serde_json::from_value(serde_json::json!([
            { "entity_id": "sensor.a", "state": "50" },
            { "entity_id": "sensor.b", "state": "on" }
        ]))
        .unwrap();
        assert_eq!(table.get("sensor.b").unwrap().state.as_deref(), Some("on"));
    }

    #[test]
    fn should_replace_snapshot_with_same_id() {
        let mut table: EntityTable = std::iter::once(phone()).collect();
        table.insert(
            EntitySnapshot::builder()
                .entity_id("sensor.phone_battery")
                .state("10")
                .build(),
        );
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("sensor.phone_battery").unwrap().state.as_deref(),
            Some("10")
        );
    }
}
