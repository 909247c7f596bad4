use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One persisted weight-table row.
///
/// Display labels are never persisted here; the catalog supplies them when a
/// table is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub key: String,
    pub weight: i64,
}

impl WeightEntry {
    pub fn new(key: impl Into<String>, weight: i64) -> Self {
        Self {
            key: key.into(),
            weight,
        }
    }
}

/// Mapping from classification key to sort-priority weight.
///
/// Lookups are total: every key either has an explicit entry or the caller's
/// default applies (see [`resolve`](super::resolve)). The table serializes as
/// an ordered list of entries; on deserialization a duplicated key keeps the
/// last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<WeightEntry>", into = "Vec<WeightEntry>")]
pub struct WeightTable {
    entries: HashMap<String, i64>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit weight for `key`, if one is set.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries.get(key).copied()
    }

    /// Set the weight for `key`, replacing any previous entry.
    pub fn set(&mut self, key: impl Into<String>, weight: i64) {
        self.entries.insert(key.into(), weight);
    }

    /// Remove the entry for `key`, returning its weight if it was set.
    pub fn remove(&mut self, key: &str) -> Option<i64> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries ordered by key, the table's canonical serialized form.
    pub fn entries(&self) -> Vec<WeightEntry> {
        let mut entries: Vec<WeightEntry> = self
            .entries
            .iter()
            .map(|(key, weight)| WeightEntry::new(key.clone(), *weight))
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }
}

impl From<Vec<WeightEntry>> for WeightTable {
    fn from(entries: Vec<WeightEntry>) -> Self {
        let mut table = WeightTable::new();
        for entry in entries {
            // Last value wins on duplicate keys
            table.set(entry.key, entry.weight);
        }
        table
    }
}

impl From<WeightTable> for Vec<WeightEntry> {
    fn from(table: WeightTable) -> Self {
        table.entries()
    }
}

impl FromIterator<(String, i64)> for WeightTable {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let mut table = WeightTable::new();
        for (key, weight) in iter {
            table.set(key, weight);
        }
        table
    }
}
