//! Destination field slots that processors write sort-priority values into

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value type of an index field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// 64-bit signed integer, the type of every sort-priority field
    #[default]
    Integer,
    /// Free-form text
    Text,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Text => "text",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One field slot on an item being indexed.
///
/// Only integer slots are materialized on items; they exist so processors
/// have somewhere to stamp their resolved weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    id: String,
    values: Vec<i64>,
}

impl Field {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append a value to the slot.
    pub fn add_value(&mut self, value: i64) {
        self.values.push(value);
    }

    /// Values stamped so far, in insertion order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// The destination slots of a single item, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: BTreeMap<String, Field>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot, replacing any existing slot with the same id.
    pub fn insert(&mut self, field: Field) {
        self.fields.insert(field.id().to_string(), field);
    }

    pub fn get(&self, id: &str) -> Option<&Field> {
        self.fields.get(id)
    }

    /// Mutable access to a slot. `None` when the index declares no such
    /// field; callers skip stamping in that case.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.get_mut(id)
    }

    /// All slots ordered by field id.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_value_appends() {
        let mut field = Field::new("bundle_weight");
        assert!(field.values().is_empty());
        field.add_value(5);
        field.add_value(7);
        assert_eq!(field.values(), &[5, 7]);
    }

    #[test]
    fn field_set_lookup() {
        let mut fields = FieldSet::new();
        fields.insert(Field::new("bundle_weight"));
        assert!(fields.get("bundle_weight").is_some());
        assert!(fields.get("role_weight").is_none());
        assert!(fields.get_mut("role_weight").is_none());
    }

    #[test]
    fn iter_is_ordered_by_id() {
        let mut fields = FieldSet::new();
        fields.insert(Field::new("stats_weight"));
        fields.insert(Field::new("bundle_weight"));
        let ids: Vec<&str> = fields.iter().map(Field::id).collect();
        assert_eq!(ids, vec!["bundle_weight", "stats_weight"]);
    }
}
