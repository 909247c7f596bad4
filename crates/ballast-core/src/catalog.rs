//! Enumeration of classification keys and their display labels

use serde::{Deserialize, Serialize};

use crate::engagement::Bucket;
use crate::item::IndexDescriptor;

/// A classification key paired with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledKey {
    pub id: String,
    pub label: String,
}

impl LabeledKey {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Supplies the known classification keys for each weight-table key source.
///
/// The enumeration order is the tie-break order when rendered rows share a
/// weight, so implementations must return keys in a stable order.
pub trait Catalog {
    /// Bundles declared on the index, in declaration order.
    fn bundles(&self, index: &IndexDescriptor) -> Vec<LabeledKey>;

    /// Known roles, in configured order.
    fn roles(&self) -> Vec<LabeledKey>;

    /// Engagement buckets, in canonical order.
    fn engagement_buckets(&self) -> Vec<LabeledKey>;
}

/// Catalog backed by the project configuration.
#[derive(Debug, Clone)]
pub struct ConfigCatalog {
    roles: Vec<LabeledKey>,
}

impl ConfigCatalog {
    pub fn new(roles: Vec<LabeledKey>) -> Self {
        Self { roles }
    }
}

impl Catalog for ConfigCatalog {
    fn bundles(&self, index: &IndexDescriptor) -> Vec<LabeledKey> {
        index.bundles()
    }

    fn roles(&self) -> Vec<LabeledKey> {
        self.roles.clone()
    }

    fn engagement_buckets(&self) -> Vec<LabeledKey> {
        Bucket::all()
            .iter()
            .map(|bucket| LabeledKey::new(bucket.id(), bucket.label()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_enumerate_in_canonical_order() {
        let catalog = ConfigCatalog::new(Vec::new());
        let ids: Vec<String> = catalog
            .engagement_buckets()
            .into_iter()
            .map(|k| k.id)
            .collect();
        assert_eq!(ids, vec!["trending", "dormant", "popular", "steady", "quiet"]);
    }

    #[test]
    fn roles_come_back_in_configured_order() {
        let catalog = ConfigCatalog::new(vec![
            LabeledKey::new("editor", "Editor"),
            LabeledKey::new("anonymous", "Anonymous"),
        ]);
        let ids: Vec<String> = catalog.roles().into_iter().map(|k| k.id).collect();
        assert_eq!(ids, vec!["editor", "anonymous"]);
    }
}
