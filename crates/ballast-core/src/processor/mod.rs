//! Sort-priority processors and their registry
//!
//! Each processor stamps one integer weight onto indexed items, chosen by a
//! classification key (bundle, role, or engagement bucket) through the
//! shared resolution rule. Dispatch is explicit: the registry maps processor
//! ids to implementations.

mod bundle;
mod role;
mod stats;

pub use bundle::BundleProcessor;
pub use role::RoleProcessor;
pub use stats::StatsProcessor;

use chrono::{DateTime, Utc};

use crate::catalog::{Catalog, LabeledKey};
use crate::config::ProcessorEntry;
use crate::error::{BallastError, Result};
use crate::fields::FieldType;
use crate::item::{IndexDescriptor, Item};
use crate::schema::IndexSchema;
use crate::stats_db::EngagementSource;

/// A property a processor contributes to indexed items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub field_id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub field_type: FieldType,
    /// Hidden properties are processor-managed and kept out of the
    /// administrative field list
    pub hidden: bool,
}

/// Shared collaborators handed to processors during an indexing pass.
pub struct ProcessorContext<'a> {
    pub catalog: &'a dyn Catalog,
    pub engagement: &'a dyn EngagementSource,
    pub now: DateTime<Utc>,
}

/// A processor that stamps a sort-priority weight onto indexed items.
pub trait SortProcessor {
    /// Stable processor id, also its key in persisted configuration.
    fn id(&self) -> &'static str;

    /// Human label for administrative surfaces.
    fn label(&self) -> &'static str;

    /// Id of the destination field this processor stamps.
    fn target_field_id(&self) -> &'static str;

    /// Whether this processor can run against the given index.
    fn supports_index(&self, index: &IndexDescriptor) -> bool;

    /// Properties this processor contributes to items.
    fn property_definitions(&self) -> Vec<PropertyDefinition>;

    /// The keys this processor's weight table is keyed by, in enumeration
    /// order; the editor's key source.
    fn classification_keys(
        &self,
        index: &IndexDescriptor,
        catalog: &dyn Catalog,
    ) -> Vec<LabeledKey>;

    /// Stamp the resolved weight onto one item. Invoked once per item per
    /// pass; invoking it again must not duplicate values.
    fn add_field_values(
        &self,
        item: &mut Item,
        entry: &ProcessorEntry,
        ctx: &ProcessorContext<'_>,
    ) -> Result<()>;

    /// Provision or verify the destination field before the index is saved.
    fn pre_index_save(&self, schema: &mut dyn IndexSchema, entry: &ProcessorEntry) -> Result<()>;
}

/// Write a weight into the item's destination slot.
///
/// Skips when the index declares no such slot, and skips when a value is
/// already present so repeated pipeline invocations stay idempotent.
pub(crate) fn stamp(item: &mut Item, field_id: &str, weight: i64) {
    if item.fields().get(field_id).is_none() {
        tracing::debug!(
            item = item.id(),
            field = field_id,
            "destination field not declared on index, skipping"
        );
        return;
    }
    if let Some(field) = item.fields_mut().get_mut(field_id) {
        if field.values().is_empty() {
            field.add_value(weight);
        }
    }
}

/// Explicit registry mapping processor ids to implementations.
pub struct ProcessorRegistry {
    processors: Vec<Box<dyn SortProcessor>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    /// Registry holding the built-in processors.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(BundleProcessor));
        registry.register(Box::new(RoleProcessor));
        registry.register(Box::new(StatsProcessor));
        registry
    }

    /// Register a processor, replacing any previous one with the same id.
    pub fn register(&mut self, processor: Box<dyn SortProcessor>) {
        if let Some(pos) = self.processors.iter().position(|p| p.id() == processor.id()) {
            self.processors[pos] = processor;
        } else {
            self.processors.push(processor);
        }
    }

    /// Look up a processor by id.
    pub fn get(&self, id: &str) -> Result<&dyn SortProcessor> {
        self.processors
            .iter()
            .find(|p| p.id() == id)
            .map(|p| p.as_ref())
            .ok_or_else(|| BallastError::unknown_processor(id, &self.ids()))
    }

    /// Registered processor ids, in registration order.
    pub fn ids(&self) -> Vec<&'static str> {
        self.processors.iter().map(|p| p.id()).collect()
    }

    /// All registered processors, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn SortProcessor> {
        self.processors.iter().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
