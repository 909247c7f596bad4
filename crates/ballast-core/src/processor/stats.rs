//! Engagement sort-priority processor

use crate::catalog::{Catalog, LabeledKey};
use crate::config::{ProcessorEntry, CONTENT_KIND};
use crate::engagement::classify;
use crate::error::Result;
use crate::fields::FieldType;
use crate::item::{IndexDescriptor, Item};
use crate::schema::IndexSchema;
use crate::weight::resolve;

use super::{stamp, ProcessorContext, PropertyDefinition, SortProcessor};

/// Stamps a weight chosen by the item's engagement bucket.
///
/// The bucket is computed from the view counter's statistics for the item;
/// an item the counter has never seen classifies from zero stats. Only
/// items whose entity kind is listed in `allowed_entity_kinds` are stamped.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsProcessor;

impl SortProcessor for StatsProcessor {
    fn id(&self) -> &'static str {
        "stats"
    }

    fn label(&self) -> &'static str {
        "Engagement sort priority"
    }

    fn target_field_id(&self) -> &'static str {
        "stats_weight"
    }

    fn supports_index(&self, index: &IndexDescriptor) -> bool {
        index.has_entity_kind(CONTENT_KIND)
    }

    fn property_definitions(&self) -> Vec<PropertyDefinition> {
        vec![PropertyDefinition {
            field_id: "stats_weight",
            label: "Engagement sort priority",
            description: "Sort priority resolved from the item's engagement bucket",
            field_type: FieldType::Integer,
            hidden: true,
        }]
    }

    fn classification_keys(
        &self,
        _index: &IndexDescriptor,
        catalog: &dyn Catalog,
    ) -> Vec<LabeledKey> {
        catalog.engagement_buckets()
    }

    fn add_field_values(
        &self,
        item: &mut Item,
        entry: &ProcessorEntry,
        ctx: &ProcessorContext<'_>,
    ) -> Result<()> {
        if !entry
            .allowed_entity_kinds
            .iter()
            .any(|kind| kind == item.entity_kind())
        {
            return Ok(());
        }
        let stats = ctx.engagement.stats_for(item.id())?.unwrap_or_default();
        let bucket = classify(&stats, ctx.now);
        let weight = resolve(bucket.id(), &entry.weight_table, entry.default_weight);
        stamp(item, self.target_field_id(), weight);
        Ok(())
    }

    fn pre_index_save(&self, schema: &mut dyn IndexSchema, _entry: &ProcessorEntry) -> Result<()> {
        for prop in self.property_definitions() {
            schema
                .ensure_field(prop.field_id, prop.field_type, prop.label)?
                .set_hidden(prop.hidden);
        }
        Ok(())
    }
}
