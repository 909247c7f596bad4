//! Bundle sort-priority processor

use crate::catalog::{Catalog, LabeledKey};
use crate::config::{ProcessorEntry, CONFIG_FILE, CONTENT_KIND};
use crate::error::{BallastError, Result};
use crate::fields::FieldType;
use crate::item::{IndexDescriptor, Item};
use crate::schema::IndexSchema;
use crate::weight::resolve;

use super::{stamp, ProcessorContext, PropertyDefinition, SortProcessor};

/// Stamps a weight chosen by the item's content bundle.
///
/// The destination field is visible and added to the index by an
/// administrator; enabling the processor never creates it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleProcessor;

impl SortProcessor for BundleProcessor {
    fn id(&self) -> &'static str {
        "bundle"
    }

    fn label(&self) -> &'static str {
        "Bundle sort priority"
    }

    fn target_field_id(&self) -> &'static str {
        "bundle_weight"
    }

    fn supports_index(&self, index: &IndexDescriptor) -> bool {
        index.has_entity_kind(CONTENT_KIND)
    }

    fn property_definitions(&self) -> Vec<PropertyDefinition> {
        vec![PropertyDefinition {
            field_id: "bundle_weight",
            label: "Bundle sort priority",
            description: "Sort priority resolved from the item's content bundle",
            field_type: FieldType::Integer,
            hidden: false,
        }]
    }

    fn classification_keys(
        &self,
        index: &IndexDescriptor,
        catalog: &dyn Catalog,
    ) -> Vec<LabeledKey> {
        catalog.bundles(index)
    }

    fn add_field_values(
        &self,
        item: &mut Item,
        entry: &ProcessorEntry,
        _ctx: &ProcessorContext<'_>,
    ) -> Result<()> {
        if item.entity_kind() != CONTENT_KIND {
            return Ok(());
        }
        let weight = resolve(item.bundle(), &entry.weight_table, entry.default_weight);
        stamp(item, self.target_field_id(), weight);
        Ok(())
    }

    fn pre_index_save(&self, schema: &mut dyn IndexSchema, _entry: &ProcessorEntry) -> Result<()> {
        // Administrator-managed field: verify, never create
        match schema.field(self.target_field_id()) {
            Some(spec) if spec.field_type() == FieldType::Integer => Ok(()),
            Some(spec) => Err(BallastError::FieldTypeMismatch {
                field: self.target_field_id().to_string(),
                expected: FieldType::Integer.to_string(),
                found: spec.field_type().to_string(),
            }),
            None => Err(BallastError::MissingField {
                field: self.target_field_id().to_string(),
                hint: format!(
                    "declare an integer field with this id under [index] in {}",
                    CONFIG_FILE
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ConfigCatalog;
    use crate::fields::Field;
    use crate::item::DatasourceDescriptor;
    use crate::schema::{FieldSpec, InMemorySchema};
    use crate::stats_db::NoEngagement;
    use chrono::Utc;

    fn entry(default_weight: i64, table: &[(&str, i64)]) -> ProcessorEntry {
        let mut entry = ProcessorEntry {
            enabled: true,
            default_weight,
            ..Default::default()
        };
        for (key, weight) in table {
            entry.weight_table.set(*key, *weight);
        }
        entry
    }

    fn content_item(bundle: &str) -> Item {
        let mut item = Item::new("a1", "content", "content", bundle);
        item.fields_mut().insert(Field::new("bundle_weight"));
        item
    }

    fn run(item: &mut Item, entry: &ProcessorEntry) {
        let catalog = ConfigCatalog::new(Vec::new());
        let engagement = NoEngagement;
        let ctx = ProcessorContext {
            catalog: &catalog,
            engagement: &engagement,
            now: Utc::now(),
        };
        BundleProcessor.add_field_values(item, entry, &ctx).unwrap();
    }

    #[test]
    fn stamps_the_bundle_weight() {
        let mut item = content_item("article");
        run(&mut item, &entry(100, &[("article", 1), ("page", 0)]));
        assert_eq!(item.fields().get("bundle_weight").unwrap().values(), &[1]);
    }

    #[test]
    fn explicit_zero_weight_is_stamped() {
        let mut item = content_item("page");
        run(&mut item, &entry(100, &[("article", 1), ("page", 0)]));
        assert_eq!(item.fields().get("bundle_weight").unwrap().values(), &[0]);
    }

    #[test]
    fn unconfigured_bundle_gets_the_default() {
        let mut item = content_item("landing_page");
        run(&mut item, &entry(100, &[("article", 1)]));
        assert_eq!(item.fields().get("bundle_weight").unwrap().values(), &[100]);
    }

    #[test]
    fn ignores_other_entity_kinds() {
        let mut item = Item::new("m1", "media", "media", "image");
        item.fields_mut().insert(Field::new("bundle_weight"));
        run(&mut item, &entry(100, &[("image", 3)]));
        assert!(item
            .fields()
            .get("bundle_weight")
            .unwrap()
            .values()
            .is_empty());
    }

    #[test]
    fn repeated_runs_stamp_once() {
        let mut item = content_item("article");
        let entry = entry(0, &[("article", 5)]);
        run(&mut item, &entry);
        run(&mut item, &entry);
        assert_eq!(item.fields().get("bundle_weight").unwrap().values(), &[5]);
    }

    #[test]
    fn supports_content_indexes_only() {
        let content_index = IndexDescriptor {
            id: "default".to_string(),
            datasources: vec![DatasourceDescriptor {
                id: "content".to_string(),
                entity_kind: CONTENT_KIND.to_string(),
                bundles: Vec::new(),
            }],
        };
        let media_index = IndexDescriptor {
            id: "media".to_string(),
            datasources: vec![DatasourceDescriptor {
                id: "media".to_string(),
                entity_kind: "media".to_string(),
                bundles: Vec::new(),
            }],
        };
        assert!(BundleProcessor.supports_index(&content_index));
        assert!(!BundleProcessor.supports_index(&media_index));
    }

    #[test]
    fn pre_index_save_requires_the_field() {
        let mut schema = InMemorySchema::new();
        let err = BundleProcessor
            .pre_index_save(&mut schema, &ProcessorEntry::default())
            .unwrap_err();
        assert!(matches!(err, BallastError::MissingField { .. }));
        // Verification creates nothing
        assert!(schema.fields().is_empty());
    }

    #[test]
    fn pre_index_save_accepts_a_declared_integer_field() {
        let mut schema = InMemorySchema::with_fields(vec![FieldSpec::new(
            "bundle_weight",
            FieldType::Integer,
            "Bundle weight",
        )]);
        BundleProcessor
            .pre_index_save(&mut schema, &ProcessorEntry::default())
            .unwrap();
    }

    #[test]
    fn pre_index_save_rejects_a_text_field() {
        let mut schema = InMemorySchema::with_fields(vec![FieldSpec::new(
            "bundle_weight",
            FieldType::Text,
            "Bundle weight",
        )]);
        let err = BundleProcessor
            .pre_index_save(&mut schema, &ProcessorEntry::default())
            .unwrap_err();
        assert!(matches!(err, BallastError::FieldTypeMismatch { .. }));
    }
}
