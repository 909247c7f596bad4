//! Role sort-priority processor

use crate::catalog::{Catalog, LabeledKey};
use crate::config::ProcessorEntry;
use crate::error::Result;
use crate::fields::FieldType;
use crate::item::{IndexDescriptor, Item};
use crate::schema::IndexSchema;
use crate::weight::resolve;

use super::{stamp, ProcessorContext, PropertyDefinition, SortProcessor};

/// Stamps a weight chosen by the role of the item's author.
///
/// Items without an author role are left alone. The destination field is
/// processor-managed: provisioned at pre-index-save and hidden.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleProcessor;

impl SortProcessor for RoleProcessor {
    fn id(&self) -> &'static str {
        "role"
    }

    fn label(&self) -> &'static str {
        "Role sort priority"
    }

    fn target_field_id(&self) -> &'static str {
        "role_weight"
    }

    fn supports_index(&self, _index: &IndexDescriptor) -> bool {
        // Roles are orthogonal to entity kinds; any index qualifies
        true
    }

    fn property_definitions(&self) -> Vec<PropertyDefinition> {
        vec![PropertyDefinition {
            field_id: "role_weight",
            label: "Role sort priority",
            description: "Sort priority resolved from the item author's role",
            field_type: FieldType::Integer,
            hidden: true,
        }]
    }

    fn classification_keys(
        &self,
        _index: &IndexDescriptor,
        catalog: &dyn Catalog,
    ) -> Vec<LabeledKey> {
        catalog.roles()
    }

    fn add_field_values(
        &self,
        item: &mut Item,
        entry: &ProcessorEntry,
        _ctx: &ProcessorContext<'_>,
    ) -> Result<()> {
        let Some(role) = item.author_role() else {
            return Ok(());
        };
        let weight = resolve(role, &entry.weight_table, entry.default_weight);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ConfigCatalog;
    use crate::fields::Field;
    use crate::schema::InMemorySchema;
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

    fn run(item: &mut Item, entry: &ProcessorEntry) {
        let catalog = ConfigCatalog::new(Vec::new());
        let engagement = NoEngagement;
        let ctx = ProcessorContext {
            catalog: &catalog,
            engagement: &engagement,
            now: Utc::now(),
        };
        RoleProcessor.add_field_values(item, entry, &ctx).unwrap();
    }

    #[test]
    fn stamps_the_author_role_weight() {
        let mut item = Item::new("a1", "content", "content", "article").with_author_role("editor");
        item.fields_mut().insert(Field::new("role_weight"));
        run(&mut item, &entry(10, &[("editor", 2)]));
        assert_eq!(item.fields().get("role_weight").unwrap().values(), &[2]);
    }

    #[test]
    fn unknown_role_gets_the_default() {
        let mut item = Item::new("a1", "content", "content", "article").with_author_role("guest");
        item.fields_mut().insert(Field::new("role_weight"));
        run(&mut item, &entry(10, &[("editor", 2)]));
        assert_eq!(item.fields().get("role_weight").unwrap().values(), &[10]);
    }

    #[test]
    fn items_without_a_role_are_left_alone() {
        let mut item = Item::new("a1", "content", "content", "article");
        item.fields_mut().insert(Field::new("role_weight"));
        run(&mut item, &entry(10, &[("editor", 2)]));
        assert!(item.fields().get("role_weight").unwrap().values().is_empty());
    }

    #[test]
    fn works_for_any_entity_kind() {
        let mut item = Item::new("m1", "media", "media", "image").with_author_role("editor");
        item.fields_mut().insert(Field::new("role_weight"));
        run(&mut item, &entry(10, &[("editor", 2)]));
        assert_eq!(item.fields().get("role_weight").unwrap().values(), &[2]);
    }

    #[test]
    fn pre_index_save_provisions_a_hidden_field() {
        let mut schema = InMemorySchema::new();
        RoleProcessor
            .pre_index_save(&mut schema, &ProcessorEntry::default())
            .unwrap();

        let spec = schema.field("role_weight").unwrap();
        assert_eq!(spec.field_type(), FieldType::Integer);
        assert!(spec.hidden());
    }
}
