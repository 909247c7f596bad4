//! The reference indexing pipeline
//!
//! Glue between the content store, the schema, and the processors: build
//! items, provision destination fields, stamp weights.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{Config, CONTENT_KIND};
use crate::error::{BallastError, Result};
use crate::item::Item;
use crate::processor::{ProcessorContext, ProcessorRegistry, SortProcessor};
use crate::schema::{IndexSchema, InMemorySchema};
use crate::store::{ContentDoc, ContentStore};

/// Run every enabled processor's pre-index-save step against the declared
/// schema.
///
/// Role and stats provision their hidden destination fields here; bundle
/// verifies its administrator-managed field instead. Fails on the first
/// processor whose destination field cannot be provided.
pub fn provision(config: &Config, registry: &ProcessorRegistry) -> Result<InMemorySchema> {
    let mut schema = config.schema();
    for processor in registry.iter() {
        let entry = config.processor(processor.id());
        if !entry.enabled {
            continue;
        }
        processor.pre_index_save(&mut schema, &entry)?;
    }
    Ok(schema)
}

/// Build pipeline items from the content store's documents.
pub fn build_items(
    store: &ContentStore,
    config: &Config,
    schema: &InMemorySchema,
) -> Result<Vec<Item>> {
    let docs = store.documents()?;
    let datasource = config
        .index
        .datasources
        .iter()
        .find(|ds| ds.entity_kind == CONTENT_KIND)
        .map(|ds| ds.id.clone())
        .unwrap_or_else(|| CONTENT_KIND.to_string());

    Ok(docs
        .into_iter()
        .map(|doc| item_from_doc(doc, &datasource, schema))
        .collect())
}

fn item_from_doc(doc: ContentDoc, datasource: &str, schema: &InMemorySchema) -> Item {
    let ContentDoc { front, .. } = doc;
    let mut item = Item::new(front.id, datasource, CONTENT_KIND, front.bundle);
    if let Some(title) = front.title {
        item = item.with_title(title);
    }
    if let Some(role) = front.role {
        item = item.with_author_role(role);
    }
    item.seed_fields(schema);
    item
}

/// Stamp weights onto every item with every enabled processor.
///
/// `interrupted` is checked between items so a ctrl-c lands between
/// documents, never mid-item.
pub fn run(
    items: &mut [Item],
    registry: &ProcessorRegistry,
    config: &Config,
    ctx: &ProcessorContext<'_>,
    interrupted: &AtomicBool,
) -> Result<()> {
    let enabled: Vec<(&dyn SortProcessor, _)> = registry
        .iter()
        .filter_map(|p| {
            let entry = config.processor(p.id());
            entry.enabled.then_some((p, entry))
        })
        .collect();

    for item in items.iter_mut() {
        if interrupted.load(Ordering::SeqCst) {
            return Err(BallastError::Interrupted);
        }
        for (processor, entry) in &enabled {
            processor.add_field_values(item, entry, ctx)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::fields::FieldType;
    use crate::stats_db::NoEngagement;
    use chrono::Utc;
    use tempfile::tempdir;

    fn enabled_config() -> Config {
        let mut config = Config::scaffold();
        config.index.fields.push(FieldConfig {
            id: "bundle_weight".to_string(),
            field_type: FieldType::Integer,
            label: Some("Bundle weight".to_string()),
            hidden: false,
        });
        for id in ["bundle", "role", "stats"] {
            config.processor_mut(id).enabled = true;
        }
        config.processor_mut("role").weight_table.set("editor", 3);
        config.processor_mut("stats").weight_table.set("dormant", 8);
        config
    }

    fn write_corpus(root: &std::path::Path) {
        std::fs::write(
            root.join("a.md"),
            "---\nid: a1\ntype: article\ntitle: First\nrole: editor\n---\nbody\n",
        )
        .unwrap();
        std::fs::write(root.join("b.md"), "---\nid: b1\ntype: page\n---\n").unwrap();
    }

    #[test]
    fn provision_adds_hidden_fields_and_keeps_declared_ones() {
        let config = enabled_config();
        let registry = ProcessorRegistry::with_builtins();
        let schema = provision(&config, &registry).unwrap();

        assert!(schema.field("title").is_some());
        assert!(!schema.field("bundle_weight").unwrap().hidden());
        assert!(schema.field("role_weight").unwrap().hidden());
        assert!(schema.field("stats_weight").unwrap().hidden());
    }

    #[test]
    fn provision_fails_when_the_bundle_field_is_missing() {
        let mut config = enabled_config();
        config.index.fields.retain(|f| f.id != "bundle_weight");
        let registry = ProcessorRegistry::with_builtins();
        let err = provision(&config, &registry).unwrap_err();
        assert!(matches!(err, BallastError::MissingField { .. }));
    }

    #[test]
    fn full_pass_stamps_every_enabled_weight() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());

        let config = enabled_config();
        let registry = ProcessorRegistry::with_builtins();
        let schema = provision(&config, &registry).unwrap();
        let store = ContentStore::open(dir.path()).unwrap();
        let mut items = build_items(&store, &config, &schema).unwrap();

        let catalog = config.catalog();
        let engagement = NoEngagement;
        let ctx = ProcessorContext {
            catalog: &catalog,
            engagement: &engagement,
            now: Utc::now(),
        };
        let interrupted = AtomicBool::new(false);
        run(&mut items, &registry, &config, &ctx, &interrupted).unwrap();

        let a1 = items.iter().find(|i| i.id() == "a1").unwrap();
        // article is weighted 1 in the scaffold table
        assert_eq!(a1.fields().get("bundle_weight").unwrap().values(), &[1]);
        assert_eq!(a1.fields().get("role_weight").unwrap().values(), &[3]);
        // no counter rows, so zero stats classify as dormant
        assert_eq!(a1.fields().get("stats_weight").unwrap().values(), &[8]);

        let b1 = items.iter().find(|i| i.id() == "b1").unwrap();
        // page is explicitly weighted 0
        assert_eq!(b1.fields().get("bundle_weight").unwrap().values(), &[0]);
        // no author role, so the role slot stays empty
        assert!(b1.fields().get("role_weight").unwrap().values().is_empty());
    }

    #[test]
    fn second_pass_does_not_duplicate_values() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());

        let config = enabled_config();
        let registry = ProcessorRegistry::with_builtins();
        let schema = provision(&config, &registry).unwrap();
        let store = ContentStore::open(dir.path()).unwrap();
        let mut items = build_items(&store, &config, &schema).unwrap();

        let catalog = config.catalog();
        let engagement = NoEngagement;
        let ctx = ProcessorContext {
            catalog: &catalog,
            engagement: &engagement,
            now: Utc::now(),
        };
        let interrupted = AtomicBool::new(false);
        run(&mut items, &registry, &config, &ctx, &interrupted).unwrap();
        run(&mut items, &registry, &config, &ctx, &interrupted).unwrap();

        let a1 = items.iter().find(|i| i.id() == "a1").unwrap();
        assert_eq!(a1.fields().get("bundle_weight").unwrap().values(), &[1]);
    }

    #[test]
    fn interruption_stops_the_pass() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());

        let config = enabled_config();
        let registry = ProcessorRegistry::with_builtins();
        let schema = provision(&config, &registry).unwrap();
        let store = ContentStore::open(dir.path()).unwrap();
        let mut items = build_items(&store, &config, &schema).unwrap();

        let catalog = config.catalog();
        let engagement = NoEngagement;
        let ctx = ProcessorContext {
            catalog: &catalog,
            engagement: &engagement,
            now: Utc::now(),
        };
        let interrupted = AtomicBool::new(true);
        let err = run(&mut items, &registry, &config, &ctx, &interrupted).unwrap_err();
        assert!(matches!(err, BallastError::Interrupted));
    }
}
