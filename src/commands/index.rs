//! `ballast index` command - run the indexing pipeline and stamp weights
//!
//! Builds items from the content store, provisions destination fields in
//! memory, then stamps the resolved weight for every enabled processor.
//! Interruptible between items via ctrl-c.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::cli::{Cli, OutputFormat};
use ballast_core::config::Config;
use ballast_core::error::Result;
use ballast_core::item::Item;
use ballast_core::pipeline::{build_items, provision, run};
use ballast_core::processor::{ProcessorContext, ProcessorRegistry};
use ballast_core::records::escape_quotes;
use ballast_core::stats_db::{EngagementSource, NoEngagement, StatsDb};
use ballast_core::store::ContentStore;

/// Execute the index command
pub fn execute(cli: &Cli, root: &Path, config: &Config, out: Option<&Path>) -> Result<()> {
    let registry = ProcessorRegistry::with_builtins();
    let store = ContentStore::open(&config.content_path(root))?;
    let schema = provision(config, &registry)?;
    let mut items = build_items(&store, config, &schema)?;

    let catalog = config.catalog();
    let engagement: Box<dyn EngagementSource> = if config.processor("stats").enabled {
        Box::new(StatsDb::open(&config.stats_db_path(root))?)
    } else {
        Box::new(NoEngagement)
    };

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);
    let _ = ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    });

    let ctx = ProcessorContext {
        catalog: &catalog,
        engagement: &*engagement,
        now: Utc::now(),
    };
    run(&mut items, &registry, config, &ctx, &interrupted)?;

    if let Some(out_path) = out {
        write_jsonl(out_path, &items)?;
    }

    output_summary(cli, root, config, &registry, &items)
}

fn item_json(item: &Item) -> serde_json::Value {
    let fields: serde_json::Map<String, serde_json::Value> = item
        .fields()
        .iter()
        .map(|f| (f.id().to_string(), serde_json::json!(f.values())))
        .collect();
    serde_json::json!({
        "id": item.id(),
        "datasource": item.datasource(),
        "entity_kind": item.entity_kind(),
        "bundle": item.bundle(),
        "title": item.title(),
        "author_role": item.author_role(),
        "fields": fields,
    })
}

fn write_jsonl(path: &Path, items: &[Item]) -> Result<()> {
    let mut lines = String::new();
    for item in items {
        lines.push_str(&serde_json::to_string(&item_json(item))?);
        lines.push('\n');
    }
    fs::write(path, lines)?;
    Ok(())
}

fn output_summary(
    cli: &Cli,
    root: &Path,
    config: &Config,
    registry: &ProcessorRegistry,
    items: &[Item],
) -> Result<()> {
    let mut by_bundle: BTreeMap<&str, usize> = BTreeMap::new();
    for item in items {
        *by_bundle.entry(item.bundle()).or_default() += 1;
    }

    let enabled: Vec<_> = registry
        .iter()
        .filter(|p| config.processor(p.id()).enabled)
        .collect();
    let stamped: Vec<(&'static str, usize)> = enabled
        .iter()
        .map(|p| {
            let count = items
                .iter()
                .filter(|i| {
                    i.fields()
                        .get(p.target_field_id())
                        .is_some_and(|f| !f.values().is_empty())
                })
                .count();
            (p.target_field_id(), count)
        })
        .collect();

    match cli.format {
        OutputFormat::Json => {
            let docs: Vec<_> = items.iter().map(item_json).collect();
            let output = serde_json::json!({
                "status": "ok",
                "count": items.len(),
                "items": docs,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Indexed {} items from {}",
                    items.len(),
                    config.content_path(root).display()
                );
                for (bundle, count) in &by_bundle {
                    println!("  {}: {}", bundle, count);
                }
                for (field, count) in &stamped {
                    println!("  {} stamped on {} items", field, count);
                }
            }
        }
        OutputFormat::Records => {
            println!(
                "H ballast=1 records=1 root={} mode=index items={} processors={}",
                root.display(),
                items.len(),
                enabled.len()
            );
            for item in items {
                let weights: Vec<String> = item
                    .fields()
                    .iter()
                    .filter_map(|f| f.values().first().map(|w| format!(" {}={}", f.id(), w)))
                    .collect();
                println!(
                    "I {} {} \"{}\"{}",
                    item.id(),
                    item.bundle(),
                    escape_quotes(item.title()),
                    weights.concat()
                );
            }
        }
    }

    Ok(())
}
