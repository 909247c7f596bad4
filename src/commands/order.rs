//! `ballast order` command - reassign weights from a display order
//!
//! The drag-to-reorder analog: listed keys get weights 0, 1, 2, ... in the
//! order given, and known keys not listed continue the sequence in
//! enumeration order.

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use ballast_core::config::Config;
use ballast_core::error::Result;
use ballast_core::form::{normalize_order, render_weight_table};
use ballast_core::processor::ProcessorRegistry;
use ballast_core::records::escape_quotes;

/// Execute the order command
pub fn execute(
    cli: &Cli,
    root: &Path,
    config_path: &Path,
    config: &mut Config,
    processor_id: &str,
    keys: &[String],
) -> Result<()> {
    let registry = ProcessorRegistry::with_builtins();
    let processor = registry.get(processor_id)?;

    let index = config.index_descriptor();
    let catalog = config.catalog();
    let known = processor.classification_keys(&index, &catalog);

    let table = normalize_order(processor.id(), keys, &known)?;

    let entry = config.processor_mut(processor.id());
    entry.weight_table = table;
    let default_weight = entry.default_weight;
    let form = render_weight_table(processor.id(), &known, &entry.weight_table, default_weight);

    config.save(config_path)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&form)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Reordered weight table for '{}'", form.processor);
                for row in &form.rows {
                    println!("  {} = {} ({})", row.key, row.weight, row.label);
                }
            }
        }
        OutputFormat::Records => {
            println!(
                "H ballast=1 records=1 root={} mode=order processor={} rows={}",
                root.display(),
                form.processor,
                form.rows.len()
            );
            for row in &form.rows {
                println!(
                    "R {} {} draggable={} \"{}\"",
                    row.key,
                    row.weight,
                    row.draggable,
                    escape_quotes(&row.label)
                );
            }
        }
    }

    Ok(())
}
