//! `ballast table` command - render a processor's weight-table form
//!
//! Rows carry every known classification key with its effective weight,
//! ordered ascending by weight; equal weights keep the catalog's
//! enumeration order.

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use ballast_core::config::Config;
use ballast_core::error::Result;
use ballast_core::form::render_weight_table;
use ballast_core::processor::ProcessorRegistry;
use ballast_core::records::escape_quotes;

/// Execute the table command
pub fn execute(cli: &Cli, root: &Path, config: &Config, processor_id: &str) -> Result<()> {
    let registry = ProcessorRegistry::with_builtins();
    let processor = registry.get(processor_id)?;

    let index = config.index_descriptor();
    let catalog = config.catalog();
    let entry = config.processor(processor.id());
    let keys = processor.classification_keys(&index, &catalog);

    let form = render_weight_table(processor.id(), &keys, &entry.weight_table, entry.default_weight);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&form)?);
        }
        OutputFormat::Human => {
            if form.rows.is_empty() {
                if !cli.quiet {
                    println!(
                        "No classification keys for processor '{}'",
                        form.processor
                    );
                }
            } else {
                println!(
                    "Weight table for '{}' (default weight: {})",
                    form.processor, form.default_weight
                );
                for row in &form.rows {
                    println!("  {} = {} ({})", row.key, row.weight, row.label);
                }
            }
        }
        OutputFormat::Records => {
            println!(
                "H ballast=1 records=1 root={} mode=table processor={} rows={} default={}",
                root.display(),
                form.processor,
                form.rows.len(),
                form.default_weight
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
