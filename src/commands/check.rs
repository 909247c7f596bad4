//! `ballast check` command - validate configuration and provision fields
//!
//! Runs every enabled processor's pre-index-save step against the declared
//! schema. Role and stats provision their hidden destination fields; bundle
//! verifies its administrator-managed field and fails the check when it is
//! missing or mistyped. Provisioned fields are persisted back to the
//! configuration so the declared schema matches what index runs expect.

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use ballast_core::config::Config;
use ballast_core::error::Result;
use ballast_core::pipeline::provision;
use ballast_core::processor::ProcessorRegistry;
use ballast_core::records::escape_quotes;
use ballast_core::schema::IndexSchema;

/// Execute the check command
pub fn execute(cli: &Cli, root: &Path, config_path: &Path, config: &mut Config) -> Result<()> {
    let registry = ProcessorRegistry::with_builtins();
    let index = config.index_descriptor();

    let schema = provision(config, &registry)?;

    // An enabled processor the index cannot feed is a warning, not a
    // failure; it simply never stamps anything.
    let warnings: Vec<String> = registry
        .iter()
        .filter(|p| config.processor(p.id()).enabled && !p.supports_index(&index))
        .map(|p| {
            format!(
                "processor '{}' is enabled but the index has no datasource it supports",
                p.id()
            )
        })
        .collect();

    let checked: Vec<(&'static str, &'static str, bool)> = registry
        .iter()
        .filter(|p| config.processor(p.id()).enabled)
        .map(|p| {
            let hidden = schema
                .field(p.target_field_id())
                .map(|f| f.hidden())
                .unwrap_or(false);
            (p.id(), p.target_field_id(), hidden)
        })
        .collect();

    config.apply_schema(&schema);
    config.save(config_path)?;

    match cli.format {
        OutputFormat::Json => {
            let processors: Vec<_> = checked
                .iter()
                .map(|(id, target, hidden)| {
                    serde_json::json!({
                        "id": id,
                        "target_field": target,
                        "hidden": hidden,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "status": "ok",
                "index": index.id,
                "processors": processors,
                "warnings": warnings,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if checked.is_empty() {
                if !cli.quiet {
                    println!("No processors enabled");
                }
            } else if !cli.quiet {
                println!(
                    "Checked {} processors against index '{}'",
                    checked.len(),
                    index.id
                );
                for (id, target, hidden) in &checked {
                    let marker = if *hidden { " (hidden)" } else { "" };
                    println!("  {} -> {}{}", id, target, marker);
                }
            }
            for warning in &warnings {
                eprintln!("warning: {}", warning);
            }
        }
        OutputFormat::Records => {
            println!(
                "H ballast=1 records=1 root={} mode=check index={} processors={} status=ok",
                root.display(),
                index.id,
                checked.len()
            );
            for (id, target, hidden) in &checked {
                println!("C {} target={} hidden={}", id, target, hidden);
            }
            for warning in &warnings {
                println!("D warning \"{}\"", escape_quotes(warning));
            }
        }
    }

    Ok(())
}
