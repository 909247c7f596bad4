//! `ballast processors` command - list registered processors
//!
//! Shows every processor in the registry with its enabled state, whether
//! the configured index supports it, and the destination field it stamps.

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use ballast_core::config::Config;
use ballast_core::error::Result;
use ballast_core::processor::ProcessorRegistry;
use ballast_core::records::escape_quotes;

/// Execute the processors command
pub fn execute(cli: &Cli, root: &Path, config: &Config) -> Result<()> {
    let registry = ProcessorRegistry::with_builtins();
    let index = config.index_descriptor();

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = registry
                .iter()
                .map(|p| {
                    let description = p
                        .property_definitions()
                        .first()
                        .map(|d| d.description)
                        .unwrap_or_default();
                    serde_json::json!({
                        "id": p.id(),
                        "label": p.label(),
                        "enabled": config.processor(p.id()).enabled,
                        "supported": p.supports_index(&index),
                        "target_field": p.target_field_id(),
                        "description": description,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            for p in registry.iter() {
                let enabled = if config.processor(p.id()).enabled {
                    "enabled"
                } else {
                    "disabled"
                };
                let support = if p.supports_index(&index) {
                    ""
                } else {
                    " (index unsupported)"
                };
                println!(
                    "{} [{}] {} -> {}{}",
                    p.id(),
                    enabled,
                    p.label(),
                    p.target_field_id(),
                    support
                );
            }
        }
        OutputFormat::Records => {
            println!(
                "H ballast=1 records=1 root={} mode=processors count={}",
                root.display(),
                registry.len()
            );
            for p in registry.iter() {
                println!(
                    "P {} enabled={} supported={} target={} \"{}\"",
                    p.id(),
                    config.processor(p.id()).enabled,
                    p.supports_index(&index),
                    p.target_field_id(),
                    escape_quotes(p.label())
                );
            }
        }
    }

    Ok(())
}
