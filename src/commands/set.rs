//! `ballast set` command - submit weight assignments for a processor
//!
//! A submission covers the whole form: every rendered row plus the
//! overrides given on the command line, validated together. Any invalid
//! row rejects the submission and leaves the configuration untouched.

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use ballast_core::config::Config;
use ballast_core::error::{BallastError, Result};
use ballast_core::form::{render_weight_table, submit, RawRow};
use ballast_core::processor::ProcessorRegistry;
use ballast_core::records::escape_quotes;

pub struct SetOptions<'a> {
    pub processor: &'a str,
    pub assignments: &'a [String],
    pub default_weight: Option<i64>,
    pub enable: bool,
    pub disable: bool,
}

/// Execute the set command
pub fn execute(
    cli: &Cli,
    root: &Path,
    config_path: &Path,
    config: &mut Config,
    opts: SetOptions<'_>,
) -> Result<()> {
    let registry = ProcessorRegistry::with_builtins();
    let processor = registry.get(opts.processor)?;

    let index = config.index_descriptor();
    let catalog = config.catalog();
    let keys = processor.classification_keys(&index, &catalog);
    let current = config.processor(processor.id());

    let form = render_weight_table(
        processor.id(),
        &keys,
        &current.weight_table,
        current.default_weight,
    );
    let mut rows: Vec<RawRow> = form
        .rows
        .iter()
        .map(|r| RawRow::new(r.key.clone(), r.weight.to_string()))
        .collect();
    for assignment in opts.assignments {
        let Some((key, weight)) = assignment.split_once('=') else {
            return Err(BallastError::usage(format!(
                "invalid assignment {assignment:?} (expected KEY=WEIGHT)"
            )));
        };
        rows.push(RawRow::new(key, weight));
    }

    let table = submit(processor.id(), &rows, &keys)?;

    let entry = config.processor_mut(processor.id());
    entry.weight_table = table;
    if let Some(default_weight) = opts.default_weight {
        entry.default_weight = default_weight;
    }
    if opts.enable {
        entry.enabled = true;
    }
    if opts.disable {
        entry.enabled = false;
    }
    let enabled = entry.enabled;
    let entries = entry.weight_table.len();

    config.save(config_path)?;

    // The bundle destination field is administrator-managed, so enabling
    // bundle gets the reminder to declare it.
    let notice = (opts.enable && processor.id() == "bundle").then(|| {
        format!(
            "{} processor is enabled, you may add the {} field to your index to use this processor.",
            processor.label(),
            processor.target_field_id()
        )
    });

    output_result(cli, root, processor.id(), enabled, entries, notice)
}

fn output_result(
    cli: &Cli,
    root: &Path,
    processor_id: &str,
    enabled: bool,
    entries: usize,
    notice: Option<String>,
) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let mut output = serde_json::json!({
                "status": "ok",
                "processor": processor_id,
                "enabled": enabled,
                "entries": entries,
            });
            if let Some(notice) = &notice {
                if let Some(obj) = output.as_object_mut() {
                    obj.insert("notice".to_string(), serde_json::json!(notice));
                }
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Updated weight table for '{}' ({} entries)",
                    processor_id, entries
                );
            }
            if let Some(notice) = &notice {
                println!("{}", notice);
            }
        }
        OutputFormat::Records => {
            println!(
                "H ballast=1 records=1 root={} mode=set processor={} entries={} enabled={}",
                root.display(),
                processor_id,
                entries,
                enabled
            );
            if let Some(notice) = &notice {
                println!("D notice \"{}\"", escape_quotes(notice));
            }
        }
    }
    Ok(())
}
