//! Command dispatch logic for ballast

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::{Cli, Commands, StatsCommands};
use crate::commands;
use ballast_core::config::Config;
use ballast_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    // Determine the project root directory
    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if cli.verbose {
        eprintln!("resolve_root: {:?}", start.elapsed());
    }

    match &cli.command {
        None => handle_no_command(),

        Some(Commands::Init { with_sample, force }) => {
            commands::init::execute(cli, &root, *with_sample, *force)
        }

        Some(Commands::Processors) => handle_processors(cli, &root, start),

        Some(Commands::Table { processor }) => handle_table(cli, &root, processor, start),

        Some(Commands::Set {
            processor,
            assignments,
            default_weight,
            enable,
            disable,
        }) => handle_set(
            cli,
            &root,
            processor,
            assignments,
            *default_weight,
            *enable,
            *disable,
            start,
        ),

        Some(Commands::Order { processor, keys }) => {
            handle_order(cli, &root, processor, keys, start)
        }

        Some(Commands::Check) => handle_check(cli, &root, start),

        Some(Commands::Index { out }) => handle_index(cli, &root, out.as_deref(), start),

        Some(Commands::Stats { command }) => handle_stats(cli, &root, command, start),
    }
}

/// Resolve the configuration file path from the global flags.
fn config_path(cli: &Cli, root: &Path) -> PathBuf {
    match &cli.config {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => root.join(path),
        None => Config::path_in(root),
    }
}

fn load_config(cli: &Cli, root: &Path, start: Instant) -> Result<(PathBuf, Config)> {
    let path = config_path(cli, root);
    let config = Config::load(&path)?;
    if cli.verbose {
        eprintln!("load_config: {:?}", start.elapsed());
    }
    Ok((path, config))
}

// ============================================================================
// Command Handlers
// ============================================================================

fn handle_no_command() -> Result<()> {
    println!("ballast {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Sort-priority weighting for search indexing pipelines.");
    println!();
    println!("Run `ballast --help` for usage information.");
    Ok(())
}

fn handle_processors(cli: &Cli, root: &Path, start: Instant) -> Result<()> {
    let (_, config) = load_config(cli, root, start)?;
    commands::processors::execute(cli, root, &config)
}

fn handle_table(cli: &Cli, root: &Path, processor: &str, start: Instant) -> Result<()> {
    let (_, config) = load_config(cli, root, start)?;
    commands::table::execute(cli, root, &config, processor)
}

#[allow(clippy::too_many_arguments)]
fn handle_set(
    cli: &Cli,
    root: &Path,
    processor: &str,
    assignments: &[String],
    default_weight: Option<i64>,
    enable: bool,
    disable: bool,
    start: Instant,
) -> Result<()> {
    let (path, mut config) = load_config(cli, root, start)?;
    commands::set::execute(
        cli,
        root,
        &path,
        &mut config,
        commands::set::SetOptions {
            processor,
            assignments,
            default_weight,
            enable,
            disable,
        },
    )
}

fn handle_order(
    cli: &Cli,
    root: &Path,
    processor: &str,
    keys: &[String],
    start: Instant,
) -> Result<()> {
    let (path, mut config) = load_config(cli, root, start)?;
    commands::order::execute(cli, root, &path, &mut config, processor, keys)
}

fn handle_check(cli: &Cli, root: &Path, start: Instant) -> Result<()> {
    let (path, mut config) = load_config(cli, root, start)?;
    commands::check::execute(cli, root, &path, &mut config)
}

fn handle_index(cli: &Cli, root: &Path, out: Option<&Path>, start: Instant) -> Result<()> {
    let (_, config) = load_config(cli, root, start)?;
    commands::index::execute(cli, root, &config, out)
}

fn handle_stats(cli: &Cli, root: &Path, command: &StatsCommands, start: Instant) -> Result<()> {
    let (_, config) = load_config(cli, root, start)?;
    match command {
        StatsCommands::Record { id, views } => {
            commands::stats::record(cli, root, &config, id, *views)
        }
        StatsCommands::Show { id } => commands::stats::show(cli, root, &config, id.as_deref()),
    }
}
