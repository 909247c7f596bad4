//! CLI argument parsing for ballast
//!
//! Uses clap for argument parsing.
//! Supports global flags: --root, --config, --format, --quiet, --verbose

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use output::OutputFormat;

/// Ballast - sort-priority weighting CLI for search indexing pipelines
#[derive(Parser, Debug)]
#[command(name = "ballast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the project
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace) or filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON to stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new ballast project
    Init {
        /// Also write a small sample content corpus
        #[arg(long)]
        with_sample: bool,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// List registered processors and their state
    Processors,

    /// Render a processor's weight-table form
    Table {
        /// Processor id (bundle, role, stats)
        processor: String,
    },

    /// Submit weight assignments for a processor
    Set {
        /// Processor id (bundle, role, stats)
        processor: String,

        /// Weight assignments (can be repeated)
        #[arg(value_name = "KEY=WEIGHT")]
        assignments: Vec<String>,

        /// Fallback weight for keys without a table entry
        #[arg(long)]
        default_weight: Option<i64>,

        /// Enable the processor
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Disable the processor
        #[arg(long)]
        disable: bool,
    },

    /// Reassign weights from a display order
    Order {
        /// Processor id (bundle, role, stats)
        processor: String,

        /// Keys in display order; the first key gets the lowest weight
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Validate configuration and provision destination fields
    Check,

    /// Run the indexing pipeline and stamp weights
    Index {
        /// Write stamped items as JSON lines to a file
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Maintain and inspect the view counter
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },
}

/// Stats subcommands
#[derive(Subcommand, Debug)]
pub enum StatsCommands {
    /// Record views for an item
    Record {
        /// Item id
        id: String,

        /// Number of views to add
        #[arg(long, default_value = "1")]
        views: u64,
    },

    /// Show view statistics
    Show {
        /// Item id (all items when omitted)
        id: Option<String>,
    },
}
