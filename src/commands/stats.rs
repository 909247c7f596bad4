//! `ballast stats` commands - maintain and inspect the view counter
//!
//! `record` accumulates views for an item; `show` reports raw statistics
//! plus the engagement bucket they classify into right now.

use std::path::Path;

use chrono::Utc;

use crate::cli::{Cli, OutputFormat};
use ballast_core::config::Config;
use ballast_core::engagement::{classify, EngagementStats};
use ballast_core::error::{BallastError, Result};
use ballast_core::stats_db::StatsDb;

/// Execute the stats record command
pub fn record(cli: &Cli, root: &Path, config: &Config, id: &str, views: u64) -> Result<()> {
    let mut db = StatsDb::open(&config.stats_db_path(root))?;
    db.record_view(id, views)?;
    let stats = db.get(id)?.unwrap_or_default();

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "id": id,
                "total_views": stats.total_views,
                "recent_views": stats.recent_views,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Recorded {} views for '{}' (total: {})",
                    views, id, stats.total_views
                );
            }
        }
        OutputFormat::Records => {
            println!(
                "H ballast=1 records=1 root={} mode=stats_record id={} total={} recent={}",
                root.display(),
                id,
                stats.total_views,
                stats.recent_views
            );
        }
    }

    Ok(())
}

/// Execute the stats show command
pub fn show(cli: &Cli, root: &Path, config: &Config, id: Option<&str>) -> Result<()> {
    let db = StatsDb::open(&config.stats_db_path(root))?;
    let rows: Vec<(String, EngagementStats)> = match id {
        Some(id) => {
            let stats = db
                .get(id)?
                .ok_or_else(|| BallastError::not_found("view statistics", id))?;
            vec![(id.to_string(), stats)]
        }
        None => db.all()?,
    };
    let now = Utc::now();

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = rows
                .iter()
                .map(|(id, stats)| {
                    serde_json::json!({
                        "id": id,
                        "total_views": stats.total_views,
                        "recent_views": stats.recent_views,
                        "last_viewed": stats.last_viewed,
                        "bucket": classify(stats, now).id(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if rows.is_empty() {
                if !cli.quiet {
                    println!("No view statistics recorded");
                }
            } else {
                for (id, stats) in &rows {
                    let last = stats
                        .last_viewed
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{}: total={} recent={} last={} bucket={}",
                        id,
                        stats.total_views,
                        stats.recent_views,
                        last,
                        classify(stats, now).id()
                    );
                }
            }
        }
        OutputFormat::Records => {
            println!(
                "H ballast=1 records=1 root={} mode=stats_show items={}",
                root.display(),
                rows.len()
            );
            for (id, stats) in &rows {
                let last = stats
                    .last_viewed
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "S {} total={} recent={} last={} bucket={}",
                    id,
                    stats.total_views,
                    stats.recent_views,
                    last,
                    classify(stats, now).id()
                );
            }
        }
    }

    Ok(())
}
