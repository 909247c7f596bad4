//! SQLite-backed view counter
//!
//! One row per item: lifetime views, recent views, and the last view
//! timestamp (RFC 3339). The recent-views window is maintained by whoever
//! feeds the counter; ballast only reads and accumulates.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::engagement::EngagementStats;
use crate::error::{BallastError, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS view_counter (
    item_id      TEXT PRIMARY KEY,
    total_views  INTEGER NOT NULL DEFAULT 0,
    recent_views INTEGER NOT NULL DEFAULT 0,
    last_viewed  TEXT
);
";

/// Read side of the view counter, so tests can substitute a fixed source.
pub trait EngagementSource {
    /// Statistics for one item. `None` when the counter has no row; callers
    /// treat that as zero stats.
    fn stats_for(&self, item_id: &str) -> Result<Option<EngagementStats>>;
}

/// Engagement source with no data, used when the stats processor is
/// disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEngagement;

impl EngagementSource for NoEngagement {
    fn stats_for(&self, _item_id: &str) -> Result<Option<EngagementStats>> {
        Ok(None)
    }
}

/// View counter stored in a SQLite database.
#[derive(Debug)]
pub struct StatsDb {
    conn: Connection,
}

impl StatsDb {
    /// Open or create the counter database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path).map_err(|e| {
            BallastError::db_operation("open view counter", format!("{}: {}", path.display(), e))
        })?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| BallastError::db_operation("create view counter schema", e))?;
        Ok(Self { conn })
    }

    /// In-memory counter for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| BallastError::db_operation("open view counter", e))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| BallastError::db_operation("create view counter schema", e))?;
        Ok(Self { conn })
    }

    /// Record `views` additional views of an item, stamping the view time.
    pub fn record_view(&mut self, item_id: &str, views: u64) -> Result<()> {
        self.record_view_at(item_id, views, Utc::now())
    }

    /// Like [`record_view`](Self::record_view) with an explicit timestamp.
    pub fn record_view_at(
        &mut self,
        item_id: &str,
        views: u64,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let views = i64::try_from(views)
            .map_err(|_| BallastError::db_operation("record view", "view count out of range"))?;
        self.conn
            .execute(
                "INSERT INTO view_counter (item_id, total_views, recent_views, last_viewed)
                 VALUES (?1, ?2, ?2, ?3)
                 ON CONFLICT(item_id) DO UPDATE SET
                     total_views = total_views + excluded.total_views,
                     recent_views = recent_views + excluded.recent_views,
                     last_viewed = excluded.last_viewed",
                params![item_id, views, at.to_rfc3339()],
            )
            .map_err(|e| BallastError::db_operation("record view", e))?;
        Ok(())
    }

    /// Statistics for one item, if the counter has seen it.
    pub fn get(&self, item_id: &str) -> Result<Option<EngagementStats>> {
        self.conn
            .query_row(
                "SELECT total_views, recent_views, last_viewed
                 FROM view_counter WHERE item_id = ?1",
                params![item_id],
                row_to_stats,
            )
            .optional()
            .map_err(|e| BallastError::db_operation("read view counter", e))
    }

    /// All counter rows, ordered by item id.
    pub fn all(&self) -> Result<Vec<(String, EngagementStats)>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT item_id, total_views, recent_views, last_viewed
                 FROM view_counter ORDER BY item_id",
            )
            .map_err(|e| BallastError::db_operation("read view counter", e))?;
        let rows = stmt
            .query_map([], |row| {
                let item_id: String = row.get(0)?;
                let total: i64 = row.get(1)?;
                let recent: i64 = row.get(2)?;
                let last: Option<String> = row.get(3)?;
                Ok((item_id, build_stats(total, recent, last)))
            })
            .map_err(|e| BallastError::db_operation("read view counter", e))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| BallastError::db_operation("read view counter", e))?);
        }
        Ok(out)
    }
}

impl EngagementSource for StatsDb {
    fn stats_for(&self, item_id: &str) -> Result<Option<EngagementStats>> {
        self.get(item_id)
    }
}

fn row_to_stats(row: &rusqlite::Row<'_>) -> rusqlite::Result<EngagementStats> {
    let total: i64 = row.get(0)?;
    let recent: i64 = row.get(1)?;
    let last: Option<String> = row.get(2)?;
    Ok(build_stats(total, recent, last))
}

fn build_stats(total: i64, recent: i64, last_viewed: Option<String>) -> EngagementStats {
    EngagementStats {
        total_views: total.max(0) as u64,
        recent_views: recent.max(0) as u64,
        last_viewed: last_viewed
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)),
    }
}
