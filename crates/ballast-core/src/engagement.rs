//! Engagement statistics and the bucket classification rule

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Recent views at or above this threshold mark an item as trending.
pub const TRENDING_MIN_RECENT: u64 = 50;

/// Total views at or above this threshold mark an item as popular.
pub const POPULAR_MIN_TOTAL: u64 = 10_000;

/// Total views at or above this threshold mark an item as steady.
pub const STEADY_MIN_TOTAL: u64 = 100;

/// Days without a view after which an item goes dormant.
pub const DORMANT_AFTER_DAYS: i64 = 30;

/// View statistics for one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementStats {
    pub total_views: u64,
    pub recent_views: u64,
    pub last_viewed: Option<DateTime<Utc>>,
}

/// Canonical engagement tiers derived from view statistics.
///
/// The bucket id is the classification key the stats processor resolves
/// weights with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Trending,
    Dormant,
    Popular,
    Steady,
    Quiet,
}

impl Bucket {
    /// All buckets in canonical order.
    pub fn all() -> [Bucket; 5] {
        [
            Bucket::Trending,
            Bucket::Dormant,
            Bucket::Popular,
            Bucket::Steady,
            Bucket::Quiet,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Bucket::Trending => "trending",
            Bucket::Dormant => "dormant",
            Bucket::Popular => "popular",
            Bucket::Steady => "steady",
            Bucket::Quiet => "quiet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Trending => "Trending",
            Bucket::Dormant => "Dormant",
            Bucket::Popular => "Popular",
            Bucket::Steady => "Steady",
            Bucket::Quiet => "Quiet",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Classify an item's statistics into its engagement bucket.
///
/// Rules are checked in order: trending, dormant, popular, steady; anything
/// left is quiet. An item with recorded views but no view timestamp never
/// goes dormant on age alone.
pub fn classify(stats: &EngagementStats, now: DateTime<Utc>) -> Bucket {
    if stats.recent_views >= TRENDING_MIN_RECENT {
        return Bucket::Trending;
    }
    if stats.total_views == 0 {
        return Bucket::Dormant;
    }
    if let Some(last) = stats.last_viewed {
        if now.signed_duration_since(last) > Duration::days(DORMANT_AFTER_DAYS) {
            return Bucket::Dormant;
        }
    }
    if stats.total_views >= POPULAR_MIN_TOTAL {
        return Bucket::Popular;
    }
    if stats.total_views >= STEADY_MIN_TOTAL {
        return Bucket::Steady;
    }
    Bucket::Quiet
}
