// ============================================
// Leaderboard Store Module
// ============================================
//
// Ordered-set primitives the ranking service needs, with the
// remote wire details kept behind `LeaderboardStore`.
//
// Ordering contract shared by every implementation:
// - Descending commands order by score desc, then member desc (byte order)
// - Ascending commands order by score asc, then member asc
// This is the order Redis uses for ZREVRANGE/ZREVRANK and ZRANGE.

pub mod memory;
pub mod redis_store;

pub use memory::MemoryLeaderboardStore;
pub use redis_store::RedisLeaderboardStore;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Primitive command issued against the store, named after its Redis verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    IncrementScore,
    RankDescending,
    Cardinality,
    RangeDescending,
    RangeAscending,
    Ping,
}

impl StoreOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOperation::IncrementScore => "ZINCRBY",
            StoreOperation::RankDescending => "ZREVRANK",
            StoreOperation::Cardinality => "ZCARD",
            StoreOperation::RangeDescending => "ZREVRANGE",
            StoreOperation::RangeAscending => "ZRANGE",
            StoreOperation::Ping => "PING",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only failure a store primitive reports: network, timeout or protocol
/// trouble talking to the backing store. Never retried at this layer.
#[derive(Debug, Clone, Error)]
#[error("leaderboard store unavailable: {operation} {key}: {reason}")]
pub struct StoreUnavailable {
    pub operation: StoreOperation,
    pub key: String,
    pub reason: String,
}

impl StoreUnavailable {
    pub fn new(operation: StoreOperation, key: &str, reason: impl Into<String>) -> Self {
        Self {
            operation,
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreUnavailable>;

/// Ordered-set capability over named leaderboards.
///
/// Ranges are inclusive, 0-indexed and never fail for a missing key or an
/// out-of-range window; they return an empty or shorter sequence instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Atomically add `delta` to `member`, creating it when absent. Returns the new score.
    async fn increment_score(&self, key: &str, member: &str, delta: i64) -> StoreResult<i64>;

    /// 0-indexed position in descending score order, `None` when absent.
    async fn rank_descending(&self, key: &str, member: &str) -> StoreResult<Option<u64>>;

    /// Number of members, 0 for a missing key.
    async fn cardinality(&self, key: &str) -> StoreResult<u64>;

    async fn range_descending_with_scores(
        &self,
        key: &str,
        start: u64,
        end: u64,
    ) -> StoreResult<Vec<(String, i64)>>;

    async fn range_ascending_with_scores(
        &self,
        key: &str,
        start: u64,
        end: u64,
    ) -> StoreResult<Vec<(String, i64)>>;

    /// Round trip used by readiness checks.
    async fn ping(&self) -> StoreResult<()>;
}
