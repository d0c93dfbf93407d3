use super::{LeaderboardStore, StoreOperation, StoreResult, StoreUnavailable};
use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

/// Redis sorted-set backed leaderboard store.
///
/// Each command runs on a clone of one auto-reconnecting multiplexed
/// connection and is bounded by `command_timeout`; expiry is reported as
/// `StoreUnavailable` like any other transport failure.
#[derive(Clone)]
pub struct RedisLeaderboardStore {
    connection: ConnectionManager,
    command_timeout: Duration,
}

impl RedisLeaderboardStore {
    pub async fn connect(redis_url: &str, command_timeout: Duration) -> Result<Self> {
        let client = Client::open(redis_url).context("failed to parse REDIS_URL connection string")?;

        let connection = timeout(command_timeout, ConnectionManager::new(client))
            .await
            .with_context(|| format!("timed out connecting to Redis after {:?}", command_timeout))?
            .context("failed to initialize Redis connection manager")?;

        info!(
            timeout_ms = command_timeout.as_millis() as u64,
            "Connected leaderboard store to Redis"
        );

        Ok(Self::from_manager(connection, command_timeout))
    }

    pub fn from_manager(connection: ConnectionManager, command_timeout: Duration) -> Self {
        Self {
            connection,
            command_timeout,
        }
    }

    async fn deadline<T, F>(&self, operation: StoreOperation, key: &str, future: F) -> StoreResult<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        bounded(self.command_timeout, operation, key, future).await
    }
}

/// Run one Redis command under `limit`, mapping failure and expiry to `StoreUnavailable`.
async fn bounded<T, F>(
    limit: Duration,
    operation: StoreOperation,
    key: &str,
    future: F,
) -> StoreResult<T>
where
    F: Future<Output = RedisResult<T>>,
{
    match timeout(limit, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            debug!(operation = %operation, key = key, error = %e, "Redis command failed");
            Err(StoreUnavailable::new(operation, key, e.to_string()))
        }
        Err(_) => {
            debug!(operation = %operation, key = key, "Redis command timed out");
            Err(StoreUnavailable::new(
                operation,
                key,
                format!("timed out after {:?}", limit),
            ))
        }
    }
}

fn to_index(value: u64) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

fn to_entries(raw: Vec<(String, f64)>) -> Vec<(String, i64)> {
    raw.into_iter()
        .map(|(member, score)| (member, score as i64))
        .collect()
}

#[async_trait]
impl LeaderboardStore for RedisLeaderboardStore {
    async fn increment_score(&self, key: &str, member: &str, delta: i64) -> StoreResult<i64> {
        let mut conn = self.connection.clone();
        let score: f64 = self
            .deadline(
                StoreOperation::IncrementScore,
                key,
                conn.zincr(key, member, delta),
            )
            .await?;
        Ok(score as i64)
    }

    async fn rank_descending(&self, key: &str, member: &str) -> StoreResult<Option<u64>> {
        let mut conn = self.connection.clone();
        self.deadline(
            StoreOperation::RankDescending,
            key,
            conn.zrevrank(key, member),
        )
        .await
    }

    async fn cardinality(&self, key: &str) -> StoreResult<u64> {
        let mut conn = self.connection.clone();
        self.deadline(StoreOperation::Cardinality, key, conn.zcard(key))
            .await
    }

    async fn range_descending_with_scores(
        &self,
        key: &str,
        start: u64,
        end: u64,
    ) -> StoreResult<Vec<(String, i64)>> {
        let mut conn = self.connection.clone();
        // ZREVRANGE key start end WITHSCORES
        let raw: Vec<(String, f64)> = self
            .deadline(
                StoreOperation::RangeDescending,
                key,
                conn.zrevrange_withscores(key, to_index(start), to_index(end)),
            )
            .await?;
        Ok(to_entries(raw))
    }

    async fn range_ascending_with_scores(
        &self,
        key: &str,
        start: u64,
        end: u64,
    ) -> StoreResult<Vec<(String, i64)>> {
        let mut conn = self.connection.clone();
        // ZRANGE key start end WITHSCORES
        let raw: Vec<(String, f64)> = self
            .deadline(
                StoreOperation::RangeAscending,
                key,
                conn.zrange_withscores(key, to_index(start), to_index(end)),
            )
            .await?;
        Ok(to_entries(raw))
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.connection.clone();
        let _: String = self
            .deadline(
                StoreOperation::Ping,
                "",
                redis::cmd("PING").query_async(&mut conn),
            )
            .await?;
        Ok(())
    }
}
