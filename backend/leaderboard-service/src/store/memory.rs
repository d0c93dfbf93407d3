use super::{LeaderboardStore, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process leaderboard store for local runs and tests.
///
/// Mirrors Redis sorted-set ordering, including the member tie-break, so
/// results match `RedisLeaderboardStore` for the same data. State lives
/// only as long as the process.
#[derive(Clone, Default)]
pub struct MemoryLeaderboardStore {
    boards: Arc<RwLock<HashMap<String, HashMap<String, i64>>>>,
}

impl MemoryLeaderboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one member's score, `None` when absent.
    pub async fn score(&self, key: &str, member: &str) -> Option<i64> {
        let boards = self.boards.read().await;
        boards.get(key).and_then(|board| board.get(member).copied())
    }

    async fn sorted(&self, key: &str, descending: bool) -> Vec<(String, i64)> {
        let boards = self.boards.read().await;
        let mut entries: Vec<(String, i64)> = match boards.get(key) {
            Some(board) => board
                .iter()
                .map(|(member, score)| (member.clone(), *score))
                .collect(),
            None => return Vec::new(),
        };

        entries.sort_by(|a, b| {
            let ord = a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0));
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        entries
    }
}

fn slice_inclusive(entries: Vec<(String, i64)>, start: u64, end: u64) -> Vec<(String, i64)> {
    let len = entries.len() as u64;
    if len == 0 || start >= len || start > end {
        return Vec::new();
    }
    let last = end.min(len - 1);
    entries
        .into_iter()
        .skip(start as usize)
        .take((last - start + 1) as usize)
        .collect()
}

#[async_trait]
impl LeaderboardStore for MemoryLeaderboardStore {
    async fn increment_score(&self, key: &str, member: &str, delta: i64) -> StoreResult<i64> {
        let mut boards = self.boards.write().await;
        let score = boards
            .entry(key.to_string())
            .or_default()
            .entry(member.to_string())
            .or_insert(0);
        *score = score.saturating_add(delta);
        Ok(*score)
    }

    async fn rank_descending(&self, key: &str, member: &str) -> StoreResult<Option<u64>> {
        let position = self
            .sorted(key, true)
            .await
            .iter()
            .position(|(candidate, _)| candidate == member);
        Ok(position.map(|p| p as u64))
    }

    async fn cardinality(&self, key: &str) -> StoreResult<u64> {
        let boards = self.boards.read().await;
        Ok(boards.get(key).map_or(0, |board| board.len() as u64))
    }

    async fn range_descending_with_scores(
        &self,
        key: &str,
        start: u64,
        end: u64,
    ) -> StoreResult<Vec<(String, i64)>> {
        Ok(slice_inclusive(self.sorted(key, true).await, start, end))
    }

    async fn range_ascending_with_scores(
        &self,
        key: &str,
        start: u64,
        end: u64,
    ) -> StoreResult<Vec<(String, i64)>> {
        Ok(slice_inclusive(self.sorted(key, false).await, start, end))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> MemoryLeaderboardStore {
        let store = MemoryLeaderboardStore::new();
        for (member, score) in [("a", 50), ("b", 30), ("c", 30), ("d", 10)] {
            store.increment_score("board", member, score).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_increment_creates_and_accumulates() {
        let store = MemoryLeaderboardStore::new();
        assert_eq!(store.increment_score("board", "a", 5).await.unwrap(), 5);
        assert_eq!(store.increment_score("board", "a", 7).await.unwrap(), 12);
        assert_eq!(store.score("board", "a").await, Some(12));
    }

    #[tokio::test]
    async fn test_increment_saturates_instead_of_overflowing() {
        let store = MemoryLeaderboardStore::new();
        store.increment_score("board", "a", i64::MAX - 1).await.unwrap();
        assert_eq!(
            store.increment_score("board", "a", 10).await.unwrap(),
            i64::MAX
        );
    }

    #[tokio::test]
    async fn test_descending_ties_break_on_member_desc() {
        let store = seeded().await;
        let members: Vec<String> = store
            .range_descending_with_scores("board", 0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(members, vec!["a", "c", "b", "d"]);
        assert_eq!(store.rank_descending("board", "c").await.unwrap(), Some(1));
        assert_eq!(store.rank_descending("board", "b").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_ascending_range() {
        let store = seeded().await;
        let members: Vec<String> = store
            .range_ascending_with_scores("board", 0, 3)
            .await
            .unwrap()
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(members, vec!["d", "b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_missing_key_and_out_of_range() {
        let store = seeded().await;
        assert_eq!(store.cardinality("missing").await.unwrap(), 0);
        assert_eq!(store.rank_descending("missing", "a").await.unwrap(), None);
        assert!(store
            .range_descending_with_scores("missing", 0, 5)
            .await
            .unwrap()
            .is_empty());
        assert!(store
            .range_descending_with_scores("board", 4, 9)
            .await
            .unwrap()
            .is_empty());
        assert!(store
            .range_descending_with_scores("board", 2, 1)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            store
                .range_descending_with_scores("board", 2, 100)
                .await
                .unwrap()
                .len(),
            2
        );
    }
}
