use super::keys::LeaderboardSelector;
use super::neighborhood::{adjacent_window, is_last_in_organization, SMALL_COHORT_SIZE};
use crate::error::{RankError, Result};
use crate::models::{ContributionEvent, Member, OrganizationType, ProfileRank, RankEntry};
use crate::store::LeaderboardStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Ranking service: maps contribution events and rank queries onto leaderboards.
///
/// Holds no mutable state; clones share the injected store.
#[derive(Clone)]
pub struct RankService {
    store: Arc<dyn LeaderboardStore>,
}

impl RankService {
    pub fn new(store: Arc<dyn LeaderboardStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn LeaderboardStore> {
        &self.store
    }

    /// Leaderboards an event touches, in increment order.
    pub fn contribution_targets(event: &ContributionEvent) -> Vec<LeaderboardSelector> {
        let mut targets = vec![LeaderboardSelector::Global];
        if let Some(organization_id) = event.organization_id {
            targets.push(LeaderboardSelector::Organization(organization_id));
            if let Some(organization_type) = event.organization_type {
                targets.push(LeaderboardSelector::OrganizationType(organization_type));
            }
        }
        targets
    }

    /// Add `event.amount` to every leaderboard the event touches.
    ///
    /// Increments are independent: when one fails, the ones before it stay
    /// applied and the failure is returned as `RankError::Update`. Events are
    /// not deduplicated.
    pub async fn record_contribution(&self, event: &ContributionEvent) -> Result<()> {
        if event.organization_id.is_some() && event.organization_type.is_none() {
            warn!(
                member_id = %event.member_id,
                "Contribution has an organization but no organization type; skipping type leaderboard"
            );
        }

        let targets = Self::contribution_targets(event);
        for (applied, target) in targets.iter().enumerate() {
            let key = target.key();
            if let Err(cause) = self
                .store
                .increment_score(&key, &event.member_id, event.amount)
                .await
            {
                if applied > 0 {
                    warn!(
                        member_id = %event.member_id,
                        applied = applied,
                        failed_key = %key,
                        "Contribution partially applied"
                    );
                }
                return Err(RankError::Update(cause));
            }
        }

        debug!(
            member_id = %event.member_id,
            amount = event.amount,
            leaderboards = targets.len(),
            "Recorded contribution"
        );

        Ok(())
    }

    /// Inclusive 0-based window of a leaderboard, highest score first.
    pub async fn window(
        &self,
        selector: LeaderboardSelector,
        start: u64,
        end: u64,
    ) -> Result<Vec<RankEntry>> {
        let entries = self
            .store
            .range_descending_with_scores(&selector.key(), start, end)
            .await
            .map_err(RankError::Read)?;

        Ok(entries.into_iter().map(RankEntry::from).collect())
    }

    pub async fn global_window(&self, start: u64, end: u64) -> Result<Vec<RankEntry>> {
        self.window(LeaderboardSelector::Global, start, end).await
    }

    pub async fn organization_type_window(
        &self,
        organization_type: OrganizationType,
        start: u64,
        end: u64,
    ) -> Result<Vec<RankEntry>> {
        self.window(
            LeaderboardSelector::OrganizationType(organization_type),
            start,
            end,
        )
        .await
    }

    pub async fn organization_window(
        &self,
        organization_id: i64,
        start: u64,
        end: u64,
    ) -> Result<Vec<RankEntry>> {
        self.window(LeaderboardSelector::Organization(organization_id), start, end)
            .await
    }

    /// 1-indexed global rank, 0 when the member has no score.
    pub async fn global_rank(&self, member_id: &str) -> Result<u64> {
        let position = self.position(&LeaderboardSelector::Global.key(), member_id).await?;
        Ok(to_rank(position))
    }

    /// Member rank plus up to three neighbors from the member's organization.
    pub async fn profile_rank(&self, member: &Member) -> Result<ProfileRank> {
        let Some(organization) = &member.organization else {
            return Ok(ProfileRank::empty());
        };

        let organization_key = LeaderboardSelector::Organization(organization.id).key();
        let total = self
            .store
            .cardinality(&organization_key)
            .await
            .map_err(RankError::Read)?;
        let rank = to_rank(
            self.position(&LeaderboardSelector::Global.key(), &member.github_id)
                .await?,
        );
        let organization_position = self.position(&organization_key, &member.github_id).await?;

        let neighbors = if total <= SMALL_COHORT_SIZE {
            if total == 0 {
                Vec::new()
            } else {
                self.store
                    .range_ascending_with_scores(&organization_key, 0, total - 1)
                    .await
                    .map_err(RankError::Read)?
            }
        } else {
            let (start, end) = adjacent_window(organization_position.unwrap_or(0), total);
            self.store
                .range_descending_with_scores(&organization_key, start, end)
                .await
                .map_err(RankError::Read)?
        };

        let organization_rank = to_rank(organization_position);
        let profile = ProfileRank {
            neighbors: neighbors.into_iter().map(|(member_id, _)| member_id).collect(),
            rank,
            organization_rank,
            is_last: is_last_in_organization(organization_rank, total),
        };

        info!(
            member_id = %member.github_id,
            organization_id = organization.id,
            total = total,
            rank = profile.rank,
            organization_rank = profile.organization_rank,
            "Computed profile rank"
        );

        Ok(profile)
    }

    async fn position(&self, key: &str, member_id: &str) -> Result<Option<u64>> {
        self.store
            .rank_descending(key, member_id)
            .await
            .map_err(RankError::Read)
    }
}

fn to_rank(position: Option<u64>) -> u64 {
    position.map_or(0, |p| p + 1)
}
