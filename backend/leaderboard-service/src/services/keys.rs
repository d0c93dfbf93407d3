use crate::models::OrganizationType;
use std::fmt;

/// Global member leaderboard.
pub const MEMBER_RANK_KEY: &str = "rank:member";
/// Prefix of per organization-type leaderboards, followed by the type name.
pub const ORGANIZATION_TYPE_RANK_KEY: &str = "rank:organization:type:";
/// Prefix of per organization leaderboards, followed by the organization id.
pub const ORGANIZATION_MEMBER_RANK_KEY: &str = "rank:organization:member:";

/// Which leaderboard a query or increment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardSelector {
    Global,
    OrganizationType(OrganizationType),
    Organization(i64),
}

impl LeaderboardSelector {
    pub fn key(&self) -> String {
        match self {
            LeaderboardSelector::Global => MEMBER_RANK_KEY.to_string(),
            LeaderboardSelector::OrganizationType(organization_type) => {
                format!("{}{}", ORGANIZATION_TYPE_RANK_KEY, organization_type.as_str())
            }
            LeaderboardSelector::Organization(organization_id) => {
                format!("{}{}", ORGANIZATION_MEMBER_RANK_KEY, organization_id)
            }
        }
    }
}

impl fmt::Display for LeaderboardSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_naming() {
        assert_eq!(LeaderboardSelector::Global.key(), "rank:member");
        assert_eq!(
            LeaderboardSelector::OrganizationType(OrganizationType::University).key(),
            "rank:organization:type:UNIVERSITY"
        );
        assert_eq!(
            LeaderboardSelector::Organization(42).key(),
            "rank:organization:member:42"
        );
    }
}
