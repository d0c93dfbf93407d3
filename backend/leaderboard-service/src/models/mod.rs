use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Organization category. The upper-snake name is part of the leaderboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationType {
    Company,
    University,
    HighSchool,
    Etc,
}

impl OrganizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationType::Company => "COMPANY",
            OrganizationType::University => "UNIVERSITY",
            OrganizationType::HighSchool => "HIGH_SCHOOL",
            OrganizationType::Etc => "ETC",
        }
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "COMPANY" => Ok(OrganizationType::Company),
            "UNIVERSITY" => Ok(OrganizationType::University),
            "HIGH_SCHOOL" => Ok(OrganizationType::HighSchool),
            "ETC" => Ok(OrganizationType::Etc),
            other => Err(format!("unknown organization type: {}", other)),
        }
    }
}

/// Organization as seen by the ranking core: identifier and type only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub organization_type: OrganizationType,
}

/// Member as seen by the ranking core. `github_id` is the leaderboard member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub github_id: String,
    pub organization: Option<Organization>,
}

impl Member {
    pub fn new(github_id: impl Into<String>, organization: Option<Organization>) -> Self {
        Self {
            github_id: github_id.into(),
            organization,
        }
    }
}

/// One unit of contribution points for a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionEvent {
    pub member_id: String,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(default)]
    pub organization_type: Option<OrganizationType>,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub member_id: String,
    pub score: i64,
}

impl From<(String, i64)> for RankEntry {
    fn from((member_id, score): (String, i64)) -> Self {
        Self { member_id, score }
    }
}

/// Member-centric standing: ranks are 1-indexed, 0 when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileRank {
    pub neighbors: Vec<String>,
    pub rank: u64,
    pub organization_rank: u64,
    pub is_last: bool,
}

impl ProfileRank {
    pub fn empty() -> Self {
        Self::default()
    }
}
