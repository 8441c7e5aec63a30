use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;

/// Lifecycle state of a pull request as reported by the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum PrState {
    Open,
    Closed,
}

impl FromStr for PrState {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(PrState::Open),
            "closed" => Ok(PrState::Closed),
            _ => Err(ReportError::UnknownState(s.to_string())),
        }
    }
}

impl TryFrom<String> for PrState {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One pull request authored by the tracked user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestRecord {
    pub state: PrState,
    #[serde(rename = "isMerged")]
    pub is_merged: bool,
    pub repo_url: String,
}

impl PullRequestRecord {
    pub fn new(state: PrState, is_merged: bool, repo_url: impl Into<String>) -> Self {
        Self {
            state,
            is_merged,
            repo_url: repo_url.into(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == PrState::Open
    }

    /// Closed without being merged.
    pub fn is_abandoned(&self) -> bool {
        self.state == PrState::Closed && !self.is_merged
    }
}

/// `owner/name` of a repository; the aggregation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Pull requests grouped under the repository they target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    pub repo: RepoRef,
    pub stars: u64,
    /// In first-seen order.
    pub pull_requests: Vec<PullRequestRecord>,
}

impl RepositorySummary {
    pub fn has_merged_pr(&self) -> bool {
        self.pull_requests.iter().any(|pr| pr.is_merged)
    }
}

/// Output of aggregation: repositories in first-seen order plus the badge count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    pub repositories: Vec<RepositorySummary>,
    pub open_prs: usize,
}
