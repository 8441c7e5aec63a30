use serde::Deserialize;

use super::models::{PrState, PullRequestRecord};
use crate::error::ReportError;

// REST response types. Only the fields the report needs are modelled.

/// One page of `GET /search/issues`.
#[derive(Debug, Deserialize)]
pub struct SearchIssuesPage {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<SearchIssueItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchIssueItem {
    pub number: u64,
    pub state: Option<String>,
    pub repository_url: Option<String>,
    /// Present only when the issue is a pull request.
    pub pull_request: Option<PullRequestLinks>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestLinks {
    pub merged_at: Option<String>,
}

impl SearchIssueItem {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

impl TryFrom<SearchIssueItem> for PullRequestRecord {
    type Error = ReportError;

    fn try_from(item: SearchIssueItem) -> Result<Self, Self::Error> {
        let context = || format!("search result #{}", item.number);

        let state: PrState = item
            .state
            .as_deref()
            .ok_or_else(|| ReportError::MissingField {
                field: "state",
                context: context(),
            })?
            .parse()?;

        let links = item
            .pull_request
            .as_ref()
            .ok_or_else(|| ReportError::MissingField {
                field: "pull_request",
                context: context(),
            })?;
        let is_merged = links.merged_at.is_some();

        let repo_url = item
            .repository_url
            .clone()
            .ok_or_else(|| ReportError::MissingField {
                field: "repository_url",
                context: context(),
            })?;

        Ok(PullRequestRecord {
            state,
            is_merged,
            repo_url,
        })
    }
}
