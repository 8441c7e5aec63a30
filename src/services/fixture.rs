use anyhow::{Context, Result};
use std::path::Path;

use crate::data::PullRequestRecord;

/// Load pull requests from a JSON array instead of the search API.
///
/// Each entry has the shape `{"state": "open", "isMerged": false, "repo_url": "..."}`.
pub fn load_pull_requests(path: &Path) -> Result<Vec<PullRequestRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading PR fixture {}", path.display()))?;
    parse_pull_requests(&raw).with_context(|| format!("parsing PR fixture {}", path.display()))
}

pub fn parse_pull_requests(raw: &str) -> Result<Vec<PullRequestRecord>> {
    Ok(serde_json::from_str(raw)?)
}
