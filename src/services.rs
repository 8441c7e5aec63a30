use anyhow::Result;

use crate::data::RepoRef;

pub mod aggregate;
pub mod fixture;
pub mod github;
pub mod render;

pub use aggregate::{aggregate, rank};
pub use fixture::load_pull_requests;
pub use github::GithubClient;
pub use render::{add_open_pr_badge, contributions_section, render_readme, RenderOptions};

/// Resolves a repository's popularity (its stargazers count).
#[allow(async_fn_in_trait)]
pub trait StarLookup {
    async fn stargazers(&self, repo: &RepoRef) -> Result<u64>;
}
