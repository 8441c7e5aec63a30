use anyhow::{Context, Result};
use octocrab::Octocrab;
use serde::Serialize;
use std::future::Future;
use tracing::debug;

use crate::data::{PullRequestRecord, RepoRef, SearchIssuesPage};
use crate::error::ReportError;
use crate::services::StarLookup;

const PER_PAGE: usize = 100;

// The search API never returns more than this many results for one query.
const MAX_RESULTS: usize = 1000;

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    per_page: usize,
    page: usize,
}

/// Authenticated GitHub REST client.
#[derive(Clone)]
pub struct GithubClient {
    octocrab: Octocrab,
}

impl GithubClient {
    pub fn new(token: &str) -> Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .context("building GitHub client")?;
        Ok(Self { octocrab })
    }

    /// Every pull request authored by `author`, in search order.
    pub async fn fetch_pull_requests(&self, author: &str) -> Result<Vec<PullRequestRecord>> {
        let query = search_query(author);
        let query = query.as_str();
        collect_pull_requests(move |page| self.search_page(query, page)).await
    }

    async fn search_page(&self, query: &str, page: usize) -> Result<SearchIssuesPage> {
        let params = SearchParams {
            q: query,
            per_page: PER_PAGE,
            page,
        };
        self.octocrab
            .get("/search/issues", Some(&params))
            .await
            .with_context(|| format!("searching pull requests (page {page})"))
    }
}

/// Walk search pages starting at 1 until a short page or the result cap.
async fn collect_pull_requests<F, Fut>(mut fetch_page: F) -> Result<Vec<PullRequestRecord>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<SearchIssuesPage>>,
{
    let mut prs = Vec::new();
    let mut page = 1;

    loop {
        let response = fetch_page(page).await?;

        let received = response.items.len();
        debug!(
            page,
            received,
            total = response.total_count,
            incomplete = response.incomplete_results,
            "fetched search page"
        );

        prs.extend(page_records(response)?);

        if !has_next_page(received, page) {
            break;
        }
        page += 1;
    }

    Ok(prs)
}

/// Pull requests on one search page. Plain issues are skipped.
fn page_records(page: SearchIssuesPage) -> Result<Vec<PullRequestRecord>, ReportError> {
    page.items
        .into_iter()
        .filter(|item| item.is_pull_request())
        .map(PullRequestRecord::try_from)
        .collect()
}

fn has_next_page(received: usize, page: usize) -> bool {
    received >= PER_PAGE && page * PER_PAGE < MAX_RESULTS
}

impl StarLookup for GithubClient {
    async fn stargazers(&self, repo: &RepoRef) -> Result<u64> {
        let repository = self.octocrab.repos(&repo.owner, &repo.name).get().await?;
        repository
            .stargazers_count
            .map(u64::from)
            .ok_or_else(|| ReportError::MissingStargazers(repo.to_string()).into())
    }
}

fn search_query(author: &str) -> String {
    format!("is:pr author:{}", author)
}
