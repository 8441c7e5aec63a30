use anyhow::{Context, Result};
use std::collections::HashMap;
use tracing::debug;

use crate::data::{AggregateReport, PullRequestRecord, RepositorySummary};
use crate::services::StarLookup;
use crate::utils::parse_repo_url;

/// Group pull requests by target repository.
///
/// Records are processed in input order. Every repository URL is parsed, even
/// for records that end up discarded, so malformed upstream data always aborts.
/// Closed-unmerged PRs are dropped before grouping and never cause a star
/// lookup. Stars are fetched once per distinct repository, when it is first
/// seen.
pub async fn aggregate<S: StarLookup>(
    prs: Vec<PullRequestRecord>,
    stars: &S,
) -> Result<AggregateReport> {
    let mut report = AggregateReport::default();
    let mut index = HashMap::new();

    for pr in prs {
        let repo = parse_repo_url(&pr.repo_url)?;

        if pr.is_abandoned() {
            continue;
        }

        if pr.is_open() {
            report.open_prs += 1;
        }

        if let Some(&idx) = index.get(&repo) {
            let summary: &mut RepositorySummary = &mut report.repositories[idx];
            summary.pull_requests.push(pr);
            continue;
        }

        let count = stars
            .stargazers(&repo)
            .await
            .with_context(|| format!("fetching stars for {}", repo))?;
        debug!(repo = %repo, stars = count, "star lookup");

        index.insert(repo.clone(), report.repositories.len());
        report.repositories.push(RepositorySummary {
            repo,
            stars: count,
            pull_requests: vec![pr],
        });
    }

    Ok(report)
}

/// Sort ascending by stars. Ties keep their first-seen order.
pub fn rank(mut repositories: Vec<RepositorySummary>) -> Vec<RepositorySummary> {
    repositories.sort_by_key(|r| r.stars);
    repositories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PrState, RepoRef};
    use crate::error::ReportError;
    use std::sync::Mutex;

    struct FakeStars {
        counts: HashMap<String, u64>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeStars {
        fn new(counts: &[(&str, u64)]) -> Self {
            Self {
                counts: counts.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl StarLookup for FakeStars {
        async fn stargazers(&self, repo: &RepoRef) -> Result<u64> {
            let key = repo.to_string();
            self.calls.lock().unwrap().push(key.clone());
            self.counts
                .get(&key)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("404 for {key}"))
        }
    }

    fn pr(state: PrState, merged: bool, repo: &str) -> PullRequestRecord {
        PullRequestRecord::new(state, merged, format!("https://api.github.com/repos/{repo}"))
    }

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }

    fn summary(repo: &str, stars: u64) -> RepositorySummary {
        let (owner, name) = repo.split_once('/').unwrap();
        RepositorySummary {
            repo: RepoRef::new(owner, name),
            stars,
            pull_requests: Vec::new(),
        }
    }

    #[test]
    fn groups_and_drops_closed_unmerged() {
        let stars = FakeStars::new(&[("acme/widget", 50)]);
        let prs = vec![
            pr(PrState::Open, false, "acme/widget"),
            pr(PrState::Closed, true, "acme/widget"),
            pr(PrState::Closed, false, "acme/gadget"),
        ];

        let report = block_on(aggregate(prs.clone(), &stars)).unwrap();

        assert_eq!(report.open_prs, 1);
        assert_eq!(report.repositories.len(), 1);
        let widget = &report.repositories[0];
        assert_eq!(widget.repo, RepoRef::new("acme", "widget"));
        assert_eq!(widget.stars, 50);
        assert_eq!(widget.pull_requests, prs[..2].to_vec());
        assert_eq!(stars.calls(), vec!["acme/widget"]);
    }

    #[test]
    fn looks_up_stars_once_per_repository_in_first_seen_order() {
        let stars = FakeStars::new(&[("a/one", 1), ("b/two", 2)]);
        let prs = vec![
            pr(PrState::Closed, true, "b/two"),
            pr(PrState::Open, false, "a/one"),
            pr(PrState::Open, false, "b/two"),
            pr(PrState::Closed, true, "a/one"),
        ];

        let report = block_on(aggregate(prs, &stars)).unwrap();

        assert_eq!(stars.calls(), vec!["b/two", "a/one"]);
        let names: Vec<_> = report.repositories.iter().map(|r| r.repo.to_string()).collect();
        assert_eq!(names, vec!["b/two", "a/one"]);
        assert_eq!(report.repositories[0].pull_requests.len(), 2);
        assert_eq!(report.open_prs, 2);
    }

    #[test]
    fn open_count_includes_open_merged_records() {
        let stars = FakeStars::new(&[("a/one", 1)]);
        let prs = vec![
            pr(PrState::Open, true, "a/one"),
            pr(PrState::Open, false, "a/one"),
        ];

        let report = block_on(aggregate(prs, &stars)).unwrap();
        assert_eq!(report.open_prs, 2);
    }

    #[test]
    fn malformed_url_aborts_even_for_discarded_records() {
        let stars = FakeStars::new(&[]);
        let prs = vec![PullRequestRecord::new(
            PrState::Closed,
            false,
            "https://example.com/not-a-repo",
        )];

        let err = block_on(aggregate(prs, &stars)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::MalformedRepoUrl(_))
        ));
        assert!(stars.calls().is_empty());
    }

    #[test]
    fn lookup_failure_is_fatal() {
        let stars = FakeStars::new(&[]);
        let prs = vec![pr(PrState::Open, false, "ghost/repo")];

        let err = block_on(aggregate(prs, &stars)).unwrap_err();
        assert!(format!("{err:#}").contains("fetching stars for ghost/repo"));
    }

    #[test]
    fn empty_input_gives_empty_report() {
        let stars = FakeStars::new(&[]);
        let report = block_on(aggregate(Vec::new(), &stars)).unwrap();
        assert_eq!(report, AggregateReport::default());
    }

    #[test]
    fn rank_sorts_ascending() {
        let ranked = rank(vec![summary("a/ten", 10), summary("b/five", 5)]);
        let stars: Vec<_> = ranked.iter().map(|r| r.stars).collect();
        assert_eq!(stars, vec![5, 10]);
    }

    #[test]
    fn rank_is_stable_on_ties() {
        let ranked = rank(vec![
            summary("a/x", 3),
            summary("b/y", 1),
            summary("c/z", 3),
            summary("d/w", 1),
        ]);
        let names: Vec<_> = ranked.iter().map(|r| r.repo.to_string()).collect();
        assert_eq!(names, vec!["b/y", "d/w", "a/x", "c/z"]);
    }
}
