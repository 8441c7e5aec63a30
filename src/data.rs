pub mod models;
pub mod types;

pub use models::{AggregateReport, PrState, PullRequestRecord, RepoRef, RepositorySummary};
pub use types::{PullRequestLinks, SearchIssueItem, SearchIssuesPage};
