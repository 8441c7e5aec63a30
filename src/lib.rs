pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod services;
pub mod utils;

pub use app::{run, run_with, RunSummary};
pub use config::{Config, ConfigError};
pub use data::{AggregateReport, PrState, PullRequestRecord, RepoRef, RepositorySummary};
pub use error::ReportError;
pub use services::{aggregate, rank, GithubClient, StarLookup};
pub use utils::parse_repo_url;
