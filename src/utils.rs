pub mod repo_url;

pub use repo_url::parse_repo_url;
