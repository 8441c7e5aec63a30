use thiserror::Error;

/// Errors raised while turning upstream data into a report.
///
/// Every variant is fatal to a run: nothing is written once one is returned.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Couldn't parse repo url: {0}")]
    MalformedRepoUrl(String),

    #[error("Missing field `{field}` in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },

    #[error("Unknown pull request state: {0}")]
    UnknownState(String),

    #[error("Repository {0} reported no stargazers count")]
    MissingStargazers(String),
}
