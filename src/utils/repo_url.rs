use crate::data::RepoRef;
use crate::error::ReportError;

const API_HOST: &str = "https://api.github.com";

/// Parse a repository API URL (`https://api.github.com/repos/<owner>/<name>`)
/// into its owner and name.
///
/// Anything after the name segment (`/pulls`, `/issues/3`, ...) is ignored.
pub fn parse_repo_url(url: &str) -> Result<RepoRef, ReportError> {
    let malformed = || ReportError::MalformedRepoUrl(url.to_string());

    let path = url.strip_prefix(API_HOST).ok_or_else(malformed)?;
    let path = path.strip_prefix("/repos/").ok_or_else(malformed)?;

    let mut parts = path.split('/');
    let owner = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
    let name = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;

    Ok(RepoRef::new(owner, name))
}
