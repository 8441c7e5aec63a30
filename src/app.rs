use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::config::Config;
use crate::data::PullRequestRecord;
use crate::services::{
    aggregate, load_pull_requests, rank, render_readme, GithubClient, RenderOptions, StarLookup,
};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pull_requests: usize,
    pub repositories: usize,
    pub open_prs: usize,
    pub output: PathBuf,
}

/// Fetch, aggregate, render and write the README.
pub async fn run(config: &Config) -> Result<RunSummary> {
    // Fail on a missing template before spending any API calls.
    let template = read_template(&config.template_path)?;
    let client = GithubClient::new(&config.auth_token)?;

    let prs = match &config.prs_fixture {
        Some(path) => load_pull_requests(path)?,
        None => client.fetch_pull_requests(&config.author).await?,
    };
    info!(count = prs.len(), author = %config.author, "fetched pull requests");

    generate(config, &template, prs, &client).await
}

/// Same as [`run`] but with the pull requests and star lookup supplied by the caller.
pub async fn run_with<S: StarLookup>(
    config: &Config,
    prs: Vec<PullRequestRecord>,
    stars: &S,
) -> Result<RunSummary> {
    let template = read_template(&config.template_path)?;
    generate(config, &template, prs, stars).await
}

async fn generate<S: StarLookup>(
    config: &Config,
    template: &str,
    prs: Vec<PullRequestRecord>,
    stars: &S,
) -> Result<RunSummary> {
    let pull_requests = prs.len();

    let mut report = aggregate(prs, stars).await?;
    report.repositories = rank(report.repositories);
    info!(
        repositories = report.repositories.len(),
        open_prs = report.open_prs,
        "aggregated pull requests"
    );

    let options = RenderOptions {
        contributions: config.contributions_section,
        author: config.author.clone(),
    };
    let readme = render_readme(template, &report, &options);

    write_output(&config.readme_path, &readme)
        .with_context(|| format!("writing {}", config.readme_path.display()))?;
    info!(path = %config.readme_path.display(), "wrote README");

    Ok(RunSummary {
        pull_requests,
        repositories: report.repositories.len(),
        open_prs: report.open_prs,
        output: config.readme_path.clone(),
    })
}

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading template {}", path.display()))
}

/// Replace `path` with `contents` in one rename, so a failed write leaves the
/// previous file in place.
fn write_output(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}
