use tracing::warn;

use crate::data::{AggregateReport, RepositorySummary};

pub const OPEN_PRS_PLACEHOLDER: &str = "${OPEN_PRS}";
pub const CONTRIBUTIONS_PLACEHOLDER: &str = "${CONTRIBUTIONS}";

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Render the contribution gallery.
    pub contributions: bool,
    /// Login used in the gallery's "PRs by author" links.
    pub author: String,
}

/// Replace the first `${OPEN_PRS}` with the count. Without a placeholder the
/// template comes back unchanged.
pub fn add_open_pr_badge(template: &str, open_prs: usize) -> String {
    template.replacen(OPEN_PRS_PLACEHOLDER, &open_prs.to_string(), 1)
}

/// Gallery of repositories with at least one merged PR, most starred first.
///
/// `ranked` is expected in ascending star order, as produced by `rank`.
pub fn contributions_section(ranked: &[RepositorySummary], author: &str) -> String {
    let mut content = String::from("\n### 🚀 Open Source Contributions\n\n<p align=\"center\">");

    for summary in ranked.iter().rev().filter(|r| r.has_merged_pr()) {
        let owner = &summary.repo.owner;
        let name = &summary.repo.name;
        content.push_str(&format!(
            "\n    <a href=\"https://github.com/{owner}/{name}/pulls?q=is%3Apr+author%3A{author}\" target=\"_blank\">\
             \n        <img width=300 height=150 src=\"https://github-readme-stats.vercel.app/api/pin/?username={owner}&repo={name}&theme=radical&show_owner=true\" />\
             \n    </a>"
        ));
    }

    content.push_str("\n</p>");
    content
}

/// Apply every enabled substitution to the template.
///
/// `report.repositories` must already be ranked.
pub fn render_readme(template: &str, report: &AggregateReport, options: &RenderOptions) -> String {
    if !template.contains(OPEN_PRS_PLACEHOLDER) {
        warn!("template has no {} placeholder", OPEN_PRS_PLACEHOLDER);
    }
    let mut readme = add_open_pr_badge(template, report.open_prs);

    if options.contributions {
        let ranked = &report.repositories;
        if !ranked.iter().any(RepositorySummary::has_merged_pr) {
            warn!("contribution gallery enabled but no repository has a merged PR");
        }
        let section = contributions_section(ranked, &options.author);
        if readme.contains(CONTRIBUTIONS_PLACEHOLDER) {
            readme = readme.replacen(CONTRIBUTIONS_PLACEHOLDER, &section, 1);
        } else {
            readme.push_str(&section);
        }
    }

    readme
}
