use std::env;
use std::path::PathBuf;

/// Run configuration, read from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// GitHub token used for every API call
    pub auth_token: String,
    /// Login whose pull requests are reported
    pub author: String,
    pub template_path: PathBuf,
    pub readme_path: PathBuf,
    /// Read PRs from this JSON file instead of searching GitHub
    pub prs_fixture: Option<PathBuf>,
    /// Render the contribution gallery (default: false)
    pub contributions_section: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let auth_token = var("AUTH_TOKEN").ok_or(ConfigError::MissingEnvVar("AUTH_TOKEN"))?;
        let author = var("PR_AUTHOR").ok_or(ConfigError::MissingEnvVar("PR_AUTHOR"))?;

        let template_path: PathBuf = var("TEMPLATE_PATH")
            .unwrap_or_else(|| "template.md".to_string())
            .into();
        let readme_path: PathBuf = var("README_PATH")
            .unwrap_or_else(|| "README.md".to_string())
            .into();
        let prs_fixture = var("PRS_FIXTURE").map(PathBuf::from);

        let contributions_section = match var("CONTRIBUTIONS_SECTION") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidValue("CONTRIBUTIONS_SECTION"))?,
            None => false,
        };

        Ok(Self {
            auth_token,
            author,
            template_path,
            readme_path,
            prs_fixture,
            contributions_section,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
