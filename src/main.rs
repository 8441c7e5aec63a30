use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prbadge::Config;

/// Render README.md from template.md using your GitHub pull request history.
///
/// Configured through the environment (AUTH_TOKEN, PR_AUTHOR, ...); a `.env`
/// file in the working directory is loaded first.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),
}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prbadge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    let rt = tokio::runtime::Runtime::new()?;
    let summary = rt.block_on(prbadge::run(&config))?;

    tracing::info!(
        pull_requests = summary.pull_requests,
        repositories = summary.repositories,
        open_prs = summary.open_prs,
        "done"
    );

    Ok(())
}
