mod config;
mod fetch;
mod github;
mod report;
mod stats;

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// Review Stats — CLI tool that measures how long each reviewer takes to
/// review pull requests in a GitHub repository, reported as p25/p50/p75.
#[derive(Parser, Debug)]
#[command(name = "review-stats", version, about)]
struct Cli {
    /// Repository owner or organization (e.g., rust-lang)
    #[arg(long, default_value = "")]
    owner: String,

    /// Repository name (e.g., cargo)
    #[arg(long, default_value = "")]
    repo: String,

    /// GitHub access token. Falls back to the config file, then GITHUB_TOKEN;
    /// requests are anonymous when empty.
    #[arg(long)]
    github_token: Option<String>,

    /// Optional output file path for markdown report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file to use instead of ./.review-stats.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let repo = github::RepoId {
        owner: cli.owner,
        repo: cli.repo,
    };
    let _main_span = info_span!("review_stats", repo = %repo).entered();

    info!("loading configuration");
    let mut config = config::Config::load(cli.config.as_deref())?;
    if let Some(token) = cli.github_token {
        config.github.token = Some(token);
    }
    let token = config.github_token();
    debug!(api_url = config.api_url(), per_page = config.per_page(), authenticated = token.is_some(), "resolved configuration");

    let client = github::GitHubClient::new(config.api_url(), token);
    let pull_pages = fetch::LogProgress::new("fetching pull requests");
    let reviewed = fetch::LogProgress::new("fetching reviews");

    info!("collecting review times");
    let times = stats::collect_review_times(
        &client,
        &repo,
        config.per_page(),
        stats::ProgressSinks {
            pull_requests: &pull_pages,
            reviews: &reviewed,
        },
    )
    .await?;
    info!(reviewers = times.len(), "collection complete");

    let built_report = report::build(repo, &times);
    report::output(&built_report, cli.output.as_deref())?;
    info!(rows = built_report.rows.len(), "done");

    Ok(())
}
