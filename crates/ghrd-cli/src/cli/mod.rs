//! CLI for the GHRD release downloader.

pub mod exit;
mod settings;

use clap::Parser;
use ghrd_core::api::GitHubClient;
use ghrd_core::config::{self, ENV_DEBUG, ENV_GITHUB_API, ENV_GITHUB_TOKEN};
use ghrd_core::download::{download_release_asset, DownloadOutcome};
use ghrd_core::logging;
use std::ffi::OsString;
use std::path::PathBuf;

use exit::Failure;
pub use settings::resolve_settings;

/// Download the newest asset of a GitHub release.
#[derive(Debug, Parser)]
#[command(name = "ghrd", version)]
#[command(about = "GHRD: download the newest asset of a GitHub release", long_about = None)]
pub struct Cli {
    /// Repository owner (user or organization).
    #[arg(short = 'u', long = "owner", visible_alias = "username")]
    pub owner: String,

    /// Repository name.
    #[arg(short = 'r', long = "repository")]
    pub repository: String,

    /// API token (falls back to $GITHUB_TOKEN, then the config file).
    #[arg(short = 't', long)]
    pub token: Option<String>,

    /// API base URL (falls back to $GITHUB_API, then the config file).
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory the asset is written to (default: config `download_dir`, else ./).
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Read settings from this file instead of ~/.config/ghrd/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging to stderr (also enabled by $GHRD_DEBUG).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Release tag. When omitted, the greatest tag name is used.
    #[arg(value_name = "TAG")]
    pub tags: Vec<String>,
}

/// Environment inputs, captured once so resolution stays testable.
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub github_api: Option<String>,
    pub github_token: Option<String>,
    pub debug: Option<String>,
}

impl Env {
    pub fn from_process() -> Self {
        Self {
            github_api: std::env::var(ENV_GITHUB_API).ok(),
            github_token: std::env::var(ENV_GITHUB_TOKEN).ok(),
            debug: std::env::var(ENV_DEBUG).ok(),
        }
    }
}

pub fn run_from_args() -> Result<DownloadOutcome, Failure> {
    run(std::env::args_os(), &Env::from_process())
}

pub fn run<I, T>(args: I, env: &Env) -> Result<DownloadOutcome, Failure>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(Failure::Parse)?;

    let debug = cli.debug || config::debug_from_env(env.debug.as_deref());
    if let Err(err) = logging::init_logging(debug) {
        eprintln!("ghrd: logging disabled: {:#}", err);
    }

    let cfg = match &cli.config {
        Some(path) => config::load_from(path).map_err(Failure::Config)?,
        None => config::load_default().unwrap_or_else(|err| {
            tracing::warn!("ignoring config file: {:#}", err);
            Default::default()
        }),
    };
    tracing::debug!("loaded config: {:?}", cfg);

    let settings = resolve_settings(cli, env, &cfg)?;
    tracing::debug!("owner: {}", settings.client.owner);
    tracing::debug!("repository: {}", settings.client.repo);
    tracing::debug!("GitHub API URL: {}", settings.client.api_base);

    let client = GitHubClient::new(settings.client);
    download_release_asset(&client, settings.tag.as_deref(), &settings.dest_dir)
        .map_err(Failure::Pipeline)
}

#[cfg(test)]
mod tests;
