//! Merge flags, environment, and config file into one set of settings.

use super::exit::Failure;
use super::{Cli, Env};
use ghrd_core::api::ClientConfig;
use ghrd_core::config::{self, GhrdConfig};
use std::path::PathBuf;

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientConfig,
    pub dest_dir: PathBuf,
    /// `None` selects the latest tag.
    pub tag: Option<String>,
}

/// Flag > environment > config file > default, per setting. At most one
/// positional tag is accepted.
pub fn resolve_settings(cli: Cli, env: &Env, cfg: &GhrdConfig) -> Result<Settings, Failure> {
    if cli.tags.len() > 1 {
        return Err(Failure::InvalidArgs(cli.tags.len()));
    }

    let api_base = config::resolve_base_url(
        cli.api_url.as_deref(),
        env.github_api.as_deref(),
        cfg,
    )
    .map_err(Failure::Config)?;

    let token = config::first_set(
        cli.token.as_deref(),
        env.github_token.as_deref(),
        cfg.token.as_deref(),
    )
    .unwrap_or_default();

    let dest_dir = cli
        .path
        .or_else(|| cfg.download_dir.clone())
        .unwrap_or_else(|| PathBuf::from("./"));

    Ok(Settings {
        client: ClientConfig {
            owner: cli.owner,
            repo: cli.repository,
            token,
            api_base,
        },
        dest_dir,
        tag: cli.tags.into_iter().next().filter(|t| !t.is_empty()),
    })
}
