//! Settings: optional `~/.config/ghrd/config.toml`, environment overrides,
//! and base URL validation.

use crate::api::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Env var overriding the API base, mainly for GitHub Enterprise.
pub const ENV_GITHUB_API: &str = "GITHUB_API";
/// Env var supplying the API token.
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Any non-empty value turns on debug logging.
pub const ENV_DEBUG: &str = "GHRD_DEBUG";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhrdConfig {
    /// API root, e.g. `https://ghe.example.com/api/v3`.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Token sent as `Authorization: token ...`.
    #[serde(default)]
    pub token: Option<String>,
    /// Default destination directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

/// Load `ghrd/config.toml` from the XDG config dirs if one exists.
/// Nothing is created when it is absent.
pub fn load_default() -> Result<GhrdConfig> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ghrd")?;
    match xdg_dirs.find_config_file("config.toml") {
        Some(path) => {
            tracing::debug!("reading config {}", path.display());
            load_from(&path)
        }
        None => Ok(GhrdConfig::default()),
    }
}

/// Load configuration from an explicit file. The file must exist.
pub fn load_from(path: &Path) -> Result<GhrdConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: GhrdConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Picks the first non-empty value: flag, then environment, then file.
pub fn first_set(flag: Option<&str>, env: Option<&str>, file: Option<&str>) -> Option<String> {
    [flag, env, file]
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// API base to use: flag > env > config file > `https://api.github.com`.
pub fn resolve_base_url(
    flag: Option<&str>,
    env: Option<&str>,
    cfg: &GhrdConfig,
) -> Result<String> {
    let raw = first_set(flag, env, cfg.api_base_url.as_deref())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    normalize_base_url(&raw)
}

/// Strips trailing slashes and rejects anything that is not an absolute
/// http(s) URL. `https://api.example.com/` becomes `https://api.example.com`.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        anyhow::bail!("API base URL is empty");
    }
    let parsed =
        url::Url::parse(trimmed).with_context(|| format!("invalid API base URL {raw:?}"))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!("API base URL {raw:?} has unsupported scheme {other:?}"),
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        anyhow::bail!("API base URL {raw:?} must not carry a query or fragment");
    }
    Ok(trimmed.to_string())
}

/// True when `GHRD_DEBUG` holds a non-empty value.
pub fn debug_from_env(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
