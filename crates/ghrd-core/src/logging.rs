//! Logging init: stderr, quiet by default, verbose in debug mode.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Default filter directive for normal or debug runs.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "warn,ghrd=debug,ghrd_core=debug"
    } else {
        "warn"
    }
}

/// Initialize structured logging to stderr. `RUST_LOG` wins over `debug`.
/// Returns Err if a global subscriber is already installed.
pub fn init_logging(debug: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;

    if debug {
        tracing::debug!("run as debug mode");
    }
    Ok(())
}
