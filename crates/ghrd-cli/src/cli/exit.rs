//! Process exit codes. Errors start at 11.

use ghrd_core::{Error as PipelineError, ErrorKind};
use thiserror::Error;

pub const OK: i32 = 0;
pub const PARSE_FLAGS: i32 = 11;
pub const INVALID_ARGS: i32 = 12;
pub const TAG_NOT_FOUND: i32 = 13;
pub const ASSET_NOT_FOUND: i32 = 14;
pub const OPEN_FILE: i32 = 15;
pub const DOWNLOAD: i32 = 16;

/// Why a run stopped. The only place failures become exit codes.
#[derive(Debug, Error)]
pub enum Failure {
    /// Bad flags, or `--help`/`--version` (which exit 0).
    #[error(transparent)]
    Parse(clap::Error),
    /// Unreadable config file or unusable base URL.
    #[error("{0:#}")]
    Config(anyhow::Error),
    /// More than one positional tag.
    #[error("invalid arguments: expected at most one TAG, got {0}")]
    InvalidArgs(usize),
    #[error(transparent)]
    Pipeline(PipelineError),
}

impl Failure {
    pub fn exit_code(&self) -> i32 {
        match self {
            Failure::Parse(e) if !e.use_stderr() => OK,
            Failure::Parse(_) | Failure::Config(_) => PARSE_FLAGS,
            Failure::InvalidArgs(_) => INVALID_ARGS,
            Failure::Pipeline(e) => match e.kind() {
                ErrorKind::TagNotFound => TAG_NOT_FOUND,
                ErrorKind::AssetNotFound => ASSET_NOT_FOUND,
                ErrorKind::FileOpen => OPEN_FILE,
                ErrorKind::Download => DOWNLOAD,
            },
        }
    }

    /// Print the failure for a human; clap renders its own messages.
    pub fn report(&self) {
        match self {
            Failure::Parse(e) => {
                let _ = e.print();
            }
            other => {
                tracing::debug!("error: {:?}", other);
                eprintln!("ghrd error: {}", other);
            }
        }
    }
}
