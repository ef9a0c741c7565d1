//! Error taxonomy for the resolve/download pipeline.
//!
//! `TransportError` describes what went wrong talking to the remote API;
//! `Error` is the closed set of pipeline failures the CLI maps to exit codes.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single HTTP call (connection, status, decode, or sink write).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint URL could not be built from the configured base.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Curl reported an error (DNS, connect, TLS, aborted transfer, etc.).
    #[error("GET {url} failed: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// HTTP 404. Kept apart from other statuses so callers can tell
    /// "no such release" from "the API is unhappy".
    #[error("GET {url} returned HTTP 404")]
    NotFound { url: String },
    /// Any other non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u32 },
    /// Response body was not the expected JSON shape.
    #[error("decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// Writing the streamed body to the destination failed.
    #[error("write to destination failed: {0}")]
    Sink(#[source] std::io::Error),
}

impl TransportError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::NotFound { .. })
    }
}

/// Coarse failure class, one per CLI exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TagNotFound,
    AssetNotFound,
    FileOpen,
    Download,
}

/// Failure of the resolve-and-download pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested tag is not in the tag list, or the list has no usable tag.
    #[error("{}", tag_not_found_message(.tag))]
    TagNotFound { tag: Option<String> },
    /// Listing tags failed.
    #[error("list tags: {0}")]
    TagLookup(#[source] TransportError),
    /// Fetching the release for a tag failed.
    #[error("release for tag {tag}: {source}")]
    AssetLookup {
        tag: String,
        #[source]
        source: TransportError,
    },
    /// The release exists but carries no assets.
    #[error("release for tag {tag} has no assets")]
    NoAssets { tag: String },
    /// The destination file could not be created.
    #[error("open {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Streaming the asset body (or finalizing the file) failed.
    #[error("download asset {asset_id}: {source}")]
    Download {
        asset_id: u64,
        #[source]
        source: TransportError,
    },
}

fn tag_not_found_message(tag: &Option<String>) -> String {
    match tag {
        Some(t) => format!("tag {t} is not found"),
        None => "repository has no tags".to_string(),
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TagNotFound { .. } | Error::TagLookup(_) => ErrorKind::TagNotFound,
            Error::AssetLookup { .. } | Error::NoAssets { .. } => ErrorKind::AssetNotFound,
            Error::FileOpen { .. } => ErrorKind::FileOpen,
            Error::Download { .. } => ErrorKind::Download,
        }
    }
}
