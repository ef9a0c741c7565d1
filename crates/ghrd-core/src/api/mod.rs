//! Transport: the three GitHub REST calls the downloader needs.
//!
//! The resolver and the download pipeline only depend on the `ReleaseApi`
//! trait; `GitHubClient` is the libcurl-backed implementation.

mod github;
mod types;

use crate::error::TransportError;
use std::io::Write;

pub use github::{ClientConfig, GitHubClient, DEFAULT_BASE_URL};
pub use types::{ReleaseAsset, RepositoryRelease, RepositoryTag};

/// Remote operations used by the resolver and the download pipeline.
pub trait ReleaseApi {
    /// `GET {base}/repos/{owner}/{repo}/tags`
    fn list_tags(&self) -> Result<Vec<RepositoryTag>, TransportError>;

    /// `GET {base}/repos/{owner}/{repo}/releases/tags/{tag}`
    fn get_release(&self, tag: &str) -> Result<RepositoryRelease, TransportError>;

    /// `GET {base}/repos/{owner}/{repo}/releases/assets/{id}` as raw bytes,
    /// copied into `sink` as they arrive. Returns the number of bytes written.
    fn stream_asset(&self, id: u64, sink: &mut dyn Write) -> Result<u64, TransportError>;
}
