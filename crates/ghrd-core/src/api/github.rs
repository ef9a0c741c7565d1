//! GitHub REST client on top of a blocking libcurl `Easy` handle.
//!
//! One handle per call, no retries, no explicit timeouts: each call is a
//! single best-effort attempt. Runs in the current thread.

use super::{ReleaseApi, RepositoryRelease, RepositoryTag};
use crate::error::TransportError;
use serde::de::DeserializeOwned;
use std::io::Write;
use url::Url;

/// Public GitHub API; GitHub Enterprise deployments override it.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("ghrd/", env!("CARGO_PKG_VERSION"));
const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_BINARY: &str = "application/octet-stream";

/// Per-invocation client settings. Immutable once the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub owner: String,
    pub repo: String,
    /// Sent as `Authorization: token {token}`; empty means unauthenticated.
    pub token: String,
    /// API root without a trailing slash (see `config::normalize_base_url`).
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    config: ClientConfig,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds `{base}/repos/{owner}/{repo}/{tail..}`, percent-encoding each
    /// segment so a tag like `release/1.0` stays one path segment.
    pub fn endpoint(&self, tail: &[&str]) -> Result<String, TransportError> {
        let base = &self.config.api_base;
        let mut url = Url::parse(base).map_err(|source| TransportError::InvalidUrl {
            url: base.clone(),
            source,
        })?;
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl {
                url: base.clone(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .pop_if_empty()
            .extend(["repos", self.config.owner.as_str(), self.config.repo.as_str()])
            .extend(tail);
        Ok(url.into())
    }

    fn headers(&self, accept: &str) -> Result<curl::easy::List, curl::Error> {
        let mut list = curl::easy::List::new();
        list.append(&format!("Accept: {accept}"))?;
        // An empty token sends no credential at all, so the remote treats
        // the call as anonymous (lower rate limit) instead of rejecting
        // a blank `token ` value.
        if !self.config.token.is_empty() {
            list.append(&format!("Authorization: token {}", self.config.token))?;
        }
        Ok(list)
    }

    /// Performs a GET and hands each body chunk to `on_data`. Returning
    /// `false` from `on_data` aborts the transfer.
    ///
    /// Error statuses (>= 400) never reach `on_data`.
    fn get(
        &self,
        url: &str,
        accept: &str,
        mut on_data: impl FnMut(&[u8]) -> bool,
    ) -> Result<(), TransportError> {
        let curl_err = |source: curl::Error| TransportError::Curl {
            url: url.to_string(),
            source,
        };

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_err)?;
        easy.get(true).map_err(curl_err)?;
        // The asset endpoint answers with a redirect to object storage;
        // libcurl drops the Authorization header when the host changes.
        easy.follow_location(true).map_err(curl_err)?;
        easy.max_redirections(10).map_err(curl_err)?;
        easy.fail_on_error(true).map_err(curl_err)?;
        easy.useragent(USER_AGENT).map_err(curl_err)?;
        easy.http_headers(self.headers(accept).map_err(curl_err)?)
            .map_err(curl_err)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| Ok(if on_data(data) { data.len() } else { 0 }))
                .map_err(curl_err)?;
            transfer.perform()
        };

        let code = easy.response_code().map_err(curl_err)?;
        match performed {
            Err(e) if e.is_http_returned_error() => Err(status_error(url, code)),
            Err(e) => Err(curl_err(e)),
            Ok(()) if !(200..300).contains(&code) => Err(status_error(url, code)),
            Ok(()) => Ok(()),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, tail: &[&str]) -> Result<T, TransportError> {
        let url = self.endpoint(tail)?;
        let mut body = Vec::new();
        self.get(&url, ACCEPT_JSON, |data| {
            body.extend_from_slice(data);
            true
        })?;
        tracing::debug!(url = %url, bytes = body.len(), "GET ok");
        serde_json::from_slice(&body).map_err(|source| TransportError::Decode { url, source })
    }
}

fn status_error(url: &str, status: u32) -> TransportError {
    if status == 404 {
        TransportError::NotFound {
            url: url.to_string(),
        }
    } else {
        TransportError::Status {
            url: url.to_string(),
            status,
        }
    }
}

impl ReleaseApi for GitHubClient {
    fn list_tags(&self) -> Result<Vec<RepositoryTag>, TransportError> {
        self.get_json(&["tags"])
    }

    fn get_release(&self, tag: &str) -> Result<RepositoryRelease, TransportError> {
        self.get_json(&["releases", "tags", tag])
    }

    fn stream_asset(&self, id: u64, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let id = id.to_string();
        let url = self.endpoint(&["releases", "assets", id.as_str()])?;

        let mut written = 0u64;
        let mut sink_error = None;
        let result = self.get(&url, ACCEPT_BINARY, |data| match sink.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                true
            }
            Err(e) => {
                tracing::warn!("asset write failed after {} bytes: {}", written, e);
                sink_error = Some(e);
                false
            }
        });
        if let Some(e) = sink_error {
            return Err(TransportError::Sink(e));
        }
        result?;
        sink.flush().map_err(TransportError::Sink)?;

        tracing::debug!(url = %url, bytes = written, "asset streamed");
        Ok(written)
    }
}
