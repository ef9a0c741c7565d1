//! End-to-end pipeline: resolve tag, resolve asset, stream it to disk.

use crate::api::ReleaseApi;
use crate::error::{Error, TransportError};
use crate::filename::asset_file_name;
use crate::resolver::ReleaseResolver;
use crate::storage::PartFile;
use std::path::{Path, PathBuf};

/// What ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub tag: String,
    pub asset_id: u64,
    /// Asset name as reported by the remote (before sanitizing).
    pub asset_name: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Downloads the newest asset of `requested_tag` (or of the latest tag when
/// `None`/empty) into `dest_dir`.
///
/// The body is streamed into `{name}.part` and renamed over `{name}` only
/// after the stream completes; a failed stream removes the part file.
pub fn download_release_asset<A: ReleaseApi + ?Sized>(
    api: &A,
    requested_tag: Option<&str>,
    dest_dir: &Path,
) -> Result<DownloadOutcome, Error> {
    let resolver = ReleaseResolver::new(api);

    let tag = resolver.resolve_tag(requested_tag)?;
    tracing::debug!("tag: {}", tag);

    let asset = resolver
        .resolve_asset(&tag)?
        .ok_or_else(|| Error::NoAssets { tag: tag.clone() })?;
    tracing::debug!("asset id: {} name: {}", asset.id, asset.name);

    let final_path = dest_dir.join(asset_file_name(&asset));
    let mut part = PartFile::create(&final_path).map_err(|source| Error::FileOpen {
        path: final_path.clone(),
        source,
    })?;

    let bytes = match api.stream_asset(asset.id, &mut part) {
        Ok(n) => n,
        Err(source) => {
            if let Err(e) = part.discard() {
                tracing::warn!("could not remove partial download: {}", e);
            }
            return Err(Error::Download {
                asset_id: asset.id,
                source,
            });
        }
    };

    let path = part.finalize().map_err(|e| Error::Download {
        asset_id: asset.id,
        source: TransportError::Sink(e),
    })?;
    tracing::info!("downloaded {} ({} bytes) to {}", asset.name, bytes, path.display());

    Ok(DownloadOutcome {
        tag,
        asset_id: asset.id,
        asset_name: asset.name,
        path,
        bytes,
    })
}
