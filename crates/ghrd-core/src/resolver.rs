//! Turns a possibly empty tag request into a concrete tag, then into the
//! newest asset of that tag's release.
//!
//! Only depends on the `ReleaseApi` trait so it can run against a fake.

use crate::api::{ReleaseApi, ReleaseAsset, RepositoryTag};
use crate::error::Error;

pub struct ReleaseResolver<'a, A: ReleaseApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: ReleaseApi + ?Sized> ReleaseResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Resolves `requested` against the remote tag list.
    ///
    /// `None` or `""` selects the greatest tag name in byte-wise order (so
    /// `v9` sorts above `v10`). A non-empty request is returned unchanged
    /// when it is present in the list.
    pub fn resolve_tag(&self, requested: Option<&str>) -> Result<String, Error> {
        let tags = self.api.list_tags().map_err(Error::TagLookup)?;
        tracing::debug!("remote lists {} tags", tags.len());

        match requested.filter(|t| !t.is_empty()) {
            None => latest_tag(&tags)
                .map(str::to_string)
                .ok_or(Error::TagNotFound { tag: None }),
            Some(tag) => {
                if tags.iter().any(|t| t.name == tag) {
                    Ok(tag.to_string())
                } else {
                    Err(Error::TagNotFound {
                        tag: Some(tag.to_string()),
                    })
                }
            }
        }
    }

    /// Fetches the release for `tag` and returns its highest-id asset, or
    /// `None` when the release has no assets.
    pub fn resolve_asset(&self, tag: &str) -> Result<Option<ReleaseAsset>, Error> {
        let release = self
            .api
            .get_release(tag)
            .map_err(|source| Error::AssetLookup {
                tag: tag.to_string(),
                source,
            })?;
        tracing::debug!("release {} has {} assets", tag, release.assets.len());
        Ok(newest_asset(&release.assets).cloned())
    }
}

/// Greatest non-empty tag name under byte-wise ordering.
pub fn latest_tag(tags: &[RepositoryTag]) -> Option<&str> {
    tags.iter()
        .map(|t| t.name.as_str())
        .filter(|name| !name.is_empty())
        .max()
}

/// Asset with the strictly greatest id; the first one wins on equal ids.
pub fn newest_asset(assets: &[ReleaseAsset]) -> Option<&ReleaseAsset> {
    let mut newest: Option<&ReleaseAsset> = None;
    for asset in assets {
        if newest.map_or(true, |n| asset.id > n.id) {
            newest = Some(asset);
        }
    }
    newest
}
