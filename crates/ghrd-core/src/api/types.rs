//! Response payloads. Unknown fields are ignored; missing ones default.

use serde::Deserialize;

/// One entry of the tag list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryTag {
    #[serde(default)]
    pub name: String,
}

/// A release as returned by the get-release-by-tag endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryRelease {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A downloadable artifact attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}
