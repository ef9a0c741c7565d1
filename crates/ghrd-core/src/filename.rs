//! Safe local filenames for remote asset names.

use crate::api::ReleaseAsset;
use crate::storage::PART_SUFFIX;

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Longest name that still leaves room for the part-file suffix.
const MAX_NAME_LEN: usize = NAME_MAX - PART_SUFFIX.len();

/// Sanitizes a remote asset name for use as a single path component.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Trims leading dots and surrounding whitespace (no hidden files, no `..`)
/// - Limits length so `{name}.part` fits in NAME_MAX, on a char boundary
///
/// Returns `None` when nothing usable is left.
pub fn sanitize_asset_name(name: &str) -> Option<String> {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced
        .trim()
        .trim_start_matches('.')
        .trim_start();

    let mut take = trimmed.len().min(MAX_NAME_LEN);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    let out = trimmed[..take].trim_end();
    if out.is_empty() {
        None
    } else {
        Some(out.to_string())
    }
}

/// Local filename for `asset`: its sanitized name, or `asset-{id}`.
pub fn asset_file_name(asset: &ReleaseAsset) -> String {
    sanitize_asset_name(&asset.name).unwrap_or_else(|| format!("asset-{}", asset.id))
}
