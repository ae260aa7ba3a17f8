//! Invocation-scoped working paths.

use std::path::{Path, PathBuf};

use crate::asset::AssetId;
use crate::encoding::PREVIEW_EXTENSION;

/// Local scratch paths and the destination key for one invocation.
///
/// Scratch paths are keyed by the invocation's [`AssetId`], so concurrent
/// invocations for the same source key never collide on local files. The
/// destination preview key is a pure function of the source key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingPaths {
    /// Per-invocation scratch directory, removed once the invocation ends.
    scratch_dir: PathBuf,
    /// Where the fetched source video lands.
    pub local_source: PathBuf,
    /// Where the rendered preview is written.
    pub local_preview: PathBuf,
    /// Destination key: source key with its extension replaced in place.
    pub preview_key: String,
}

impl WorkingPaths {
    /// Derive all working paths from the source key.
    pub fn derive(scratch_root: impl AsRef<Path>, asset_id: &AssetId, source_key: &str) -> Self {
        let basename = basename(source_key);
        let scratch_dir = scratch_root.as_ref().join(asset_id.as_str());
        let local_source = scratch_dir.join(basename);
        let local_preview = scratch_dir.join(replace_extension(basename, PREVIEW_EXTENSION));
        let preview_key = replace_extension(source_key, PREVIEW_EXTENSION);

        Self {
            scratch_dir,
            local_source,
            local_preview,
            preview_key,
        }
    }

    /// The per-invocation scratch directory holding both local files.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }
}

/// Last path segment of a key.
fn basename(key: &str) -> &str {
    match key.rfind('/') {
        Some(i) => &key[i + 1..],
        None => key,
    }
}

/// Replace the extension of the key's final segment, preserving all
/// directory segments. Keys without an extension gain one.
fn replace_extension(key: &str, ext: &str) -> String {
    let (dir, base) = match key.rfind('/') {
        Some(i) => (&key[..=i], &key[i + 1..]),
        None => ("", key),
    };
    match base.rfind('.') {
        Some(i) if i > 0 => format!("{}{}.{}", dir, &base[..i], ext),
        _ => format!("{}{}.{}", dir, base, ext),
    }
}
