//! Asset locator: finds the files that sit next to a merged download.
//!
//! All lookups are keyed on the merged output's filename stem. Nothing here
//! fails: a missing sidecar, thumbnail or subtitle simply means that
//! enrichment is skipped.

mod sidecar;
mod subtitle;
mod thumbnail;

pub use sidecar::{destination_for, find_audio_sidecars, AudioSidecar, AUDIO_SIDECAR_EXTENSIONS};
pub use subtitle::{find_subtitle, SUBTITLE_EXTENSIONS};
pub use thumbnail::{find_thumbnail, THUMBNAIL_EXTENSIONS};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lists files in the stem's directory whose name starts with `<stem>.`,
/// returned as (path, remainder after the stem) pairs sorted by file name.
fn sibling_files(stem_path: &Path) -> Vec<(PathBuf, String)> {
    let Some(stem_name) = stem_path.file_name().and_then(|n| n.to_str()) else {
        return Vec::new();
    };
    let dir = match stem_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Cannot list sibling files");
            return Vec::new();
        }
    };

    let mut siblings: Vec<(PathBuf, String)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let rest = name.strip_prefix(stem_name)?;
            if !rest.starts_with('.') {
                return None;
            }
            Some((entry.path(), rest.to_string()))
        })
        .collect();

    siblings.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));
    siblings
}
