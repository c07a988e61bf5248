//! Finding the merged output file for a manifest stem.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Merged container extensions, probed in this order.
pub const MERGED_EXTENSIONS: &[&str] = &["mkv", "mp4", "webm", "mov", "flv"];

/// Sibling extensions that are never the merged output.
pub const NON_MEDIA_EXTENSIONS: &[&str] = &[
    "json",
    "description",
    "png",
    "jpg",
    "jpeg",
    "webp",
    "vtt",
    "srt",
    "ffmeta",
    "part",
    "ytdl",
    "txt",
];

static FORMAT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.f\d+\.").expect("valid format token regex"));

/// Finds `<stem>.<ext>` in `dir`.
///
/// The conventional container extensions are probed first; otherwise the
/// first sibling in name order that is neither a sub-stream (`.f<digits>.`)
/// nor a known non-media sidecar is used.
pub fn resolve_merged_output(dir: &Path, stem: &str) -> Option<PathBuf> {
    for ext in MERGED_EXTENSIONS {
        let candidate = dir.join(format!("{}.{}", stem, ext));
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Cannot scan for merged output");
            return None;
        }
    };

    let prefix = format!("{}.", stem);
    let mut candidates: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let ext = name.strip_prefix(&prefix)?;
            if ext.is_empty() || ext.contains('.') || FORMAT_TOKEN.is_match(&name) {
                return None;
            }
            let lower = ext.to_ascii_lowercase();
            if NON_MEDIA_EXTENSIONS.contains(&lower.as_str()) {
                return None;
            }
            Some((name, entry.path()))
        })
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    candidates.into_iter().next().map(|(_, path)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn test_probe_order() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Song [id].webm");
        let mp4 = touch(dir.path(), "Song [id].mp4");
        assert_eq!(resolve_merged_output(dir.path(), "Song [id]"), Some(mp4));
    }

    #[test]
    fn test_scan_fallback() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Song [id].info.json");
        touch(dir.path(), "Song [id].f140.m4a");
        touch(dir.path(), "Song [id].webp");
        touch(dir.path(), "Song [id].en.vtt");
        touch(dir.path(), "Song [id].description");
        let avi = touch(dir.path(), "Song [id].avi");
        touch(dir.path(), "Song [id].ts");
        assert_eq!(resolve_merged_output(dir.path(), "Song [id]"), Some(avi));
    }

    #[test]
    fn test_only_sidecars_is_unresolved() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Song [id].info.json");
        touch(dir.path(), "Song [id].f251.webm");
        touch(dir.path(), "Song [id].png");
        touch(dir.path(), "Other [x].mkv");
        assert_eq!(resolve_merged_output(dir.path(), "Song [id]"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinks() {
        let library = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();
        let target = touch(library.path(), "movie.avi");
        let link = dir.path().join("Song [id].avi");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        assert_eq!(resolve_merged_output(dir.path(), "Song [id]"), Some(link));
    }

    #[test]
    fn test_missing_dir() {
        assert_eq!(resolve_merged_output(Path::new("/nonexistent/dir"), "a"), None);
    }
}
