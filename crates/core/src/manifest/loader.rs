//! Manifest parsing and path re-resolution.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::ManifestError;
use super::raw::RawManifest;
use super::resolve::resolve_merged_output;
use crate::config::RecoveryConfig;
use crate::descriptor::{Chapter, DownloadDescriptor, RequestedFormat, SubtitleRef, ThumbnailRef};

/// What a manifest turned into.
#[derive(Debug, Clone)]
pub enum LoadedManifest {
    /// A descriptor whose merged output exists on disk.
    Resolved(DownloadDescriptor),
    /// Nothing to process for this manifest. Callers treat this as a skip.
    Unresolved { stem: String, reason: String },
}

impl LoadedManifest {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// The shared filename stem of a manifest, e.g. `Song [id]` for
/// `Song [id].info.json`.
///
/// Falls back to dropping the last extension when the name does not end in
/// `suffix`.
pub fn manifest_stem(path: &Path, suffix: &str) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    match name.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() => Some(stem.to_string()),
        _ => path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    }
}

/// Loads a persisted manifest and rebuilds its download descriptor.
///
/// Thumbnail and subtitle paths are pointed at the manifest's own directory;
/// the paths recorded at download time are not trusted.
pub fn load_manifest(
    path: &Path,
    recovery: &RecoveryConfig,
) -> Result<LoadedManifest, ManifestError> {
    if !path.is_file() {
        return Err(ManifestError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawManifest =
        serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let stem = manifest_stem(path, &recovery.manifest_suffix).unwrap_or_default();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if raw.kind.as_deref() == Some("playlist") {
        return Ok(LoadedManifest::Unresolved {
            stem,
            reason: "manifest describes a playlist, not a single item".to_string(),
        });
    }

    let Some(output_path) = resolve_merged_output(&dir, &stem) else {
        return Ok(LoadedManifest::Unresolved {
            reason: format!("no merged output file found for '{}'", stem),
            stem,
        });
    };

    let descriptor = build_descriptor(raw, &dir, &stem, output_path);
    info!(
        manifest = %path.display(),
        output = %descriptor.output_path.display(),
        thumbnails = descriptor.thumbnails.len(),
        subtitles = descriptor.subtitles.len(),
        "Loaded manifest"
    );
    Ok(LoadedManifest::Resolved(descriptor))
}

fn build_descriptor(
    raw: RawManifest,
    dir: &Path,
    stem: &str,
    output_path: PathBuf,
) -> DownloadDescriptor {
    let chapters = raw
        .chapters
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| match (c.start_time, c.end_time) {
            (Some(start), Some(end)) => {
                Some(Chapter::new(start, end, c.title.unwrap_or_default()))
            }
            _ => {
                debug!(title = ?c.title, "Chapter without start or end time ignored");
                None
            }
        })
        .collect();

    let thumbnails = raw
        .thumbnails
        .unwrap_or_default()
        .into_iter()
        .filter_map(|t| t.filepath)
        .filter_map(|p| relocate(dir, &p))
        .map(ThumbnailRef::new)
        .collect();

    let requested_formats = raw
        .requested_formats
        .unwrap_or_default()
        .into_iter()
        .filter_map(|f| {
            Some(RequestedFormat {
                format_id: f.format_id?,
                acodec: f.acodec,
                vcodec: f.vcodec,
            })
        })
        .collect();

    let mut subtitles = BTreeMap::new();
    for (lang, sub) in raw.requested_subtitles.unwrap_or_default() {
        let ext = sub.ext.or_else(|| {
            sub.filepath
                .as_deref()
                .and_then(|p| p.extension())
                .and_then(|e| e.to_str())
                .map(str::to_string)
        });
        let Some(ext) = ext else {
            debug!(lang = %lang, "Subtitle entry without extension ignored");
            continue;
        };
        let path = sub
            .filepath
            .as_deref()
            .and_then(|p| relocate(dir, p))
            .unwrap_or_else(|| dir.join(format!("{}.{}.{}", stem, lang, ext)));
        subtitles.insert(lang, SubtitleRef::new(path, ext));
    }

    DownloadDescriptor {
        id: raw.id.unwrap_or_default(),
        title: raw.title,
        track: raw.track,
        alt_title: raw.alt_title,
        artist: raw.artist,
        creator: raw.creator,
        uploader: raw.uploader,
        channel: raw.channel,
        album: raw.album,
        playlist_title: raw.playlist_title,
        playlist_index: raw.playlist_index,
        upload_date: raw.upload_date,
        webpage_url: raw.webpage_url,
        description: raw.description,
        chapters,
        thumbnails,
        requested_formats,
        subtitles,
        output_path,
    }
}

/// Same file name, manifest's directory.
fn relocate(dir: &Path, recorded: &Path) -> Option<PathBuf> {
    recorded.file_name().map(|name| dir.join(name))
}
