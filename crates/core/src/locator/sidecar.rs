//! Audio-only sidecar discovery.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::sibling_files;
use crate::descriptor::DownloadDescriptor;

/// Extensions an audio-only stream is kept under, in lookup order.
pub const AUDIO_SIDECAR_EXTENSIONS: &[&str] = &["m4a", "webm", "opus", "ogg"];

/// `.f<id>.<ext>` immediately after the stem.
static SIDECAR_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.f(\d+)\.([A-Za-z0-9]+)$").expect("valid sidecar regex"));

/// The `.f<id>` token right before the final extension.
static FORMAT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.f\d+(\.[^./\\]+)$").expect("valid format token regex"));

/// A kept audio-only stream of a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSidecar {
    pub path: PathBuf,
    /// The digits of the `.f<id>` filename token.
    pub format_id: String,
}

impl AudioSidecar {
    /// Where the tagged copy of this sidecar goes.
    pub fn destination(&self) -> PathBuf {
        destination_for(&self.path)
    }
}

/// Finds every `<stem>.f<id>.<ext>` file whose id is an audio-only format
/// of the descriptor.
///
/// Files whose token does not name an audio-only requested format are
/// ignored, so a coincidentally similar name never gets picked up.
pub fn find_audio_sidecars(descriptor: &DownloadDescriptor) -> Vec<AudioSidecar> {
    let audio_ids = descriptor.audio_only_format_ids();
    if audio_ids.is_empty() {
        debug!(id = %descriptor.id, "No audio-only formats requested");
        return Vec::new();
    }

    let siblings = sibling_files(&descriptor.stem_path());
    let mut found = Vec::new();

    for ext in AUDIO_SIDECAR_EXTENSIONS {
        for (path, rest) in &siblings {
            let Some(caps) = SIDECAR_SUFFIX.captures(rest) else {
                continue;
            };
            if &caps[2] != *ext {
                continue;
            }
            let format_id = &caps[1];
            if audio_ids.contains(format_id) {
                found.push(AudioSidecar {
                    path: path.clone(),
                    format_id: format_id.to_string(),
                });
            } else {
                debug!(path = %path.display(), format_id, "Ignoring non audio-only sidecar");
            }
        }
    }

    found
}

/// Strips the `.f<id>` token: `Title [id].f140.m4a` becomes `Title [id].m4a`.
///
/// Paths without a token are returned unchanged.
pub fn destination_for(sidecar: &Path) -> PathBuf {
    let Some(name) = sidecar.file_name().and_then(|n| n.to_str()) else {
        return sidecar.to_path_buf();
    };
    let cleaned = FORMAT_TOKEN.replace(name, "$1");
    sidecar.with_file_name(cleaned.as_ref())
}
