//! Cover art preparation.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::family::{ContainerFamily, CoverStrategy};
use super::traits::Transcoder;
use super::transient::TransientFile;

/// How the cover ends up in the output, if at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverArt {
    /// Extra input mapped as a video stream with the `attached_pic` disposition.
    AttachedPicture(PathBuf),
    /// File attachment with a declared mime type.
    Attachment { path: PathBuf, mime: &'static str },
    /// No cover art.
    None,
}

impl CoverArt {
    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A cover decision plus the converted file backing it, if one was made.
#[derive(Debug)]
pub struct PreparedCover {
    pub art: CoverArt,
    /// Deleted when the prepared cover is dropped.
    pub converted: Option<TransientFile>,
}

impl PreparedCover {
    fn none() -> Self {
        Self {
            art: CoverArt::None,
            converted: None,
        }
    }
}

/// Mime type declared for a Matroska attachment.
pub fn thumbnail_mime(path: &Path) -> &'static str {
    match extension_lower(path).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

/// `cover.webp` becomes `cover.cover.png`.
pub fn converted_cover_path(thumbnail: &Path) -> PathBuf {
    thumbnail.with_extension("cover.png")
}

/// Decides how `thumbnail` is embedded into a `family` container.
///
/// Images the container cannot take as-is are converted to PNG first with
/// the transcoder. A converted file that already exists is reused. When the
/// conversion fails the output simply gets no cover.
pub fn prepare_cover<T: Transcoder + ?Sized>(
    thumbnail: Option<&Path>,
    family: ContainerFamily,
    transcoder: &T,
) -> PreparedCover {
    let Some(thumbnail) = thumbnail else {
        return PreparedCover::none();
    };

    match family.cover_strategy() {
        CoverStrategy::None => PreparedCover::none(),
        CoverStrategy::Attachment => PreparedCover {
            art: CoverArt::Attachment {
                path: thumbnail.to_path_buf(),
                mime: thumbnail_mime(thumbnail),
            },
            converted: None,
        },
        CoverStrategy::AttachedPicture => {
            let ext = extension_lower(thumbnail).unwrap_or_default();
            if family.accepts_cover_extension(&ext) {
                return PreparedCover {
                    art: CoverArt::AttachedPicture(thumbnail.to_path_buf()),
                    converted: None,
                };
            }
            convert_to_png(thumbnail, transcoder)
        }
    }
}

fn convert_to_png<T: Transcoder + ?Sized>(thumbnail: &Path, transcoder: &T) -> PreparedCover {
    let target = converted_cover_path(thumbnail);
    let guard = TransientFile::new(&target);

    if target.is_file() {
        debug!(path = %target.display(), "Reusing converted cover");
        return PreparedCover {
            art: CoverArt::AttachedPicture(target),
            converted: Some(guard),
        };
    }

    info!(from = %thumbnail.display(), to = %target.display(), "Converting cover to PNG");
    let args = vec![
        "-y".to_string(),
        "-i".to_string(),
        thumbnail.to_string_lossy().to_string(),
        target.to_string_lossy().to_string(),
    ];

    match transcoder.run(&args) {
        Ok(output) if output.success && target.is_file() => PreparedCover {
            art: CoverArt::AttachedPicture(target),
            converted: Some(guard),
        },
        Ok(output) => {
            warn!(
                thumbnail = %thumbnail.display(),
                code = ?output.code,
                "Cover conversion failed, continuing without cover art"
            );
            PreparedCover {
                art: CoverArt::None,
                converted: Some(guard),
            }
        }
        Err(e) => {
            warn!(
                thumbnail = %thumbnail.display(),
                error = %e,
                "Cover conversion could not run, continuing without cover art"
            );
            PreparedCover {
                art: CoverArt::None,
                converted: Some(guard),
            }
        }
    }
}

fn extension_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
