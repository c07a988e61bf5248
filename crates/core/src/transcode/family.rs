//! Container families and their metadata capabilities.

use std::path::Path;

/// How a family carries cover art.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverStrategy {
    /// A video stream flagged `attached_pic`; PNG or JPEG only.
    AttachedPicture,
    /// A file attachment with a declared mime type; any image type.
    Attachment,
    /// Cover art is not embedded.
    None,
}

/// Output container families, chosen from the destination extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFamily {
    /// `.m4a`, `.mp4`
    Mp4,
    /// `.webm`, `.mkv`
    Matroska,
    /// `.opus`, `.ogg`
    Ogg,
}

impl ContainerFamily {
    /// Classifies a file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "m4a" | "mp4" => Some(Self::Mp4),
            "webm" | "mkv" => Some(Self::Matroska),
            "opus" | "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    /// Classifies a destination path by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Matroska => "matroska",
            Self::Ogg => "ogg",
        }
    }

    pub fn cover_strategy(self) -> CoverStrategy {
        match self {
            Self::Mp4 => CoverStrategy::AttachedPicture,
            Self::Matroska => CoverStrategy::Attachment,
            Self::Ogg => CoverStrategy::None,
        }
    }

    /// Whether an image with this extension can be embedded as-is.
    pub fn accepts_cover_extension(self, ext: &str) -> bool {
        match self.cover_strategy() {
            CoverStrategy::AttachedPicture => {
                matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg")
            }
            CoverStrategy::Attachment => true,
            CoverStrategy::None => false,
        }
    }

    /// All families import chapters from an ffmetadata input.
    pub fn supports_chapters(self) -> bool {
        true
    }

    /// The metadata field that carries lyrics when the transcode writes them
    /// itself. `None` for families whose lyrics go through a tag editor.
    pub fn inline_lyrics_key(self) -> Option<&'static str> {
        match self {
            Self::Matroska => Some("lyrics"),
            Self::Mp4 | Self::Ogg => None,
        }
    }

    pub fn supports_inline_lyrics(self) -> bool {
        self.inline_lyrics_key().is_some()
    }

    /// Whether lyrics have to be written by a tag editor after the transcode.
    pub fn needs_post_embed_lyrics(self) -> bool {
        !self.supports_inline_lyrics()
    }
}

impl std::fmt::Display for ContainerFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
