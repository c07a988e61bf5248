//! Error types for the tagger module.

use std::path::PathBuf;
use thiserror::Error;

use crate::transcode::ContainerFamily;

/// Errors that can occur while writing tags after a transcode.
#[derive(Debug, Error)]
pub enum TaggerError {
    /// The file could not be opened or parsed as audio.
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// The tags could not be saved.
    #[error("Failed to write tags to {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// The family has no tag format this tagger can write.
    #[error("Lyrics tags are not supported for {family} containers")]
    Unsupported { family: ContainerFamily },
}

impl TaggerError {
    pub fn read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
