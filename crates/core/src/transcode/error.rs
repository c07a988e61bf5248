//! Error types for the transcode module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing a tagged audio file.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The transcoder binary could not be started.
    #[error("Transcoder not found at path: {path}")]
    ToolNotFound { path: PathBuf },

    /// The destination extension belongs to no known container family.
    #[error("Unsupported destination container: {path}")]
    UnsupportedContainer { path: PathBuf },

    /// The transcoder exited unsuccessfully.
    #[error("Transcode failed (exit code {code:?}): {diagnostic}")]
    Failed {
        code: Option<i32>,
        /// Trailing part of the tool's diagnostic output.
        diagnostic: String,
    },

    /// The chapter metadata file could not be written.
    #[error("Failed to write chapter file {path}: {source}")]
    ChapterFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while running the transcoder.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscodeError {
    /// Creates a failed-run error.
    pub fn failed(code: Option<i32>, diagnostic: impl Into<String>) -> Self {
        Self::Failed {
            code,
            diagnostic: diagnostic.into(),
        }
    }

    /// Short text suitable for a per-destination report.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Failed { diagnostic, .. } => diagnostic.clone(),
            other => other.to_string(),
        }
    }
}
