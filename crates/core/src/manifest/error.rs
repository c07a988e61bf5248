//! Error types for the manifest module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file does not exist.
    #[error("Manifest not found: {path}")]
    NotFound { path: PathBuf },

    /// The manifest exists but could not be read.
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON of the expected shape.
    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ManifestError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
