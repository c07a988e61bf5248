//! Batch driver for standalone recovery.
//!
//! Walks a directory of manifests and runs the item pipeline for each one.
//! A single item never stops the batch; only an unreadable root does.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::config::RecoveryConfig;
use crate::manifest::{load_manifest, LoadedManifest, ManifestError};
use crate::pipeline::{AudioExtractor, ItemReport};
use crate::tagger::LyricsTagger;
use crate::transcode::Transcoder;

/// Errors that stop a whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The root directory could not be listed.
    #[error("Cannot read directory {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Counts of a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Items whose destinations were all created or already present.
    pub processed: usize,
    /// Manifests that resolved to nothing to process.
    pub skipped: usize,
    /// Manifests that could not be loaded or had a failed destination.
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }
}

/// Result of running one manifest.
#[derive(Debug, Clone)]
pub enum ManifestOutcome {
    Processed(ItemReport),
    Skipped { reason: String },
}

/// Loads one manifest and processes it if it resolves.
pub fn process_manifest<T: Transcoder, L: LyricsTagger>(
    path: &Path,
    extractor: &AudioExtractor<T, L>,
    recovery: &RecoveryConfig,
) -> Result<ManifestOutcome, ManifestError> {
    match load_manifest(path, recovery)? {
        LoadedManifest::Resolved(descriptor) => {
            Ok(ManifestOutcome::Processed(extractor.process(&descriptor)))
        }
        LoadedManifest::Unresolved { stem, reason } => {
            info!(manifest = %path.display(), stem = %stem, reason = %reason, "Skipping manifest");
            Ok(ManifestOutcome::Skipped { reason })
        }
    }
}

/// Manifest files under `dir` in sorted order.
pub fn find_manifests(
    dir: &Path,
    recursive: bool,
    recovery: &RecoveryConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    fs::read_dir(dir).map_err(|source| BatchError::RootUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut manifests = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let is_manifest = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&recovery.manifest_suffix));
        if is_manifest {
            manifests.push(entry.into_path());
        }
    }
    Ok(manifests)
}

/// Processes every manifest under `dir`.
pub fn run_batch<T: Transcoder, L: LyricsTagger>(
    dir: &Path,
    recursive: bool,
    extractor: &AudioExtractor<T, L>,
    recovery: &RecoveryConfig,
) -> Result<BatchSummary, BatchError> {
    let manifests = find_manifests(dir, recursive, recovery)?;
    info!(dir = %dir.display(), count = manifests.len(), recursive, "Starting recovery batch");

    let mut summary = BatchSummary::default();
    for manifest in &manifests {
        match process_manifest(manifest, extractor, recovery) {
            Ok(ManifestOutcome::Processed(report)) if report.is_success() => {
                summary.processed += 1;
            }
            Ok(ManifestOutcome::Processed(report)) => {
                warn!(
                    manifest = %manifest.display(),
                    id = %report.id,
                    "Item finished with failed destinations"
                );
                summary.failed += 1;
            }
            Ok(ManifestOutcome::Skipped { .. }) => summary.skipped += 1,
            Err(e) => {
                error!(manifest = %manifest.display(), error = %e, "Failed to load manifest");
                summary.failed += 1;
            }
        }
    }

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed,
        "Recovery batch finished"
    );
    Ok(summary)
}
