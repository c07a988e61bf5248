//! Item pipeline: turns one finished download into tagged audio files.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::descriptor::DownloadDescriptor;
use crate::locator::{find_audio_sidecars, find_subtitle, find_thumbnail};
use crate::lyrics::extract_lyrics;
use crate::tagger::LyricsTagger;
use crate::transcode::{
    ContainerFamily, EmbedJob, TranscodeError, TranscodeExecutor, TranscodeOutcome, Transcoder,
};

/// What happened to one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DestinationStatus {
    Created { lyrics_embedded: bool },
    AlreadyExists,
    Failed { diagnostic: String },
}

/// Per-destination result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    #[serde(flatten)]
    pub status: DestinationStatus,
}

/// Result of processing one descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub id: String,
    pub outputs: Vec<DestinationReport>,
}

impl ItemReport {
    /// No destination failed. An item with no sidecars is a success.
    pub fn is_success(&self) -> bool {
        !self
            .outputs
            .iter()
            .any(|o| matches!(o.status, DestinationStatus::Failed { .. }))
    }

    pub fn created_count(&self) -> usize {
        self.outputs
            .iter()
            .filter(|o| matches!(o.status, DestinationStatus::Created { .. }))
            .count()
    }
}

/// Extracts tagged audio from finished downloads.
///
/// This is the inline entry point: hand it the descriptor of a download that
/// just completed. Standalone recovery goes through [`crate::batch`], which
/// builds descriptors from manifests and then calls [`AudioExtractor::process`].
pub struct AudioExtractor<T: Transcoder, L: LyricsTagger> {
    executor: TranscodeExecutor<T>,
    tagger: Arc<L>,
    embed_lyrics: bool,
}

impl<T: Transcoder, L: LyricsTagger> AudioExtractor<T, L> {
    pub fn new(config: &Config, transcoder: T, tagger: L) -> Self {
        Self {
            executor: TranscodeExecutor::new(transcoder, config),
            tagger: Arc::new(tagger),
            embed_lyrics: config.tagging.embed_lyrics,
        }
    }

    pub fn transcoder(&self) -> &T {
        self.executor.transcoder()
    }

    pub fn tagger(&self) -> &L {
        &self.tagger
    }

    /// Processes every audio sidecar of `descriptor`.
    ///
    /// Never fails as a whole; per-destination problems are reported in the
    /// returned [`ItemReport`].
    pub fn process(&self, descriptor: &DownloadDescriptor) -> ItemReport {
        let mut report = ItemReport {
            id: descriptor.id.clone(),
            outputs: Vec::new(),
        };

        let sidecars = find_audio_sidecars(descriptor);
        if sidecars.is_empty() {
            info!(
                id = %descriptor.id,
                output = %descriptor.output_path.display(),
                "No audio-only sidecars found, nothing to extract"
            );
            return report;
        }

        let thumbnail = find_thumbnail(descriptor);
        let lyrics = if self.embed_lyrics {
            find_subtitle(descriptor).and_then(|path| extract_lyrics(&path))
        } else {
            None
        };
        debug!(
            id = %descriptor.id,
            sidecars = sidecars.len(),
            thumbnail = thumbnail.is_some(),
            lyrics = lyrics.is_some(),
            "Located assets"
        );

        for sidecar in &sidecars {
            let destination = sidecar.destination();
            let status = match ContainerFamily::from_path(&destination) {
                Some(family) => {
                    let job = EmbedJob {
                        descriptor,
                        source: &sidecar.path,
                        destination: &destination,
                        family,
                        thumbnail: thumbnail.as_deref(),
                        lyrics: lyrics.as_deref(),
                    };
                    self.process_destination(&job)
                }
                None => DestinationStatus::Failed {
                    diagnostic: TranscodeError::UnsupportedContainer {
                        path: destination.clone(),
                    }
                    .to_string(),
                },
            };

            report.outputs.push(DestinationReport {
                source: sidecar.path.clone(),
                destination,
                status,
            });
        }

        report
    }

    fn process_destination(&self, job: &EmbedJob<'_>) -> DestinationStatus {
        match self.executor.execute(job) {
            Ok(TranscodeOutcome::AlreadyExists) => DestinationStatus::AlreadyExists,
            Ok(TranscodeOutcome::Created { lyrics_inline, .. }) => {
                let lyrics_embedded = lyrics_inline || self.post_embed_lyrics(job);
                DestinationStatus::Created { lyrics_embedded }
            }
            Err(e) => {
                warn!(
                    destination = %job.destination.display(),
                    error = %e,
                    "Failed to extract audio"
                );
                DestinationStatus::Failed {
                    diagnostic: e.diagnostic(),
                }
            }
        }
    }

    /// Writes lyrics into a family that could not take them during the
    /// transcode. Failure leaves the file as it is.
    fn post_embed_lyrics(&self, job: &EmbedJob<'_>) -> bool {
        let Some(lyrics) = job.lyrics else {
            return false;
        };
        if !job.family.needs_post_embed_lyrics() {
            return false;
        }

        match self.tagger.write_lyrics(job.destination, job.family, lyrics) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    destination = %job.destination.display(),
                    tagger = self.tagger.name(),
                    error = %e,
                    "Could not write lyrics tag, keeping file without lyrics"
                );
                false
            }
        }
    }
}
