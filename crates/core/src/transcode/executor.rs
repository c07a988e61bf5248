//! Runs transcode plans with the idempotent-skip and cleanup rules.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::command::{CommandBuilder, EmbedJob};
use super::error::TranscodeError;
use super::traits::Transcoder;
use crate::config::Config;

/// Result of a successful [`TranscodeExecutor::execute`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeOutcome {
    /// A new destination file was written.
    Created {
        cover_embedded: bool,
        chapter_count: usize,
        /// Lyrics were written by the transcode itself.
        lyrics_inline: bool,
    },
    /// The destination was already there; nothing ran.
    AlreadyExists,
}

/// Returns the last `max_chars` characters of `text`.
pub fn diagnostic_tail(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    text.chars().skip(count - max_chars).collect()
}

/// Executes embed jobs against a [`Transcoder`].
pub struct TranscodeExecutor<T: Transcoder> {
    transcoder: Arc<T>,
    builder: CommandBuilder,
    diagnostic_tail_chars: usize,
}

impl<T: Transcoder> TranscodeExecutor<T> {
    pub fn new(transcoder: T, config: &Config) -> Self {
        Self::with_shared(Arc::new(transcoder), config)
    }

    /// Creates an executor around a transcoder that is also used elsewhere.
    pub fn with_shared(transcoder: Arc<T>, config: &Config) -> Self {
        Self {
            transcoder,
            builder: CommandBuilder::new(config.transcoder.clone(), config.tagging.clone()),
            diagnostic_tail_chars: config.transcoder.diagnostic_tail_chars,
        }
    }

    pub fn transcoder(&self) -> &T {
        &self.transcoder
    }

    /// Produces `job.destination` unless it already exists.
    ///
    /// On a failed run the partial destination is removed and the error
    /// carries only the tail of the diagnostic output. The chapter file and
    /// any converted cover are removed on every path.
    pub fn execute(&self, job: &EmbedJob<'_>) -> Result<TranscodeOutcome, TranscodeError> {
        if job.destination.exists() {
            info!(
                destination = %job.destination.display(),
                "Destination already exists, skipping"
            );
            return Ok(TranscodeOutcome::AlreadyExists);
        }

        let mut plan = self.builder.build(job, self.transcoder.as_ref())?;
        debug!(
            transcoder = self.transcoder.name(),
            args = ?plan.args(),
            "Running transcode"
        );

        let result = match self.transcoder.run(plan.args()) {
            Ok(output) if output.success => {
                info!(
                    destination = %job.destination.display(),
                    family = %job.family,
                    cover = plan.cover().is_some(),
                    chapters = plan.chapter_count(),
                    "Created tagged audio file"
                );
                Ok(TranscodeOutcome::Created {
                    cover_embedded: plan.cover().is_some(),
                    chapter_count: plan.chapter_count(),
                    lyrics_inline: plan.lyrics_inline(),
                })
            }
            Ok(output) => {
                remove_partial(job.destination);
                let diagnostic = diagnostic_tail(&output.stderr, self.diagnostic_tail_chars);
                warn!(
                    destination = %job.destination.display(),
                    code = ?output.code,
                    "Transcode failed"
                );
                Err(TranscodeError::failed(output.code, diagnostic))
            }
            Err(e) => {
                remove_partial(job.destination);
                Err(e)
            }
        };

        plan.cleanup();
        result
    }
}

fn remove_partial(destination: &Path) {
    match fs::remove_file(destination) {
        Ok(()) => debug!(destination = %destination.display(), "Removed partial output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            destination = %destination.display(),
            error = %e,
            "Failed to remove partial output"
        ),
    }
}
