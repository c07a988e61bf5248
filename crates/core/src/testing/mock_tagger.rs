//! Mock lyrics tagger for testing.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::tagger::{LyricsTagger, TaggerError};
use crate::transcode::ContainerFamily;

/// A recorded lyrics write.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLyrics {
    pub path: PathBuf,
    pub family: ContainerFamily,
    pub lyrics: String,
}

#[derive(Debug, Default)]
struct TaggerState {
    writes: Vec<RecordedLyrics>,
    fail_reason: Option<String>,
}

/// Mock implementation of the [`LyricsTagger`] trait. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTagger {
    state: Arc<Mutex<TaggerState>>,
}

impl MockTagger {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, TaggerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded writes, failed ones included.
    pub fn recorded_writes(&self) -> Vec<RecordedLyrics> {
        self.state().writes.clone()
    }

    /// Every write from now on fails with this reason.
    pub fn set_failure(&self, reason: impl Into<String>) {
        self.state().fail_reason = Some(reason.into());
    }
}

impl LyricsTagger for MockTagger {
    fn name(&self) -> &str {
        "mock"
    }

    fn write_lyrics(
        &self,
        path: &Path,
        family: ContainerFamily,
        lyrics: &str,
    ) -> Result<(), TaggerError> {
        let mut state = self.state();
        state.writes.push(RecordedLyrics {
            path: path.to_path_buf(),
            family,
            lyrics: lyrics.to_string(),
        });
        match &state.fail_reason {
            Some(reason) => Err(TaggerError::write(path, reason.clone())),
            None => Ok(()),
        }
    }
}
