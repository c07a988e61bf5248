//! Mock transcoder for testing.

use std::fs;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::transcode::{TranscodeError, TranscodeOutput, Transcoder};

/// Bytes the mock writes as the output of a successful run.
pub const MOCK_OUTPUT_PREFIX: &str = "mock-transcode\n";

/// A recorded run for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedInvocation {
    /// The arguments the transcoder received.
    pub args: Vec<String>,
    /// Content of the `-f ffmetadata` input, read while it still existed.
    pub ffmetadata: Option<String>,
    /// Whether the run reported success.
    pub success: bool,
}

impl RecordedInvocation {
    /// The value following the first occurrence of `flag`.
    pub fn value_after(&self, flag: &str) -> Option<&str> {
        self.values_after(flag).into_iter().next()
    }

    /// Every value following an occurrence of `flag`.
    pub fn values_after(&self, flag: &str) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|w| w[0] == flag)
            .map(|w| w[1].as_str())
            .collect()
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// Metadata values passed with `-metadata key=value`.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        let prefix = format!("{}=", key);
        self.values_after("-metadata")
            .into_iter()
            .find_map(|v| v.strip_prefix(prefix.as_str()))
    }

    /// The output path (last argument).
    pub fn output(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    /// Main transcodes map streams; cover conversions do not.
    pub fn is_cover_conversion(&self) -> bool {
        !self.has_arg("-map")
    }
}

#[derive(Debug, Default)]
struct MockState {
    invocations: Vec<RecordedInvocation>,
    fail_next: Option<String>,
    fail_transcodes: Option<String>,
    unavailable: bool,
}

/// Mock implementation of the [`Transcoder`] trait.
///
/// Successful runs write a small file at the output path so callers see the
/// same filesystem effects as with the real tool. Clones share state.
///
/// # Example
///
/// ```rust,ignore
/// use audiokeep_core::testing::MockTranscoder;
///
/// let transcoder = MockTranscoder::new();
/// transcoder.fail_next("Invalid data found when processing input");
///
/// // run the pipeline...
///
/// let runs = transcoder.recorded_invocations();
/// assert_eq!(runs.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTranscoder {
    state: Arc<Mutex<MockState>>,
}

impl MockTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded invocations.
    pub fn recorded_invocations(&self) -> Vec<RecordedInvocation> {
        self.state().invocations.clone()
    }

    /// Recorded main transcodes, without cover conversions.
    pub fn recorded_transcodes(&self) -> Vec<RecordedInvocation> {
        self.state()
            .invocations
            .iter()
            .filter(|i| !i.is_cover_conversion())
            .cloned()
            .collect()
    }

    pub fn invocation_count(&self) -> usize {
        self.state().invocations.len()
    }

    /// The next run of any kind exits with status 1 and this diagnostic.
    pub fn fail_next(&self, stderr: impl Into<String>) {
        self.state().fail_next = Some(stderr.into());
    }

    /// Every main transcode from now on writes a partial output file and
    /// then exits with status 1. Cover conversions keep succeeding.
    pub fn fail_with_partial_output(&self, stderr: impl Into<String>) {
        self.state().fail_transcodes = Some(stderr.into());
    }

    /// Simulates a missing binary: every run fails to start.
    pub fn set_unavailable(&self) {
        self.state().unavailable = true;
    }
}

impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    fn run(&self, args: &[String]) -> Result<TranscodeOutput, TranscodeError> {
        let mut state = self.state();
        if state.unavailable {
            return Err(TranscodeError::ToolNotFound {
                path: "mock-ffmpeg".into(),
            });
        }

        let mut invocation = RecordedInvocation {
            args: args.to_vec(),
            ffmetadata: None,
            success: true,
        };
        invocation.ffmetadata = args
            .windows(4)
            .find(|w| w[0] == "-f" && w[1] == "ffmetadata" && w[2] == "-i")
            .and_then(|w| fs::read_to_string(&w[3]).ok());

        let output = invocation.output().map(str::to_string);
        let failure = match state.fail_next.take() {
            Some(stderr) => Some((stderr, false)),
            None if !invocation.is_cover_conversion() => {
                state.fail_transcodes.clone().map(|stderr| (stderr, true))
            }
            None => None,
        };

        let result = match failure {
            Some((stderr, partial)) => {
                if let (true, Some(output)) = (partial, &output) {
                    fs::write(output, b"partial")?;
                }
                invocation.success = false;
                TranscodeOutput::failure(1, stderr)
            }
            None => {
                if let Some(output) = &output {
                    fs::write(output, format!("{}{}", MOCK_OUTPUT_PREFIX, args.join("\n")))?;
                }
                TranscodeOutput::success()
            }
        };

        state.invocations.push(invocation);
        Ok(result)
    }

    fn validate(&self) -> Result<(), TranscodeError> {
        if self.state().unavailable {
            return Err(TranscodeError::ToolNotFound {
                path: "mock-ffmpeg".into(),
            });
        }
        Ok(())
    }
}
