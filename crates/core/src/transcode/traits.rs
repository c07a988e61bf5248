//! Trait definitions for the transcode module.

use super::error::TranscodeError;

/// What a finished transcoder run reported.
#[derive(Debug, Clone, Default)]
pub struct TranscodeOutput {
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Everything written to the diagnostic stream.
    pub stderr: String,
}

impl TranscodeOutput {
    pub fn success() -> Self {
        Self {
            success: true,
            code: Some(0),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stderr: stderr.into(),
        }
    }
}

/// An external tool that can run a prepared argument list.
///
/// Calls block until the tool exits. Implementations return `Ok` for any
/// run that started, successful or not; `Err` is reserved for failing to
/// start the tool at all.
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Runs the tool with the given arguments (without the program name).
    fn run(&self, args: &[String]) -> Result<TranscodeOutput, TranscodeError>;

    /// Validates that the tool is installed and answers.
    fn validate(&self) -> Result<(), TranscodeError>;
}
