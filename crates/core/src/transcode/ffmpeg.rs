//! FFmpeg-based transcoder implementation.

use std::process::{Command, Stdio};
use tracing::debug;

use super::error::TranscodeError;
use super::traits::{TranscodeOutput, Transcoder};
use crate::config::TranscoderConfig;

/// Runs `ffmpeg` as a blocking child process.
pub struct FfmpegTranscoder {
    config: TranscoderConfig,
}

impl FfmpegTranscoder {
    /// Creates a new FFmpeg transcoder with the given configuration.
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder using `ffmpeg` from `PATH`.
    pub fn with_defaults() -> Self {
        Self::new(TranscoderConfig::default())
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    fn map_spawn_error(&self, e: std::io::Error) -> TranscodeError {
        if e.kind() == std::io::ErrorKind::NotFound {
            TranscodeError::ToolNotFound {
                path: self.config.ffmpeg_path.clone(),
            }
        } else {
            TranscodeError::Io(e)
        }
    }
}

impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn run(&self, args: &[String]) -> Result<TranscodeOutput, TranscodeError> {
        debug!(tool = %self.config.ffmpeg_path.display(), ?args, "Running transcoder");

        let output = Command::new(&self.config.ffmpeg_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| self.map_spawn_error(e))?;

        Ok(TranscodeOutput {
            success: output.status.success(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn validate(&self) -> Result<(), TranscodeError> {
        let output = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.map_spawn_error(e))?;

        if !output.status.success() {
            return Err(TranscodeError::failed(
                output.status.code(),
                format!(
                    "ffmpeg -version failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        Ok(())
    }
}
