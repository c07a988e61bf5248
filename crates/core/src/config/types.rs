use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub transcoder: TranscoderConfig,
    #[serde(default)]
    pub tagging: TaggingConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
}

/// External transcoder configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscoderConfig {
    /// Path to the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,
    /// Value passed as `-loglevel` (ffmpeg's own default when unset).
    #[serde(default)]
    pub log_level: Option<String>,
    /// Arguments inserted right before the output path.
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// How many trailing characters of stderr to keep when a run fails.
    #[serde(default = "default_diagnostic_tail")]
    pub diagnostic_tail_chars: usize,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            log_level: None,
            extra_args: Vec::new(),
            diagnostic_tail_chars: default_diagnostic_tail(),
        }
    }
}

impl TranscoderConfig {
    /// Creates a config pointing at a specific ffmpeg binary.
    pub fn with_ffmpeg_path(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            ..Default::default()
        }
    }
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_diagnostic_tail() -> usize {
    500
}

/// Tag mapping configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaggingConfig {
    /// Descriptions longer than this many characters are cut and marked.
    #[serde(default = "default_description_max")]
    pub description_max_chars: usize,
    /// Whether subtitle-derived lyrics are embedded at all.
    #[serde(default = "default_true")]
    pub embed_lyrics: bool,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            description_max_chars: default_description_max(),
            embed_lyrics: true,
        }
    }
}

fn default_description_max() -> usize {
    4000
}

fn default_true() -> bool {
    true
}

/// Standalone recovery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecoveryConfig {
    /// Descend into subdirectories when looking for manifests.
    #[serde(default)]
    pub recursive: bool,
    /// File name suffix identifying a persisted manifest.
    #[serde(default = "default_manifest_suffix")]
    pub manifest_suffix: String,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            manifest_suffix: default_manifest_suffix(),
        }
    }
}

fn default_manifest_suffix() -> String {
    ".info.json".to_string()
}
