//! Transcode module: builds and runs the external tool invocation that
//! writes a tagged copy of an audio sidecar.
//!
//! # Features
//!
//! - Container families with fixed capabilities (cover art, chapters, lyrics)
//! - Cover art as attached picture (MP4) or file attachment (Matroska)
//! - Thumbnail conversion to PNG where the container needs it
//! - Chapter import through a transient ffmetadata file
//! - Tag mapping with fallback precedence
//! - Idempotent skip when the destination already exists
//!
//! # Example
//!
//! ```ignore
//! use audiokeep_core::transcode::{ContainerFamily, EmbedJob, FfmpegTranscoder, TranscodeExecutor};
//!
//! let executor = TranscodeExecutor::new(FfmpegTranscoder::with_defaults(), &config);
//! let job = EmbedJob {
//!     descriptor: &descriptor,
//!     source: &sidecar.path,
//!     destination: &destination,
//!     family: ContainerFamily::Mp4,
//!     thumbnail: thumbnail.as_deref(),
//!     lyrics: None,
//! };
//! let outcome = executor.execute(&job)?;
//! ```

mod chapters;
mod command;
mod cover;
mod error;
mod executor;
mod family;
mod ffmpeg;
mod tags;
mod traits;
mod transient;

pub use chapters::{escape_ffmetadata, render_ffmetadata, write_chapter_file, CHAPTER_FILE_SUFFIX};
pub use command::{CommandBuilder, EmbedJob, TranscodePlan};
pub use cover::{converted_cover_path, prepare_cover, thumbnail_mime, CoverArt, PreparedCover};
pub use error::TranscodeError;
pub use executor::{diagnostic_tail, TranscodeExecutor, TranscodeOutcome};
pub use family::{ContainerFamily, CoverStrategy};
pub use ffmpeg::FfmpegTranscoder;
pub use tags::{TagSet, TRUNCATION_MARKER};
pub use traits::{TranscodeOutput, Transcoder};
pub use transient::TransientFile;
