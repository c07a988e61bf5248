pub mod batch;
pub mod config;
pub mod descriptor;
pub mod locator;
pub mod lyrics;
pub mod manifest;
pub mod pipeline;
pub mod tagger;
pub mod testing;
pub mod transcode;

pub use batch::{
    find_manifests, process_manifest, run_batch, BatchError, BatchSummary, ManifestOutcome,
};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config, ConfigError,
    RecoveryConfig, TaggingConfig, TranscoderConfig,
};
pub use descriptor::{Chapter, DownloadDescriptor, RequestedFormat, SubtitleRef, ThumbnailRef};
pub use locator::{
    destination_for, find_audio_sidecars, find_subtitle, find_thumbnail, AudioSidecar,
};
pub use lyrics::{extract_lyrics, extract_lyrics_from_str};
pub use manifest::{load_manifest, LoadedManifest, ManifestError};
pub use pipeline::{AudioExtractor, DestinationReport, DestinationStatus, ItemReport};
pub use tagger::{LoftyTagger, LyricsTagger, TaggerError};
pub use transcode::{
    ContainerFamily, FfmpegTranscoder, TagSet, TranscodeError, TranscodeExecutor,
    TranscodeOutcome, Transcoder,
};
