//! Download descriptor: everything known about one finished download.
//!
//! A descriptor is either handed over directly by the download orchestrator
//! (inline mode) or rebuilt from a persisted manifest by
//! [`crate::manifest::load_manifest`] (standalone recovery).

mod types;

pub use types::{Chapter, DownloadDescriptor, RequestedFormat, SubtitleRef, ThumbnailRef};
