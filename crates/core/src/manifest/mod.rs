//! Manifest loader for standalone recovery.
//!
//! A manifest is the `<stem>.info.json` file written next to a finished
//! download. Loading one rebuilds the [`DownloadDescriptor`] the download had
//! in memory, with file paths re-resolved against the manifest's directory.
//!
//! [`DownloadDescriptor`]: crate::descriptor::DownloadDescriptor

mod error;
mod loader;
mod raw;
mod resolve;

pub use error::ManifestError;
pub use loader::{load_manifest, manifest_stem, LoadedManifest};
pub use resolve::{resolve_merged_output, MERGED_EXTENSIONS, NON_MEDIA_EXTENSIONS};
