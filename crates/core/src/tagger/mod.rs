//! Post-embed tag writer.
//!
//! Containers whose transcode cannot carry lyrics get them written here, after
//! the destination file has been created.

mod error;
mod lofty_tagger;

pub use error::TaggerError;
pub use lofty_tagger::LoftyTagger;

use std::path::Path;

use crate::transcode::ContainerFamily;

/// Writes a lyrics tag into an existing audio file.
pub trait LyricsTagger: Send + Sync {
    /// Returns the name of this tagger implementation.
    fn name(&self) -> &str;

    /// Adds `lyrics` to the file at `path`, replacing any existing lyrics.
    fn write_lyrics(
        &self,
        path: &Path,
        family: ContainerFamily,
        lyrics: &str,
    ) -> Result<(), TaggerError>;
}
