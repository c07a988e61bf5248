//! Lyrics tagging with lofty.

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag, TagType};
use std::path::Path;
use tracing::debug;

use super::error::TaggerError;
use super::LyricsTagger;
use crate::transcode::ContainerFamily;

/// Writes lyrics through lofty's native tag formats: an iTunes `ilst` atom
/// for MP4 and a Vorbis comment for Ogg.
#[derive(Debug, Clone, Default)]
pub struct LoftyTagger;

impl LoftyTagger {
    pub fn new() -> Self {
        Self
    }

    /// The tag format lyrics go into for a family.
    pub fn tag_type(family: ContainerFamily) -> Option<TagType> {
        match family {
            ContainerFamily::Mp4 => Some(TagType::Mp4Ilst),
            ContainerFamily::Ogg => Some(TagType::VorbisComments),
            ContainerFamily::Matroska => None,
        }
    }
}

impl LyricsTagger for LoftyTagger {
    fn name(&self) -> &str {
        "lofty"
    }

    fn write_lyrics(
        &self,
        path: &Path,
        family: ContainerFamily,
        lyrics: &str,
    ) -> Result<(), TaggerError> {
        let tag_type = Self::tag_type(family).ok_or(TaggerError::Unsupported { family })?;

        let mut tagged = Probe::open(path)
            .and_then(|probe| probe.read())
            .map_err(|e| TaggerError::read(path, e.to_string()))?;

        if tagged.tag(tag_type).is_none() {
            tagged.insert_tag(Tag::new(tag_type));
        }
        let tag = tagged
            .tag_mut(tag_type)
            .ok_or_else(|| TaggerError::write(path, format!("{:?} tag unavailable", tag_type)))?;
        tag.insert_text(ItemKey::Lyrics, lyrics.to_string());

        tagged
            .save_to_path(path, WriteOptions::default())
            .map_err(|e| TaggerError::write(path, e.to_string()))?;

        debug!(path = %path.display(), family = %family, "Wrote lyrics tag");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// CRC-32 as used by Ogg pages: polynomial 0x04c11db7, no reflection.
    fn ogg_crc(data: &[u8]) -> u32 {
        let mut crc = 0u32;
        for &byte in data {
            crc ^= u32::from(byte) << 24;
            for _ in 0..8 {
                crc = if crc & 0x8000_0000 != 0 {
                    (crc << 1) ^ 0x04c1_1db7
                } else {
                    crc << 1
                };
            }
        }
        crc
    }

    fn ogg_page(header_type: u8, granule: u64, sequence: u32, packet: &[u8]) -> Vec<u8> {
        assert!(packet.len() < 255);
        let mut page = Vec::new();
        page.extend_from_slice(b"OggS");
        page.push(0);
        page.push(header_type);
        page.extend_from_slice(&granule.to_le_bytes());
        page.extend_from_slice(&0x1234_5678u32.to_le_bytes());
        page.extend_from_slice(&sequence.to_le_bytes());
        page.extend_from_slice(&[0; 4]);
        page.push(1);
        page.push(packet.len() as u8);
        page.extend_from_slice(packet);
        let crc = ogg_crc(&page);
        page[22..26].copy_from_slice(&crc.to_le_bytes());
        page
    }

    /// A tiny but well-formed Ogg Opus stream: id header, empty comment
    /// header and one audio page.
    fn minimal_opus() -> Vec<u8> {
        let mut head = b"OpusHead".to_vec();
        head.push(1);
        head.push(2);
        head.extend_from_slice(&312u16.to_le_bytes());
        head.extend_from_slice(&48_000u32.to_le_bytes());
        head.extend_from_slice(&0i16.to_le_bytes());
        head.push(0);

        let vendor = b"audiokeep";
        let mut tags = b"OpusTags".to_vec();
        tags.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
        tags.extend_from_slice(vendor);
        tags.extend_from_slice(&0u32.to_le_bytes());

        let audio = [0xfc, 0xff, 0xfe];

        let mut file = ogg_page(0x02, 0, 0, &head);
        file.extend(ogg_page(0x00, 0, 1, &tags));
        file.extend(ogg_page(0x04, 48_000 + 312, 2, &audio));
        file
    }

    #[test]
    fn test_writes_vorbis_lyrics_comment() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Song [abc].opus");
        fs::write(&path, minimal_opus()).unwrap();

        LoftyTagger::new()
            .write_lyrics(&path, ContainerFamily::Ogg, "la la\noh")
            .unwrap();

        let tagged = Probe::open(&path).unwrap().read().unwrap();
        let tag = tagged.tag(TagType::VorbisComments).unwrap();
        assert_eq!(tag.get_string(&ItemKey::Lyrics), Some("la la\noh"));

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.windows(12).any(|w| w == b"LYRICS=la la"));
        assert!(bytes.starts_with(b"OggS"));
    }

    #[test]
    fn test_rewrite_replaces_existing_lyrics() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.opus");
        fs::write(&path, minimal_opus()).unwrap();

        let tagger = LoftyTagger::new();
        tagger.write_lyrics(&path, ContainerFamily::Ogg, "first").unwrap();
        tagger.write_lyrics(&path, ContainerFamily::Ogg, "second").unwrap();

        let tagged = Probe::open(&path).unwrap().read().unwrap();
        let tag = tagged.tag(TagType::VorbisComments).unwrap();
        assert_eq!(tag.get_string(&ItemKey::Lyrics), Some("second"));
    }

    #[test]
    fn test_tag_types() {
        assert_eq!(LoftyTagger::tag_type(ContainerFamily::Mp4), Some(TagType::Mp4Ilst));
        assert_eq!(
            LoftyTagger::tag_type(ContainerFamily::Ogg),
            Some(TagType::VorbisComments)
        );
        assert_eq!(LoftyTagger::tag_type(ContainerFamily::Matroska), None);
    }

    #[test]
    fn test_matroska_unsupported() {
        let err = LoftyTagger::new()
            .write_lyrics(Path::new("/m/a.mkv"), ContainerFamily::Matroska, "la")
            .unwrap_err();
        assert!(matches!(err, TaggerError::Unsupported { .. }));
    }

    #[test]
    fn test_garbage_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.m4a");
        fs::write(&path, b"definitely not an mp4 file").unwrap();

        let err = LoftyTagger::new()
            .write_lyrics(&path, ContainerFamily::Mp4, "la la")
            .unwrap_err();
        assert!(matches!(err, TaggerError::Read { .. }));
        assert_eq!(fs::read(&path).unwrap(), b"definitely not an mp4 file");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = LoftyTagger::new()
            .write_lyrics(Path::new("/nonexistent/a.opus"), ContainerFamily::Ogg, "la")
            .unwrap_err();
        assert!(matches!(err, TaggerError::Read { .. }));
    }
}
