//! Types for the descriptor module.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Metadata and sibling files of a single completed download.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadDescriptor {
    /// Item identifier assigned by the source site.
    pub id: String,
    /// Item title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Track name, when the source knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// Alternative title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_title: Option<String>,
    /// Performing artist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Creator of the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Uploader display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    /// Channel name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Album name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Title of the playlist the item was fetched from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_title: Option<String>,
    /// 1-based position in that playlist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_index: Option<u32>,
    /// Upload date as provided by the source (usually `YYYYMMDD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    /// Canonical page URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webpage_url: Option<String>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Chapters in playback order.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    /// Thumbnail candidates, least preferred first.
    #[serde(default)]
    pub thumbnails: Vec<ThumbnailRef>,
    /// Streams that were requested for the download.
    #[serde(default)]
    pub requested_formats: Vec<RequestedFormat>,
    /// Subtitle files keyed by language.
    #[serde(default)]
    pub subtitles: BTreeMap<String, SubtitleRef>,
    /// The final merged container file.
    pub output_path: PathBuf,
}

impl DownloadDescriptor {
    /// Creates a descriptor with only the identifier and merged output set.
    pub fn new(id: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            output_path: output_path.into(),
            ..Default::default()
        }
    }

    /// Format ids of every requested stream that carries audio but no video.
    pub fn audio_only_format_ids(&self) -> HashSet<&str> {
        self.requested_formats
            .iter()
            .filter(|f| f.is_audio_only() && !f.format_id.is_empty())
            .map(|f| f.format_id.as_str())
            .collect()
    }

    /// The merged output path without its extension.
    ///
    /// Every sidecar of this download starts with this stem.
    pub fn stem_path(&self) -> PathBuf {
        self.output_path.with_extension("")
    }
}

/// A chapter marker, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub title: String,
}

impl Chapter {
    pub fn new(start_time: f64, end_time: f64, title: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            title: title.into(),
        }
    }

    /// Start offset in whole milliseconds.
    pub fn start_ms(&self) -> u64 {
        seconds_to_ms(self.start_time)
    }

    /// End offset in whole milliseconds.
    pub fn end_ms(&self) -> u64 {
        seconds_to_ms(self.end_time)
    }
}

fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0) as u64
    } else {
        0
    }
}

/// A thumbnail candidate. The file may or may not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailRef {
    pub path: PathBuf,
}

impl ThumbnailRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// One stream requested from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestedFormat {
    pub format_id: String,
    /// Audio codec name, `None` or `"none"` when the stream has no audio.
    #[serde(default)]
    pub acodec: Option<String>,
    /// Video codec name, `None` or `"none"` when the stream has no video.
    #[serde(default)]
    pub vcodec: Option<String>,
}

impl RequestedFormat {
    /// An audio-only stream, e.g. format 140 (m4a/aac).
    pub fn audio(format_id: impl Into<String>, acodec: impl Into<String>) -> Self {
        Self {
            format_id: format_id.into(),
            acodec: Some(acodec.into()),
            vcodec: Some("none".to_string()),
        }
    }

    /// A video-only stream.
    pub fn video(format_id: impl Into<String>, vcodec: impl Into<String>) -> Self {
        Self {
            format_id: format_id.into(),
            acodec: Some("none".to_string()),
            vcodec: Some(vcodec.into()),
        }
    }

    /// Whether this stream has an audio codec and no video codec.
    pub fn is_audio_only(&self) -> bool {
        has_codec(self.acodec.as_deref()) && !has_codec(self.vcodec.as_deref())
    }
}

fn has_codec(codec: Option<&str>) -> bool {
    matches!(codec, Some(c) if !c.is_empty() && c != "none")
}

/// A subtitle file for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleRef {
    pub path: PathBuf,
    /// File extension without the dot (`vtt`, `srt`, ...).
    pub ext: String,
}

impl SubtitleRef {
    pub fn new(path: impl Into<PathBuf>, ext: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ext: ext.into(),
        }
    }

    /// Only WebVTT and SubRip tracks can be turned into lyrics.
    pub fn is_supported(&self) -> bool {
        matches!(self.ext.to_ascii_lowercase().as_str(), "vtt" | "srt")
    }

    pub fn exists(&self) -> bool {
        Path::new(&self.path).is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_only_detection() {
        assert!(RequestedFormat::audio("140", "mp4a.40.2").is_audio_only());
        assert!(!RequestedFormat::video("137", "avc1").is_audio_only());

        let muxed = RequestedFormat {
            format_id: "18".to_string(),
            acodec: Some("mp4a.40.2".to_string()),
            vcodec: Some("avc1".to_string()),
        };
        assert!(!muxed.is_audio_only());

        let missing_vcodec = RequestedFormat {
            format_id: "251".to_string(),
            acodec: Some("opus".to_string()),
            vcodec: None,
        };
        assert!(missing_vcodec.is_audio_only());

        let no_codecs = RequestedFormat {
            format_id: "x".to_string(),
            acodec: None,
            vcodec: None,
        };
        assert!(!no_codecs.is_audio_only());
    }

    #[test]
    fn test_audio_only_format_ids() {
        let mut descriptor = DownloadDescriptor::new("abc123", "/media/Song [abc123].mkv");
        descriptor.requested_formats = vec![
            RequestedFormat::video("137", "avc1"),
            RequestedFormat::audio("140", "mp4a.40.2"),
            RequestedFormat::audio("", "opus"),
        ];
        let ids = descriptor.audio_only_format_ids();
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("140"));
    }

    #[test]
    fn test_stem_path() {
        let descriptor = DownloadDescriptor::new("abc123", "/media/Song [abc123].mkv");
        assert_eq!(descriptor.stem_path(), PathBuf::from("/media/Song [abc123]"));
    }

    #[test]
    fn test_chapter_milliseconds() {
        let chapter = Chapter::new(0.0, 10.0, "Intro");
        assert_eq!(chapter.start_ms(), 0);
        assert_eq!(chapter.end_ms(), 10_000);

        let fractional = Chapter::new(61.2345, 62.9999, "Verse");
        assert_eq!(fractional.start_ms(), 61_234);
        assert_eq!(fractional.end_ms(), 62_999);

        let negative = Chapter::new(-1.0, f64::NAN, "Broken");
        assert_eq!(negative.start_ms(), 0);
        assert_eq!(negative.end_ms(), 0);
    }

    #[test]
    fn test_subtitle_support() {
        assert!(SubtitleRef::new("a.en.vtt", "vtt").is_supported());
        assert!(SubtitleRef::new("a.en.srt", "SRT").is_supported());
        assert!(!SubtitleRef::new("a.en.ass", "ass").is_supported());
    }
}
