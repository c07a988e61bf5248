//! Tag mapping from a download descriptor.

use crate::descriptor::DownloadDescriptor;

/// Appended to a description that was cut short.
pub const TRUNCATION_MARKER: &str = "\n[truncated]";

/// Tags written into the destination file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSet {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub date: Option<String>,
    /// The page URL.
    pub comment: Option<String>,
    pub description: Option<String>,
    /// The item id.
    pub episode_id: Option<String>,
    /// Playlist position.
    pub track: Option<String>,
}

impl TagSet {
    /// Maps descriptor fields to tags. The first non-empty candidate wins:
    ///
    /// - title: track, alt title, title
    /// - artist: artist, creator, uploader, channel
    /// - album_artist: artist, channel
    /// - album: album, playlist title, channel
    pub fn from_descriptor(descriptor: &DownloadDescriptor, description_max_chars: usize) -> Self {
        let d = descriptor;
        Self {
            title: first_non_empty(&[&d.track, &d.alt_title, &d.title]),
            artist: first_non_empty(&[&d.artist, &d.creator, &d.uploader, &d.channel]),
            album_artist: first_non_empty(&[&d.artist, &d.channel]),
            album: first_non_empty(&[&d.album, &d.playlist_title, &d.channel]),
            date: first_non_empty(&[&d.upload_date]),
            comment: first_non_empty(&[&d.webpage_url]),
            description: first_non_empty(&[&d.description])
                .map(|text| truncate_description(&text, description_max_chars)),
            episode_id: Some(d.id.clone()).filter(|id| !id.trim().is_empty()),
            track: d.playlist_index.filter(|i| *i > 0).map(|i| i.to_string()),
        }
    }

    /// Tag name/value pairs in a stable order, empty values left out.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", &self.title),
            ("artist", &self.artist),
            ("album_artist", &self.album_artist),
            ("album", &self.album),
            ("date", &self.date),
            ("comment", &self.comment),
            ("description", &self.description),
            ("episode_id", &self.episode_id),
            ("track", &self.track),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    /// Convert to ffmpeg metadata arguments.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for (key, value) in self.entries() {
            args.extend(["-metadata".to_string(), format!("{}={}", key, value)]);
        }
        args
    }
}

fn first_non_empty(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|v| !v.trim().is_empty())
        .map(str::to_string)
}

fn truncate_description(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
