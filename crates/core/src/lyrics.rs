//! Subtitle-to-lyrics extraction.
//!
//! Turns a WebVTT or SubRip track into plain text: cue timings, indices,
//! header lines and inline markup are dropped, and consecutive duplicate
//! lines (auto-generated captions repeat every line while it scrolls) are
//! collapsed into one.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// `00:01:02.345 --> ...` or `01:02,345 --> ...`
static CUE_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}:)?\d{2}:\d{2}[.,]\d{3}\s*-->").expect("valid cue timing regex")
});

/// Inline markup such as `<c>`, `<00:00:01.000>` or `<i>`.
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

const HEADER_PREFIXES: &[&str] = &["WEBVTT", "Kind:", "Language:"];

/// WebVTT blocks that carry no cue text. They run until the next blank line.
const NON_CUE_BLOCKS: &[&str] = &["NOTE", "STYLE", "REGION"];

/// Reads a subtitle file and extracts its lyrics.
///
/// Invalid UTF-8 is replaced rather than rejected. Returns `None` when the
/// file cannot be read or no text survives.
pub fn extract_lyrics(path: &Path) -> Option<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read subtitle file");
            return None;
        }
    };

    let text = String::from_utf8_lossy(&bytes);
    let lyrics = extract_lyrics_from_str(&text);
    if lyrics.is_none() {
        debug!(path = %path.display(), "Subtitle file has no lyric text");
    }
    lyrics
}

/// Extracts lyrics from subtitle text.
pub fn extract_lyrics_from_str(text: &str) -> Option<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines: Vec<String> = Vec::new();
    let mut block_start = true;
    let mut skipping_block = false;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            block_start = true;
            skipping_block = false;
            continue;
        }
        if block_start && is_non_cue_block(line) {
            skipping_block = true;
        }
        block_start = false;
        if skipping_block || is_header(line) || is_cue_index(line) || CUE_TIMING.is_match(line) {
            continue;
        }

        let cleaned = MARKUP_TAG.replace_all(line, "");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            continue;
        }

        if lines.last().map(String::as_str) != Some(cleaned) {
            lines.push(cleaned.to_string());
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn is_header(line: &str) -> bool {
    HEADER_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

fn is_non_cue_block(line: &str) -> bool {
    NON_CUE_BLOCKS.iter().any(|keyword| {
        line.strip_prefix(keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

fn is_cue_index(line: &str) -> bool {
    line.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const AUTO_CAPTIONS: &str = "WEBVTT\nKind: captions\nLanguage: en\n\n\
00:00:00.000 --> 00:00:02.000 align:start position:0%\n\
hello<00:00:00.500><c> world</c>\n\n\
00:00:02.000 --> 00:00:04.000 align:start position:0%\n\
hello world\n\n\
00:00:04.000 --> 00:00:06.000\n\
second line\n";

    #[test]
    fn test_vtt_auto_captions_dedup() {
        let lyrics = extract_lyrics_from_str(AUTO_CAPTIONS).unwrap();
        assert_eq!(lyrics, "hello world\nsecond line");
        assert_eq!(lyrics.matches("hello world").count(), 1);
    }

    #[test]
    fn test_srt_cues() {
        let srt = "1\n00:00:01,000 --> 00:00:02,500\n<i>First</i> line\n\n\
2\n00:00:03,000 --> 00:00:04,000\nSecond line\n";
        assert_eq!(
            extract_lyrics_from_str(srt).unwrap(),
            "First line\nSecond line"
        );
    }

    #[test]
    fn test_short_vtt_timing_and_note() {
        let vtt = "WEBVTT\n\nNOTE generated\n\n01:02.000 --> 01:04.000\nla la\n";
        assert_eq!(extract_lyrics_from_str(vtt).unwrap(), "la la");
    }

    #[test]
    fn test_multiline_note_and_style_blocks_dropped() {
        let vtt = "WEBVTT\n\nSTYLE\n::cue { color: yellow }\n\n\
NOTE this is\na two line comment\n\n\
REGION\nid:fred width:40%\n\n\
00:00:00.000 --> 00:00:01.000\nsung line\n";
        assert_eq!(extract_lyrics_from_str(vtt).unwrap(), "sung line");
    }

    #[test]
    fn test_note_word_inside_cue_is_lyric() {
        let vtt = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nNOTE by note\nNOTEworthy\n";
        assert_eq!(
            extract_lyrics_from_str(vtt).unwrap(),
            "NOTE by note\nNOTEworthy"
        );
    }

    #[test]
    fn test_non_consecutive_repeats_kept() {
        let srt = "1\n00:00:01,000 --> 00:00:02,000\nchorus\n\n\
2\n00:00:02,000 --> 00:00:03,000\nverse\n\n\
3\n00:00:03,000 --> 00:00:04,000\nchorus\n";
        assert_eq!(
            extract_lyrics_from_str(srt).unwrap(),
            "chorus\nverse\nchorus"
        );
    }

    #[test]
    fn test_nothing_survives() {
        let vtt = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\n<c></c>\n\n12\n";
        assert_eq!(extract_lyrics_from_str(vtt), None);
        assert_eq!(extract_lyrics_from_str(""), None);
    }

    #[test]
    fn test_bom_and_crlf() {
        let srt = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nline\r\n";
        assert_eq!(extract_lyrics_from_str(srt).unwrap(), "line");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            extract_lyrics_from_str(AUTO_CAPTIONS),
            extract_lyrics_from_str(AUTO_CAPTIONS)
        );
    }

    #[test]
    fn test_invalid_utf8_file_is_tolerated() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nca\xfft\n")
            .unwrap();
        let lyrics = extract_lyrics(file.path()).unwrap();
        assert_eq!(lyrics, "ca\u{fffd}t");
    }

    #[test]
    fn test_missing_file() {
        assert_eq!(extract_lyrics(Path::new("/nonexistent/sub.vtt")), None);
    }
}
