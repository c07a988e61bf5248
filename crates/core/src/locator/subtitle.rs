//! Subtitle discovery.

use std::path::PathBuf;

use super::sibling_files;
use crate::descriptor::DownloadDescriptor;

/// Subtitle formats that can be turned into lyrics, in preference order.
pub const SUBTITLE_EXTENSIONS: &[&str] = &["vtt", "srt"];

/// Picks a subtitle track for lyrics extraction.
///
/// A declared vtt/srt entry that exists on disk is preferred. Otherwise the
/// first `<stem>.<anything>.vtt` sibling is taken, then `.srt`.
pub fn find_subtitle(descriptor: &DownloadDescriptor) -> Option<PathBuf> {
    if let Some(declared) = descriptor
        .subtitles
        .values()
        .find(|sub| sub.is_supported() && sub.exists())
    {
        return Some(declared.path.clone());
    }

    let siblings = sibling_files(&descriptor.stem_path());
    SUBTITLE_EXTENSIONS.iter().find_map(|ext| {
        siblings
            .iter()
            .find(|(_, rest)| is_marked_subtitle(rest, ext))
            .map(|(path, _)| path.clone())
    })
}

/// Matches `.<marker>.<ext>` with a non-empty marker.
fn is_marked_subtitle(rest: &str, ext: &str) -> bool {
    let Some(without_ext) = rest.strip_suffix(ext).and_then(|r| r.strip_suffix('.')) else {
        return false;
    };
    without_ext.len() > 1 && without_ext.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::SubtitleRef;
    use std::fs;
    use tempfile::TempDir;

    fn descriptor(dir: &TempDir) -> DownloadDescriptor {
        DownloadDescriptor::new("abc123", dir.path().join("Title [abc123].mkv"))
    }

    #[test]
    fn test_declared_subtitle_preferred() {
        let dir = TempDir::new().unwrap();
        let declared = dir.path().join("declared.en.srt");
        fs::write(&declared, b"1\n").unwrap();
        fs::write(dir.path().join("Title [abc123].en.vtt"), b"WEBVTT\n").unwrap();

        let mut d = descriptor(&dir);
        d.subtitles
            .insert("en".to_string(), SubtitleRef::new(&declared, "srt"));

        assert_eq!(find_subtitle(&d), Some(declared));
    }

    #[test]
    fn test_unsupported_declared_subtitle_skipped() {
        let dir = TempDir::new().unwrap();
        let ass = dir.path().join("Title [abc123].en.ass");
        fs::write(&ass, b"[Script Info]\n").unwrap();

        let mut d = descriptor(&dir);
        d.subtitles.insert("en".to_string(), SubtitleRef::new(&ass, "ass"));

        assert_eq!(find_subtitle(&d), None);
    }

    #[test]
    fn test_vtt_sibling_before_srt() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Title [abc123].en.srt"), b"1\n").unwrap();
        fs::write(dir.path().join("Title [abc123].fr.vtt"), b"WEBVTT\n").unwrap();
        fs::write(dir.path().join("Title [abc123].de.vtt"), b"WEBVTT\n").unwrap();

        assert_eq!(
            find_subtitle(&descriptor(&dir)),
            Some(dir.path().join("Title [abc123].de.vtt"))
        );
    }

    #[test]
    fn test_unmarked_file_is_not_a_subtitle() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Title [abc123].vtt"), b"WEBVTT\n").unwrap();

        assert_eq!(find_subtitle(&descriptor(&dir)), None);
    }

    #[test]
    fn test_marker_detection() {
        assert!(is_marked_subtitle(".en.vtt", "vtt"));
        assert!(is_marked_subtitle(".live_chat.srt", "srt"));
        assert!(!is_marked_subtitle(".vtt", "vtt"));
        assert!(!is_marked_subtitle("..vtt", "vtt"));
        assert!(!is_marked_subtitle(".en.srt", "vtt"));
    }
}
