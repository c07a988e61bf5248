//! Chapter import through an ffmetadata file.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::TranscodeError;
use super::transient::TransientFile;
use crate::descriptor::Chapter;

/// Appended to the destination path to name the chapter file.
pub const CHAPTER_FILE_SUFFIX: &str = ".ffmeta";

/// Escapes the characters ffmetadata treats specially.
pub fn escape_ffmetadata(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '=' => escaped.push_str("\\="),
            ';' => escaped.push_str("\\;"),
            '#' => escaped.push_str("\\#"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders chapters as an ffmetadata document with millisecond timestamps.
pub fn render_ffmetadata(chapters: &[Chapter]) -> String {
    let mut out = String::from(";FFMETADATA1\n");
    for chapter in chapters {
        let _ = write!(
            out,
            "\n[CHAPTER]\nTIMEBASE=1/1000\nSTART={}\nEND={}\ntitle={}\n",
            chapter.start_ms(),
            chapter.end_ms(),
            escape_ffmetadata(&chapter.title)
        );
    }
    out
}

/// Writes `<destination>.ffmeta` for the given chapters.
///
/// Returns `None` when there are no chapters. The returned guard deletes the
/// file when dropped; it is created before writing so a failed write leaves
/// nothing behind either.
pub fn write_chapter_file(
    destination: &Path,
    chapters: &[Chapter],
) -> Result<Option<TransientFile>, TranscodeError> {
    if chapters.is_empty() {
        return Ok(None);
    }

    let mut name = destination.as_os_str().to_os_string();
    name.push(CHAPTER_FILE_SUFFIX);
    let path = PathBuf::from(name);

    let guard = TransientFile::new(&path);
    fs::write(guard.path(), render_ffmetadata(chapters))
        .map_err(|source| TranscodeError::ChapterFile { path, source })?;

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_escape() {
        assert_eq!(escape_ffmetadata("plain title"), "plain title");
        assert_eq!(
            escape_ffmetadata("a=b;c#d\\e\nf"),
            "a\\=b\\;c\\#d\\\\e\\nf"
        );
    }

    #[test]
    fn test_render() {
        let chapters = vec![
            Chapter::new(0.0, 10.0, "Intro"),
            Chapter::new(10.0, 95.5, "Part #2; the = sign"),
        ];
        let rendered = render_ffmetadata(&chapters);
        assert!(rendered.starts_with(";FFMETADATA1\n"));
        assert_eq!(rendered.matches("[CHAPTER]").count(), 2);
        assert!(rendered.contains("START=0\nEND=10000\ntitle=Intro\n"));
        assert!(rendered.contains("START=10000\nEND=95500\ntitle=Part \\#2\\; the \\= sign\n"));
        assert!(rendered.contains("TIMEBASE=1/1000"));
    }

    #[test]
    fn test_no_chapters_no_file() {
        let dir = TempDir::new().unwrap();
        let result = write_chapter_file(&dir.path().join("a.m4a"), &[]).unwrap();
        assert!(result.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_chapter_file_lifecycle() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("Song [id].m4a");
        let guard = write_chapter_file(&destination, &[Chapter::new(0.0, 1.0, "A")])
            .unwrap()
            .unwrap();

        assert_eq!(guard.path(), dir.path().join("Song [id].m4a.ffmeta"));
        let content = fs::read_to_string(guard.path()).unwrap();
        assert!(content.contains("title=A"));

        let path = guard.path().to_path_buf();
        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_location() {
        let err = write_chapter_file(
            Path::new("/nonexistent/dir/song.m4a"),
            &[Chapter::new(0.0, 1.0, "A")],
        )
        .unwrap_err();
        assert!(matches!(err, TranscodeError::ChapterFile { .. }));
    }
}
