//! Testing utilities and mock implementations.
//!
//! The mocks stand in for the external transcoder and the tag editor so the
//! whole pipeline can run against a temporary directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use audiokeep_core::testing::{fixtures, MockTagger, MockTranscoder};
//!
//! let mut descriptor = fixtures::download(dir.path(), "Song [abc123]", "abc123")?;
//! fixtures::add_audio_sidecar(&mut descriptor, "140", "m4a")?;
//!
//! let extractor =
//!     AudioExtractor::new(&Config::default(), MockTranscoder::new(), MockTagger::new());
//! let report = extractor.process(&descriptor);
//! ```

mod mock_tagger;
mod mock_transcoder;

pub use mock_tagger::{MockTagger, RecordedLyrics};
pub use mock_transcoder::{MockTranscoder, RecordedInvocation, MOCK_OUTPUT_PREFIX};

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use crate::descriptor::{DownloadDescriptor, RequestedFormat};

    /// A descriptor for `<dir>/<stem>.mkv` with a title and uploader.
    pub fn descriptor(dir: &Path, stem: &str, id: &str) -> DownloadDescriptor {
        let mut d = DownloadDescriptor::new(id, dir.join(format!("{}.mkv", stem)));
        d.title = Some("Song".to_string());
        d.uploader = Some("Channel X".to_string());
        d
    }

    /// Like [`descriptor`], with the merged file written to disk.
    pub fn download(dir: &Path, stem: &str, id: &str) -> io::Result<DownloadDescriptor> {
        let d = descriptor(dir, stem, id);
        write_file(&d.output_path, "merged container")?;
        Ok(d)
    }

    /// Declares an audio-only format and writes its `<stem>.f<id>.<ext>`
    /// sidecar.
    pub fn add_audio_sidecar(
        d: &mut DownloadDescriptor,
        format_id: &str,
        ext: &str,
    ) -> io::Result<PathBuf> {
        let codec = if ext == "m4a" { "mp4a.40.2" } else { "opus" };
        d.requested_formats.push(RequestedFormat::audio(format_id, codec));

        let mut name = d.stem_path().into_os_string();
        name.push(format!(".f{}.{}", format_id, ext));
        let path = PathBuf::from(name);
        write_file(&path, format!("audio stream {}", format_id))?;
        Ok(path)
    }

    /// Writes a file, creating parent directories.
    pub fn write_file(path: &Path, content: impl AsRef<[u8]>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    /// A WebVTT document with one cue per line, one second each.
    pub fn vtt(lines: &[&str]) -> String {
        let mut out = String::from("WEBVTT\nKind: captions\nLanguage: en\n\n");
        for (i, line) in lines.iter().enumerate() {
            out.push_str(&format!(
                "00:00:{:02}.000 --> 00:00:{:02}.000 align:start position:0%\n<c>{}</c>\n\n",
                i,
                i + 1,
                line
            ));
        }
        out
    }

    /// A minimal item manifest with one audio-only and one video-only format.
    pub fn manifest_json(id: &str, title: &str, uploader: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "uploader": uploader,
            "webpage_url": format!("https://www.youtube.com/watch?v={}", id),
            "upload_date": "20240115",
            "requested_formats": [
                {"format_id": "137", "acodec": "none", "vcodec": "avc1.640028"},
                {"format_id": "140", "acodec": "mp4a.40.2", "vcodec": "none"}
            ],
            "_type": "video"
        })
    }

    /// Writes `<dir>/<stem>.info.json`.
    pub fn write_manifest(dir: &Path, stem: &str, manifest: &Value) -> io::Result<PathBuf> {
        let path = dir.join(format!("{}.info.json", stem));
        write_file(&path, manifest.to_string())?;
        Ok(path)
    }
}
