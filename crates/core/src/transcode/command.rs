//! Builds the transcoder invocation for one destination.

use std::path::{Path, PathBuf};

use super::chapters::write_chapter_file;
use super::cover::{prepare_cover, CoverArt, PreparedCover};
use super::error::TranscodeError;
use super::family::ContainerFamily;
use super::tags::TagSet;
use super::traits::Transcoder;
use super::transient::TransientFile;
use crate::config::{TaggingConfig, TranscoderConfig};
use crate::descriptor::DownloadDescriptor;

/// Everything needed to produce one tagged audio file.
#[derive(Debug, Clone, Copy)]
pub struct EmbedJob<'a> {
    pub descriptor: &'a DownloadDescriptor,
    /// The audio-only sidecar to copy the stream from.
    pub source: &'a Path,
    pub destination: &'a Path,
    pub family: ContainerFamily,
    pub thumbnail: Option<&'a Path>,
    pub lyrics: Option<&'a str>,
}

/// A ready-to-run argument list plus the transient files it refers to.
///
/// Dropping the plan deletes the chapter file and any converted cover.
#[derive(Debug)]
pub struct TranscodePlan {
    args: Vec<String>,
    destination: PathBuf,
    cover: CoverArt,
    chapter_count: usize,
    lyrics_inline: bool,
    chapter_file: Option<TransientFile>,
    converted_cover: Option<TransientFile>,
}

impl TranscodePlan {
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn cover(&self) -> &CoverArt {
        &self.cover
    }

    pub fn chapter_count(&self) -> usize {
        self.chapter_count
    }

    /// Whether lyrics are written by the transcode itself.
    pub fn lyrics_inline(&self) -> bool {
        self.lyrics_inline
    }

    pub fn chapter_file(&self) -> Option<&Path> {
        self.chapter_file.as_ref().map(TransientFile::path)
    }

    pub fn converted_cover(&self) -> Option<&Path> {
        self.converted_cover.as_ref().map(TransientFile::path)
    }

    /// Deletes the transient files now instead of on drop.
    pub fn cleanup(&mut self) {
        self.chapter_file.take();
        self.converted_cover.take();
    }
}

/// Turns an [`EmbedJob`] into a [`TranscodePlan`].
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    transcoder: TranscoderConfig,
    tagging: TaggingConfig,
}

impl CommandBuilder {
    pub fn new(transcoder: TranscoderConfig, tagging: TaggingConfig) -> Self {
        Self { transcoder, tagging }
    }

    /// Builds the invocation.
    ///
    /// This may already run the transcoder once, to convert a cover the
    /// destination container cannot take as-is, and writes the chapter file
    /// next to the destination.
    pub fn build<T: Transcoder + ?Sized>(
        &self,
        job: &EmbedJob<'_>,
        transcoder: &T,
    ) -> Result<TranscodePlan, TranscodeError> {
        let PreparedCover {
            art: cover,
            converted: converted_cover,
        } = prepare_cover(job.thumbnail, job.family, transcoder);

        let chapter_file = if job.family.supports_chapters() {
            write_chapter_file(job.destination, &job.descriptor.chapters)?
        } else {
            None
        };

        let mut args = vec!["-y".to_string()];
        if let Some(level) = &self.transcoder.log_level {
            args.extend(["-loglevel".to_string(), level.clone()]);
        }
        args.extend(["-i".to_string(), path_arg(job.source)]);
        let mut input_count = 1;

        let picture_input = match &cover {
            CoverArt::AttachedPicture(path) => {
                args.extend(["-i".to_string(), path_arg(path)]);
                input_count += 1;
                Some(input_count - 1)
            }
            _ => None,
        };

        let chapter_input = match &chapter_file {
            Some(file) => {
                args.extend([
                    "-f".to_string(),
                    "ffmetadata".to_string(),
                    "-i".to_string(),
                    path_arg(file.path()),
                ]);
                input_count += 1;
                Some(input_count - 1)
            }
            None => None,
        };

        args.extend(["-map".to_string(), "0:a".to_string()]);
        if let Some(idx) = picture_input {
            args.extend(["-map".to_string(), format!("{}:0", idx)]);
        }

        args.extend(["-c:a".to_string(), "copy".to_string()]);
        if picture_input.is_some() {
            args.extend([
                "-c:v".to_string(),
                "copy".to_string(),
                "-disposition:v:0".to_string(),
                "attached_pic".to_string(),
            ]);
        }

        if let CoverArt::Attachment { path, mime } = &cover {
            args.extend([
                "-attach".to_string(),
                path_arg(path),
                "-metadata:s:t".to_string(),
                format!("mimetype={}", mime),
            ]);
        }

        if let Some(idx) = chapter_input {
            args.extend(["-map_chapters".to_string(), idx.to_string()]);
        }

        let tags = TagSet::from_descriptor(job.descriptor, self.tagging.description_max_chars);
        args.extend(tags.to_ffmpeg_args());

        let inline_lyrics = match (job.lyrics, job.family.inline_lyrics_key()) {
            (Some(lyrics), Some(key)) if self.tagging.embed_lyrics => Some((key, lyrics)),
            _ => None,
        };
        if let Some((key, lyrics)) = inline_lyrics {
            args.extend(["-metadata".to_string(), format!("{}={}", key, lyrics)]);
        }

        args.extend(self.transcoder.extra_args.iter().cloned());
        args.push(path_arg(job.destination));

        Ok(TranscodePlan {
            args,
            destination: job.destination.to_path_buf(),
            cover,
            chapter_count: if chapter_file.is_some() {
                job.descriptor.chapters.len()
            } else {
                0
            },
            lyrics_inline: inline_lyrics.is_some(),
            chapter_file,
            converted_cover,
        })
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
