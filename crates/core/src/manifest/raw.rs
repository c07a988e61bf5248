//! Serde model of the on-disk info JSON.
//!
//! Only the fields the pipeline reads are modelled; everything else is
//! ignored. Lists and maps are frequently written as `null`, hence the
//! `Option` wrappers.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawManifest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub alt_title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub playlist_title: Option<String>,
    #[serde(default)]
    pub playlist_index: Option<u32>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub chapters: Option<Vec<RawChapter>>,
    #[serde(default)]
    pub thumbnails: Option<Vec<RawThumbnail>>,
    #[serde(default)]
    pub requested_formats: Option<Vec<RawFormat>>,
    #[serde(default)]
    pub requested_subtitles: Option<BTreeMap<String, RawSubtitle>>,
    #[serde(default, rename = "_type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawChapter {
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawThumbnail {
    #[serde(default)]
    pub filepath: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawFormat {
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawSubtitle {
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub filepath: Option<PathBuf>,
}
