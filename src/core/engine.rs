//! Capability interface of the external media-extraction engine
//!
//! The download orchestrator only talks to a [`MediaEngine`]: it asks it to
//! resolve a query into media metadata and then to download one entry while
//! feeding [`ProgressEvent`]s into a [`ProgressSink`]. The production engine
//! drives `yt-dlp` (see `core::yt_dlp_manager`); tests plug in fakes.

use crate::error::{ConvertorError, Result};
use std::path::{Path, PathBuf};

/// What a progress event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Downloading,
    Other,
}

/// One progress notification emitted while bytes arrive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    pub downloaded_bytes: u64,
    pub total_bytes: Option<u64>,
    pub total_bytes_estimate: Option<u64>,
}

impl ProgressEvent {
    pub fn downloading(downloaded_bytes: u64, total_bytes: Option<u64>) -> Self {
        Self {
            status: ProgressStatus::Downloading,
            downloaded_bytes,
            total_bytes,
            total_bytes_estimate: None,
        }
    }

    /// Exact total if known, else the engine's estimate
    pub fn expected_total(&self) -> Option<u64> {
        self.total_bytes.or(self.total_bytes_estimate)
    }
}

/// Receives notifications during a single download
pub trait ProgressSink {
    /// Metadata resolution is starting for `query`
    fn resolving(&mut self, _query: &str) {}

    /// The query resolved to `entry`; the download starts next
    fn resolved(&mut self, _entry: &MediaEntry) {}

    fn on_event(&mut self, event: &ProgressEvent);
}

/// One resolved playable media item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    pub title: String,
    /// Canonical page URL used for the actual download
    pub webpage_url: Option<String>,
    /// Extension of the selected source format
    pub ext: Option<String>,
    /// File name the engine prepared from the output template, if reported
    pub filename: Option<PathBuf>,
}

impl MediaEntry {
    pub fn new<S: Into<String>>(title: S, webpage_url: S) -> Self {
        Self {
            title: title.into(),
            webpage_url: Some(webpage_url.into()),
            ext: None,
            filename: None,
        }
    }
}

/// Result of a metadata-only query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaInfo {
    /// The query named a single item
    Entry(MediaEntry),
    /// A search or playlist resolved to several candidates
    Collection(Vec<MediaEntry>),
}

/// Ambiguous resolutions (search results, playlists) silently use the first
/// candidate. An empty collection is "no results".
pub fn select_first_entry(info: MediaInfo, query: &str) -> Result<MediaEntry> {
    match info {
        MediaInfo::Entry(entry) => Ok(entry),
        MediaInfo::Collection(entries) => entries
            .into_iter()
            .next()
            .ok_or_else(|| ConvertorError::download(format!("No results found for '{}'", query))),
    }
}

/// Audio post-processing requested from the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioExtraction {
    pub codec: &'static str,
    pub bitrate_kbps: u32,
}

/// Engine configuration for one download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Format selector
    pub format: &'static str,
    /// Output template, `<dir>/%(title)s.%(ext)s`
    pub output_template: PathBuf,
    pub merge_output_format: Option<&'static str>,
    pub audio_extraction: Option<AudioExtraction>,
    pub ffmpeg_location: Option<PathBuf>,
    pub no_playlist: bool,
    pub quiet: bool,
    pub default_search: &'static str,
}

impl EngineOptions {
    pub const VIDEO_FORMAT: &'static str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";
    pub const AUDIO_FORMAT: &'static str = "bestaudio/best";
    pub const TITLE_TEMPLATE: &'static str = "%(title)s.%(ext)s";

    /// Best muxed mp4 video, merged into an mp4 container
    pub fn video(downloads_dir: &Path, ffmpeg_location: Option<PathBuf>) -> Self {
        Self {
            format: Self::VIDEO_FORMAT,
            output_template: downloads_dir.join(Self::TITLE_TEMPLATE),
            merge_output_format: Some("mp4"),
            audio_extraction: None,
            ffmpeg_location,
            no_playlist: true,
            quiet: true,
            default_search: "auto",
        }
    }

    /// Best audio stream extracted to 192 kbps MP3 with the given transcoder
    pub fn audio(downloads_dir: &Path, ffmpeg_location: PathBuf) -> Self {
        Self {
            format: Self::AUDIO_FORMAT,
            output_template: downloads_dir.join(Self::TITLE_TEMPLATE),
            merge_output_format: None,
            audio_extraction: Some(AudioExtraction {
                codec: "mp3",
                bitrate_kbps: 192,
            }),
            ffmpeg_location: Some(ffmpeg_location),
            no_playlist: true,
            quiet: true,
            default_search: "auto",
        }
    }

    /// Directory the output template writes into
    pub fn output_dir(&self) -> &Path {
        self.output_template.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// The external media-extraction/download engine
pub trait MediaEngine {
    /// Metadata-only query, nothing is downloaded
    fn extract_info(&self, query: &str, options: &EngineOptions) -> Result<MediaInfo>;

    /// Download `url` according to `options`, reporting progress to `sink`
    fn download(&self, url: &str, options: &EngineOptions, sink: &mut dyn ProgressSink) -> Result<()>;
}
