//! Download orchestration
//!
//! Turns a [`DownloadRequest`] into one file on disk: check preconditions,
//! build the engine options, resolve the query to a single entry, download it
//! and work out the final file name. The flow is strictly linear and never
//! retries.

use crate::core::engine::{select_first_entry, EngineOptions, MediaEngine, MediaEntry, ProgressSink};
use crate::core::validation::{is_web_url, sanitize_title};
use crate::core::AppPaths;
use crate::error::{ConvertorError, Result};
use std::path::{Path, PathBuf};

/// Platform whose search is used when the input is not a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    YouTube,
    SoundCloud,
    Spotify,
}

impl Platform {
    /// Search prefix understood by the engine
    pub fn search_prefix(&self) -> &'static str {
        match self {
            Platform::YouTube => "ytsearch:",
            Platform::SoundCloud => "scsearch:",
            Platform::Spotify => "spsearch:",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::SoundCloud => "SoundCloud",
            Platform::Spotify => "Spotify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// The forced-choice tokens: "1" video, "2" audio, nothing else
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(MediaKind::Video),
            "2" => Some(MediaKind::Audio),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// What the engine receives: a URL, or the platform prefix plus search text
    pub query: String,
    pub kind: MediaKind,
    pub platform: Platform,
}

impl DownloadRequest {
    /// `None` for blank input
    pub fn new(raw: &str, platform: Platform, kind: MediaKind) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let query = if is_web_url(raw) {
            raw.to_string()
        } else {
            format!("{}{}", platform.search_prefix(), raw)
        };

        Some(Self {
            query,
            kind,
            platform,
        })
    }
}

/// A finished download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub title: String,
    pub path: PathBuf,
}

impl DownloadOutcome {
    pub fn file_name(&self) -> String {
        crate::core::conversion::display_name(&self.path)
    }
}

pub struct Downloader<'a> {
    engine: &'a dyn MediaEngine,
    paths: &'a AppPaths,
}

impl<'a> Downloader<'a> {
    pub fn new(engine: &'a dyn MediaEngine, paths: &'a AppPaths) -> Self {
        Self { engine, paths }
    }

    /// Engine configuration for `kind`
    pub fn options_for(&self, kind: MediaKind) -> EngineOptions {
        match kind {
            MediaKind::Video => {
                // Merging works with a bundled transcoder too, when there is one
                let location = self
                    .paths
                    .transcoder_available()
                    .then(|| self.paths.transcoder_path.clone());
                EngineOptions::video(&self.paths.downloads_dir, location)
            }
            MediaKind::Audio => {
                EngineOptions::audio(&self.paths.downloads_dir, self.paths.transcoder_path.clone())
            }
        }
    }

    /// Run one download. Audio without a transcoder is refused before the
    /// engine is touched; every later failure becomes a download error
    /// carrying the underlying text.
    pub fn download(&self, request: &DownloadRequest, sink: &mut dyn ProgressSink) -> Result<DownloadOutcome> {
        if request.kind == MediaKind::Audio && !self.paths.transcoder_available() {
            return Err(ConvertorError::TranscoderMissing(self.paths.transcoder_path.clone()));
        }

        let options = self.options_for(request.kind);

        self.fetch(request, &options, sink).map_err(|e| match e {
            ConvertorError::Download(_) | ConvertorError::Interrupted => e,
            other => ConvertorError::download(other.to_string()),
        })
    }

    fn fetch(&self, request: &DownloadRequest, options: &EngineOptions, sink: &mut dyn ProgressSink) -> Result<DownloadOutcome> {
        log::info!("Resolving '{}'", request.query);
        sink.resolving(&request.query);

        let info = self.engine.extract_info(&request.query, options)?;
        let entry = select_first_entry(info, &request.query)?;
        sink.resolved(&entry);

        let url = entry
            .webpage_url
            .as_deref()
            .ok_or_else(|| ConvertorError::download(format!("'{}' has no playback URL", entry.title)))?;

        log::info!("Downloading '{}' from {}", entry.title, url);
        self.engine.download(url, options, sink)?;

        Ok(DownloadOutcome {
            title: entry.title.clone(),
            path: final_path(&entry, options, request.kind),
        })
    }
}

/// Where the engine left the file: its prepared name when it reported one,
/// else the title template applied to the entry. Audio is post-processed to
/// MP3 after the source extension was chosen, so the extension is forced.
pub fn final_path(entry: &MediaEntry, options: &EngineOptions, kind: MediaKind) -> PathBuf {
    let prepared = entry.filename.clone().unwrap_or_else(|| {
        let ext = entry.ext.as_deref().or(options.merge_output_format).unwrap_or("mp4");
        render_template(options.output_dir(), &entry.title, ext)
    });

    match kind {
        MediaKind::Audio => prepared.with_extension("mp3"),
        MediaKind::Video => prepared,
    }
}

fn render_template(dir: &Path, title: &str, ext: &str) -> PathBuf {
    dir.join(format!("{}.{}", sanitize_title(title), ext))
}
