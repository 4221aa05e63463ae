// Test doubles for the capability traits

use convertor::commands::Context;
use convertor::core::engine::{EngineOptions, MediaEngine, MediaEntry, MediaInfo, ProgressEvent, ProgressSink};
use convertor::core::{AppPaths, Config, ImageCrateCodec, ProcessOutput, ProcessRunner};
use convertor::error::{ConvertorError, Result};
use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Engine that resolves every query to `entries` and "downloads" instantly
#[derive(Default)]
pub struct FakeEngine {
    pub entries: Vec<MediaEntry>,
    pub events: Vec<ProgressEvent>,
    pub download_failure: Option<String>,
    pub log: CallLog,
}

impl FakeEngine {
    pub fn resolving_to(title: &str, url: &str) -> Self {
        Self {
            entries: vec![MediaEntry::new(title, url)],
            events: vec![
                ProgressEvent::downloading(512, Some(1024)),
                ProgressEvent::downloading(1024, Some(1024)),
            ],
            ..Self::default()
        }
    }
}

impl MediaEngine for FakeEngine {
    fn extract_info(&self, query: &str, _options: &EngineOptions) -> Result<MediaInfo> {
        self.log.borrow_mut().push(format!("extract:{}", query));
        Ok(MediaInfo::Collection(self.entries.clone()))
    }

    fn download(&self, url: &str, options: &EngineOptions, sink: &mut dyn ProgressSink) -> Result<()> {
        self.log.borrow_mut().push(format!("download:{}", url));
        if options.audio_extraction.is_some() {
            self.log.borrow_mut().push("audio".to_string());
        }

        for event in &self.events {
            sink.on_event(event);
        }

        match &self.download_failure {
            Some(message) => Err(ConvertorError::download(message.clone())),
            None => Ok(()),
        }
    }
}

/// Transcoder stand-in: records arguments, exits with `code`, and writes the
/// output file on success
pub struct FakeRunner {
    pub code: i32,
    pub stderr: Vec<u8>,
    pub calls: Rc<RefCell<Vec<Vec<OsString>>>>,
}

impl FakeRunner {
    pub fn succeeding() -> Self {
        Self::exiting(0, b"")
    }

    pub fn exiting(code: i32, stderr: &[u8]) -> Self {
        Self {
            code,
            stderr: stderr.to_vec(),
            calls: Rc::default(),
        }
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, _program: &Path, args: &[OsString]) -> io::Result<ProcessOutput> {
        self.calls.borrow_mut().push(args.to_vec());

        if self.code == 0 {
            if let Some(output) = args.last() {
                fs::write(output, b"converted")?;
            }
        }

        Ok(ProcessOutput {
            code: Some(self.code),
            success: self.code == 0,
            stderr: self.stderr.clone(),
        })
    }
}

/// Layout rooted at `dir`; the transcoder lives in a sub-folder so it never
/// shows up in listings, and exists only when `with_transcoder` is set
pub fn paths(dir: &Path, with_transcoder: bool) -> AppPaths {
    let transcoder = dir.join("tools").join("ffmpeg");
    if with_transcoder {
        fs::create_dir_all(dir.join("tools")).unwrap();
        fs::write(&transcoder, b"").unwrap();
    }

    let config = Config {
        ffmpeg_path: Some(transcoder),
        yt_dlp_path: Some(PathBuf::from("yt-dlp")),
        ..Config::default()
    };

    AppPaths::at(dir.to_path_buf(), &config, Some("convertor".to_string()))
}

pub fn context(paths: AppPaths, engine: FakeEngine, runner: FakeRunner) -> Context {
    Context {
        paths,
        engine: Box::new(engine),
        runner: Box::new(runner),
        codec: Box::new(ImageCrateCodec),
    }
}
