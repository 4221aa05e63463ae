// YtDlpManager - drives the yt-dlp executable as the media engine
use crate::core::engine::{
    EngineOptions, MediaEngine, MediaEntry, MediaInfo, ProgressEvent, ProgressSink, ProgressStatus,
};
use crate::error::{ConvertorError, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

/// Marker prefixing our machine-readable progress lines
const PROGRESS_MARKER: &str = "convertor-progress";

/// `--progress-template` value; yt-dlp prints `NA` for unknown fields
const PROGRESS_TEMPLATE: &str = "download:convertor-progress|%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s|%(progress.total_bytes_estimate)s";

const UNKNOWN_TITLE: &str = "Unknown media";

pub struct YtDlpManager {
    binary: PathBuf,
}

impl YtDlpManager {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Arguments shared by metadata resolution and download
    pub fn build_args(options: &EngineOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            options.format.into(),
            "-o".into(),
            options.output_template.clone().into_os_string(),
            "--default-search".into(),
            options.default_search.into(),
        ];

        if options.no_playlist {
            args.push("--no-playlist".into());
        }

        // The CLI renders its own UI
        if options.quiet {
            args.push("--quiet".into());
            args.push("--no-warnings".into());
        }

        if let Some(container) = options.merge_output_format {
            args.push("--merge-output-format".into());
            args.push(container.into());
        }

        if let Some(extraction) = &options.audio_extraction {
            args.push("-x".into());
            args.push("--audio-format".into());
            args.push(extraction.codec.into());
            args.push("--audio-quality".into());
            args.push(format!("{}K", extraction.bitrate_kbps).into());
        }

        if let Some(location) = &options.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(location.clone().into_os_string());
        }

        args
    }

    fn command(&self, options: &EngineOptions) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.env("PYTHONIOENCODING", "UTF-8")
            .env("PYTHONUTF8", "1")
            .args(Self::build_args(options))
            .stdin(Stdio::null());
        cmd
    }

    fn spawn_error(&self, e: io::Error) -> ConvertorError {
        if e.kind() == io::ErrorKind::NotFound {
            ConvertorError::download(format!(
                "yt-dlp was not found ({}). Install it or place it next to the program.",
                self.binary.display()
            ))
        } else {
            ConvertorError::download(format!("Failed to start yt-dlp: {}", e))
        }
    }
}

impl MediaEngine for YtDlpManager {
    fn extract_info(&self, query: &str, options: &EngineOptions) -> Result<MediaInfo> {
        let mut cmd = self.command(options);
        cmd.arg("--dump-single-json").arg("--").arg(query);

        log::debug!("Running {:?}", cmd);

        let output = cmd.output().map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(ConvertorError::download(failure_message(
                &output.stderr,
                output.status,
            )));
        }

        parse_info(&output.stdout)
    }

    fn download(&self, url: &str, options: &EngineOptions, sink: &mut dyn ProgressSink) -> Result<()> {
        let mut cmd = self.command(options);
        cmd.arg("--newline")
            .arg("--progress")
            .arg("--progress-template")
            .arg(PROGRESS_TEMPLATE)
            .arg("--")
            .arg(url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::debug!("Running {:?}", cmd);

        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ConvertorError::download("Failed to capture yt-dlp output"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ConvertorError::download("Failed to capture yt-dlp errors"))?;

        // Drain stderr on the side so a chatty engine cannot block on a full pipe
        let stderr_handle = thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stderr.read_to_end(&mut buffer);
            buffer
        });

        if let Err(e) = forward_progress(stdout, sink) {
            log::warn!("Lost yt-dlp output, stopping it: {}", e);
            abandon(child, stderr_handle);
            return Err(ConvertorError::download(format!("Failed to read yt-dlp output: {}", e)));
        }

        let status = child.wait()?;
        let stderr = stderr_handle.join().unwrap_or_default();

        if status.success() {
            Ok(())
        } else {
            Err(ConvertorError::download(failure_message(&stderr, status)))
        }
    }
}

/// Feed every progress line of `output` to `sink` until end of stream
fn forward_progress<R: Read>(output: R, sink: &mut dyn ProgressSink) -> io::Result<()> {
    for line in BufReader::new(output).split(b'\n') {
        let line = line?;
        let text = String::from_utf8_lossy(&line);

        match parse_progress_line(&text) {
            Some(event) => sink.on_event(&event),
            None => log::debug!("yt-dlp: {}", text.trim_end()),
        }
    }
    Ok(())
}

/// Kill and reap a download we can no longer follow
fn abandon(mut child: Child, stderr_handle: JoinHandle<Vec<u8>>) {
    if let Err(e) = child.kill() {
        log::debug!("yt-dlp already exited: {}", e);
    }
    if let Err(e) = child.wait() {
        log::warn!("Failed to reap yt-dlp: {}", e);
    }
    // Closes once the child is gone
    let _ = stderr_handle.join();
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    webpage_url: Option<String>,
    #[serde(default)]
    original_url: Option<String>,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default, rename = "_filename")]
    legacy_filename: Option<String>,
    #[serde(default)]
    entries: Option<Vec<Option<RawInfo>>>,
}

impl RawInfo {
    fn into_entry(self) -> MediaEntry {
        MediaEntry {
            title: self.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            webpage_url: self.webpage_url.or(self.original_url),
            ext: self.ext,
            filename: self.filename.or(self.legacy_filename).map(PathBuf::from),
        }
    }
}

/// Parse the `--dump-single-json` document
fn parse_info(json: &[u8]) -> Result<MediaInfo> {
    let mut raw: RawInfo = serde_json::from_slice(json)
        .map_err(|e| ConvertorError::download(format!("Unexpected yt-dlp metadata: {}", e)))?;

    match raw.entries.take() {
        Some(entries) => Ok(MediaInfo::Collection(
            entries.into_iter().flatten().map(RawInfo::into_entry).collect(),
        )),
        None => Ok(MediaInfo::Entry(raw.into_entry())),
    }
}

/// Parse one line printed through [`PROGRESS_TEMPLATE`]
fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let mut fields = line.trim().split('|');

    if fields.next()? != PROGRESS_MARKER {
        return None;
    }

    let status = match fields.next()? {
        "downloading" => ProgressStatus::Downloading,
        _ => ProgressStatus::Other,
    };

    let downloaded_bytes = parse_bytes(fields.next()?).unwrap_or(0);
    let total_bytes = fields.next().and_then(parse_bytes);
    let total_bytes_estimate = fields.next().and_then(parse_bytes);

    Some(ProgressEvent {
        status,
        downloaded_bytes,
        total_bytes,
        total_bytes_estimate,
    })
}

/// Byte counts arrive as integers, estimates as floats, unknowns as `NA`
fn parse_bytes(field: &str) -> Option<u64> {
    let field = field.trim();
    field
        .parse::<u64>()
        .ok()
        .or_else(|| field.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
}

fn failure_message(stderr: &[u8], status: ExitStatus) -> String {
    let text = String::from_utf8_lossy(stderr).trim().to_string();
    if text.is_empty() {
        format!("yt-dlp exited with {}", status)
    } else {
        text
    }
}
