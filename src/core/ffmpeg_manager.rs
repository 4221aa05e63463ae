// FFmpegManager - runs the FFmpeg transcoder as an external process
use crate::error::{ConvertorError, Result};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// What a finished external process left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
    pub success: bool,
    pub stderr: Vec<u8>,
}

/// Capability to run an external program to completion
pub trait ProcessRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ProcessOutput>;
}

/// Runs programs with `std::process::Command`, capturing stderr
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ProcessOutput {
            code: output.status.code(),
            success: output.status.success(),
            stderr: output.stderr,
        })
    }
}

pub struct FFmpegManager<'a> {
    binary: PathBuf,
    runner: &'a dyn ProcessRunner,
}

impl<'a> FFmpegManager<'a> {
    pub fn new(binary: PathBuf, runner: &'a dyn ProcessRunner) -> Self {
        Self { binary, runner }
    }

    /// `-i <input> -y [options...] <output>`
    pub fn build_args(input: &Path, options: &[String], output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(options.len() + 4);
        args.push("-i".into());
        args.push(input.as_os_str().to_os_string());
        args.push("-y".into()); // overwrite without asking
        args.extend(options.iter().map(OsString::from));
        args.push(output.as_os_str().to_os_string());
        args
    }

    /// Transcode `input` into `output`. A non-zero exit fails with the
    /// process's stderr as the diagnostic.
    pub fn transcode(&self, input: &Path, options: &[String], output: &Path) -> Result<()> {
        let args = Self::build_args(input, options, output);
        log::debug!("Running {:?} {:?}", self.binary, args);

        let result = self.runner.run(&self.binary, &args).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ConvertorError::TranscoderMissing(self.binary.clone())
            } else {
                ConvertorError::transcode(format!("Failed to execute ffmpeg: {}", e))
            }
        })?;

        if result.success {
            Ok(())
        } else {
            Err(ConvertorError::transcode(diagnostic(&result)))
        }
    }

    /// First line of `ffmpeg -version`
    pub fn verify_ffmpeg(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ConvertorError::transcode(format!("Failed to execute ffmpeg: {}", e)))?;

        if output.status.success() {
            let version = String::from_utf8_lossy(&output.stdout);
            Ok(version.lines().next().unwrap_or_default().to_string())
        } else {
            Err(ConvertorError::transcode(format!(
                "ffmpeg -version failed with status: {}",
                output.status
            )))
        }
    }
}

/// Stderr decoded permissively, undecodable bytes dropped. Never empty.
fn diagnostic(output: &ProcessOutput) -> String {
    let text: String = String::from_utf8_lossy(&output.stderr)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect();
    let text = text.trim();

    if !text.is_empty() {
        return text.to_string();
    }

    match output.code {
        Some(code) => format!("ffmpeg exited with code {}", code),
        None => "ffmpeg was terminated by a signal".to_string(),
    }
}
