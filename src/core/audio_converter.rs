// Audio pathway: re-encode a local file with the transcoder

use crate::core::conversion::ConversionJob;
use crate::core::ffmpeg_manager::{FFmpegManager, ProcessRunner};
use crate::core::AppPaths;
use crate::error::Result;
use std::path::PathBuf;

/// Convert `job.input` next to itself, returning the written file.
///
/// A missing input fails before the transcoder is started.
pub fn convert_audio(paths: &AppPaths, runner: &dyn ProcessRunner, job: &ConversionJob) -> Result<PathBuf> {
    let input = job.resolve_input(paths)?;
    let output = job.output_path(&input);

    log::info!("Converting {:?} -> {:?}", input, output);

    FFmpegManager::new(paths.transcoder_path.clone(), runner).transcode(&input, &job.options, &output)?;

    Ok(output)
}
