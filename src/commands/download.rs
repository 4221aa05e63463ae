use crate::commands::{ActionReport, Context};
use crate::core::conversion::display_name;
use crate::core::{DownloadRequest, Downloader, MediaKind, Platform};
use crate::error::Result;
use crate::ui::{show_error, ProgressReporter, Prompter};

pub const QUERY_PROMPT: &str = "Enter a URL or search query: ";
pub const MODE_PROMPT: &str = "Choose a format ([1] Video, [2] Audio): ";

/// Ask for a query and a mode, then download one file.
///
/// Blank input ends the action without touching the engine. The mode prompt
/// repeats until it gets exactly "1" or "2".
pub fn execute(ctx: &Context, prompter: &mut dyn Prompter, platform: Platform) -> Result<ActionReport> {
    let raw = prompter.input(QUERY_PROMPT)?;
    if raw.trim().is_empty() {
        log::debug!("Empty query, nothing to download");
        return Ok(ActionReport::Skipped);
    }

    let kind = loop {
        match MediaKind::from_choice(&prompter.input(MODE_PROMPT)?) {
            Some(kind) => break kind,
            None => show_error("Invalid command.", ""),
        }
    };

    let Some(request) = DownloadRequest::new(&raw, platform, kind) else {
        return Ok(ActionReport::Skipped);
    };

    let mut reporter = ProgressReporter::new();
    let outcome = Downloader::new(ctx.engine.as_ref(), &ctx.paths).download(&request, &mut reporter)?;
    drop(reporter);

    log::info!("{}: saved '{}' to {:?}", platform.name(), outcome.title, outcome.path);

    Ok(ActionReport::Saved(format!(
        "File saved to the '{}' folder as: {}",
        display_name(&ctx.paths.downloads_dir),
        outcome.file_name()
    )))
}
