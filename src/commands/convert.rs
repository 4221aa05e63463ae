use crate::commands::{ActionReport, Context};
use crate::core::audio_converter::convert_audio;
use crate::core::conversion::display_name;
use crate::core::image_converter::{convert_image, icon_sizes};
use crate::core::{list_convertible_files, ConversionJob};
use crate::error::Result;
use crate::ui::screen::{file_table_lines, print_header};
use crate::ui::{format_resolutions, show_error, warn, Prompter, Spinner};

pub const FILE_PROMPT: &str = "File name to convert: ";

/// Shared flow of every converter: header, file listing, file name prompt,
/// then `convert` on the chosen name. Nothing to list ends the action.
pub fn run_converter<F>(ctx: &Context, prompter: &mut dyn Prompter, title: &str, convert: F) -> Result<ActionReport>
where
    F: FnOnce(&Context, &str) -> Result<String>,
{
    print_header(Some(title))?;

    let entries = match list_convertible_files(&ctx.paths.install_dir, &ctx.paths.denylist()) {
        Ok(entries) => entries,
        Err(e) => {
            show_error("Could not read the files in the folder.", &e.to_string());
            return Ok(ActionReport::Skipped);
        }
    };

    if entries.is_empty() {
        warn("There are no suitable files for conversion in the current folder.");
        return Ok(ActionReport::Skipped);
    }

    for line in file_table_lines(&entries) {
        println!("{}", line);
    }
    println!();

    let file_name = prompter.input(FILE_PROMPT)?;
    convert(ctx, &file_name).map(ActionReport::Saved)
}

/// Image pathway; icons also report the resolutions they ended up with
pub fn image(ctx: &Context, file_name: &str, target: &str) -> Result<String> {
    let job = ConversionJob::new(file_name, target, &[]);

    let output = {
        let _spinner = Spinner::new("Converting...");
        convert_image(&ctx.paths, ctx.codec.as_ref(), &job)?
    };

    let mut message = format!("File saved as: {}", display_name(&output));

    if target.eq_ignore_ascii_case("ico") {
        match icon_sizes(&output) {
            Ok(sizes) => message.push_str(&format!(" ({})", format_resolutions(&sizes))),
            Err(e) => log::warn!("Could not read back icon sizes: {}", e),
        }
    }

    Ok(message)
}

pub fn audio(ctx: &Context, file_name: &str, target: &str, options: &[&str]) -> Result<String> {
    let job = ConversionJob::new(file_name, target, options);

    let output = {
        let _spinner = Spinner::new("Converting...");
        convert_audio(&ctx.paths, ctx.runner.as_ref(), &job)?
    };

    Ok(format!("File saved as: {}", display_name(&output)))
}
