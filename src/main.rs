use anyhow::{Context as _, Result};
use clap::{Arg, ArgAction, Command};
use colored::*;
use std::path::PathBuf;

use convertor::commands::menu::{report_startup_problems, SHUTDOWN_MESSAGE};
use convertor::commands::{Context, Menu};
use convertor::core::{AppPaths, Config, FFmpegManager, ImageCrateCodec, SystemRunner, YtDlpManager};
use convertor::ui::TerminalPrompter;
use convertor::ConvertorError;

fn main() -> Result<()> {
    let matches = Command::new("convertor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Download media and convert images and audio from an interactive menu")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Show debug logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("home")
                .long("home")
                .value_name("DIR")
                .help("Directory holding the files to convert and the bundled tools")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .get_matches();

    if matches.get_flag("version") {
        println!("convertor version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    convertor::init_logging(matches.get_flag("verbose"));

    ctrlc::set_handler(|| {
        println!("\n{}", format!("Process interrupted. {}", SHUTDOWN_MESSAGE).red().bold());
        std::process::exit(0);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let mut config = Config::load();
    if let Some(home) = matches.get_one::<PathBuf>("home") {
        config.set_install_dir(home.clone());
    }

    let paths = AppPaths::resolve(&config).context("Failed to resolve application paths")?;

    match FFmpegManager::new(paths.transcoder_path.clone(), &SystemRunner).verify_ffmpeg() {
        Ok(version) => log::info!("Transcoder: {}", version),
        Err(e) => log::warn!("Transcoder unavailable: {}", e),
    }

    let ctx = Context {
        engine: Box::new(YtDlpManager::new(paths.engine_path.clone())),
        runner: Box::new(SystemRunner),
        codec: Box::new(ImageCrateCodec),
        paths,
    };

    let mut prompter = TerminalPrompter;
    let result = report_startup_problems(&ctx.paths, &mut prompter)
        .and_then(|_| Menu::new().run(&ctx, &mut prompter));

    match result {
        Ok(()) => Ok(()),
        Err(ConvertorError::Interrupted) => {
            println!("\n{}", format!("Process interrupted. {}", SHUTDOWN_MESSAGE).red().bold());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
