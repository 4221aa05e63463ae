// Main menu loop and command dispatch

use crate::commands::{convert, download, Action, ActionReport, Command, Context};
use crate::core::paths::{AppPaths, DOWNLOADS_DIR_NAME};
use crate::error::{ConvertorError, Result};
use crate::ui::screen::{menu_lines, print_header};
use crate::ui::prompts::terminal_width;
use crate::ui::{show_error, show_failure, show_success, Prompter};
use colored::Colorize;
use std::thread;
use std::time::Duration;

pub const MENU_PROMPT: &str = "Choose a function: ";
pub const RETURN_PROMPT: &str = "Press Enter to return to the menu...";
pub const SHUTDOWN_MESSAGE: &str = "Shutting down.";
pub const CONTINUE_PROMPT: &str = "Press Enter to continue...";

/// Show problems found while resolving paths and wait for the user, so the
/// first menu redraw does not clear them. Returns whether anything was shown.
pub fn report_startup_problems(paths: &AppPaths, prompter: &mut dyn Prompter) -> Result<bool> {
    let Some(reason) = &paths.downloads_error else {
        return Ok(false);
    };

    show_error(
        &format!("Critical error: could not create the '{}' folder.", DOWNLOADS_DIR_NAME),
        reason,
    );
    println!();
    prompter.pause(CONTINUE_PROMPT)?;
    Ok(true)
}

/// What handling one menu choice led to
#[derive(Debug)]
pub enum MenuOutcome {
    Exit,
    Invalid,
    /// The command ran; a failure has already been shown as a panel
    Finished {
        command: Command,
        result: Result<ActionReport>,
    },
}

#[derive(Debug, Clone)]
pub struct Menu {
    invalid_pause: Duration,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        Self {
            invalid_pause: Duration::from_secs(1),
        }
    }

    /// How long "Invalid command." stays up before the menu is redrawn
    pub fn with_invalid_pause(mut self, pause: Duration) -> Self {
        self.invalid_pause = pause;
        self
    }

    /// Redraw and handle choices until the user exits
    pub fn run(&self, ctx: &Context, prompter: &mut dyn Prompter) -> Result<()> {
        loop {
            print_header(None)?;
            for line in menu_lines(terminal_width()) {
                println!("{}", line);
            }

            let choice = prompter.input(MENU_PROMPT)?;
            if let MenuOutcome::Exit = self.dispatch(ctx, prompter, &choice)? {
                return Ok(());
            }
        }
    }

    /// Handle one line typed at the menu prompt.
    ///
    /// Failures of the chosen action are rendered and returned inside
    /// [`MenuOutcome::Finished`]; only an interruption (or a prompt that can
    /// no longer be read) comes back as `Err`.
    pub fn dispatch(&self, ctx: &Context, prompter: &mut dyn Prompter, choice: &str) -> Result<MenuOutcome> {
        let Some(command) = Command::parse(choice) else {
            log::debug!("Unknown menu choice {:?}", choice);
            show_error("Invalid command.", "");
            thread::sleep(self.invalid_pause);
            return Ok(MenuOutcome::Invalid);
        };

        let result = match command.action() {
            Action::Exit => {
                println!("\n{}", SHUTDOWN_MESSAGE.red().bold());
                return Ok(MenuOutcome::Exit);
            }
            Action::Download(platform) => download::execute(ctx, prompter, platform),
            Action::ConvertImage { target } => {
                convert::run_converter(ctx, prompter, &command.label(), |ctx, name| {
                    convert::image(ctx, name, target)
                })
            }
            Action::ConvertAudio { target, options } => {
                convert::run_converter(ctx, prompter, &command.label(), |ctx, name| {
                    convert::audio(ctx, name, target, options)
                })
            }
        };

        match &result {
            Ok(ActionReport::Saved(message)) => show_success(message),
            Ok(ActionReport::Skipped) => {}
            Err(e) if e.is_interrupted() => return Err(ConvertorError::Interrupted),
            Err(e) => {
                log::error!("Command {} failed: {}", command.code(), e);
                show_failure(e);
            }
        }

        println!();
        prompter.pause(RETURN_PROMPT)?;

        Ok(MenuOutcome::Finished { command, result })
    }
}
