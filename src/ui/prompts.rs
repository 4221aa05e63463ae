// UI prompts and user interaction module

use crate::error::{ConvertorError, Result};
use crate::ui::panel::{render_panel, wrap, LineStyle, PanelLine};
use colored::{Color, Colorize};
use dialoguer::theme::Theme;
use dialoguer::Input;
use std::collections::VecDeque;
use std::fmt;
use std::io;

/// Source of single-line answers typed by the user
pub trait Prompter {
    /// Show `prompt` and read one line (may be empty)
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Wait for the user to acknowledge before continuing
    fn pause(&mut self, prompt: &str) -> Result<()> {
        self.input(prompt).map(|_| ())
    }
}

/// Prints prompts exactly as given; they carry their own punctuation
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTheme;

impl Theme for PlainTheme {
    fn format_input_prompt(&self, f: &mut dyn fmt::Write, prompt: &str, _default: Option<&str>) -> fmt::Result {
        write!(f, "{}", prompt)
    }

    fn format_input_prompt_selection(&self, f: &mut dyn fmt::Write, prompt: &str, sel: &str) -> fmt::Result {
        write!(f, "{}{}", prompt, sel)
    }
}

/// Reads from the terminal through `dialoguer`
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&PlainTheme)
            .with_prompt(prompt.white().bold().to_string())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| match e {
                // Ctrl+C while the terminal is in raw mode
                dialoguer::Error::IO(io_err) if io_err.kind() == io::ErrorKind::Interrupted => {
                    ConvertorError::Interrupted
                }
                dialoguer::Error::IO(io_err) => ConvertorError::Io(io_err),
                #[allow(unreachable_patterns)]
                other => ConvertorError::other(other.to_string()),
            })
    }
}

/// Replays canned answers; running out of answers is an error
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            ConvertorError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no scripted answer for '{}'", prompt),
            ))
        })
    }
}

/// Display a warning message
pub fn warn(message: &str) {
    println!("{}", message.yellow());
}

/// Terminal width in columns, 80 when unknown
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80)
}

/// Lines of the red error panel: bold headline, dimmed details
pub fn error_panel(message: &str, details: &str, max_width: usize) -> Vec<String> {
    let inner = max_width.saturating_sub(4);
    let mut lines: Vec<PanelLine> = wrap(&format!("ERROR: {}", message), inner)
        .iter()
        .map(|l| PanelLine::styled(l, LineStyle::Bold))
        .collect();

    if !details.trim().is_empty() {
        lines.extend(
            wrap(details.trim(), inner)
                .iter()
                .map(|l| PanelLine::styled(l, LineStyle::Dim)),
        );
    }

    render_panel(Some("SYSTEM MESSAGE"), &lines, Color::Red, max_width)
}

/// Lines of the green success panel
pub fn success_panel(message: &str, max_width: usize) -> Vec<String> {
    let lines: Vec<PanelLine> = wrap(&format!("SUCCESS: {}", message), max_width.saturating_sub(4))
        .iter()
        .map(|l| PanelLine::styled(l, LineStyle::Bold))
        .collect();

    render_panel(Some("SYSTEM MESSAGE"), &lines, Color::Green, max_width)
}

pub fn show_error(message: &str, details: &str) {
    for line in error_panel(message, details, terminal_width()) {
        println!("{}", line);
    }
}

pub fn show_success(message: &str) {
    for line in success_panel(message, terminal_width()) {
        println!("{}", line);
    }
}

/// Render a [`ConvertorError`] as an error panel
pub fn show_failure(err: &ConvertorError) {
    show_error(&err.summary(), &err.details());
}
