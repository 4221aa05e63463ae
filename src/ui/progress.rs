// Progress bar and spinners shown while media is resolved, downloaded or converted

use crate::core::engine::{MediaEntry, ProgressEvent, ProgressSink, ProgressStatus};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const TICK: Duration = Duration::from_millis(100);

/// [`ProgressSink`] that draws one download in the terminal.
///
/// Create a fresh reporter per download: the bar is created on the first
/// downloading event and never reset.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    spinner: Option<Spinner>,
    hidden: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: None,
            spinner: None,
            hidden: false,
        }
    }

    /// A reporter that tracks state without drawing anything
    pub fn hidden() -> Self {
        Self {
            bar: None,
            spinner: None,
            hidden: true,
        }
    }

    /// Whether the progress bar has been created
    pub fn has_task(&self) -> bool {
        self.bar.is_some()
    }

    pub fn length(&self) -> Option<u64> {
        self.bar.as_ref().and_then(|bar| bar.length())
    }

    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(|bar| bar.position())
    }

    fn target(&self) -> ProgressDrawTarget {
        if self.hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        }
    }

    fn create_bar(&self, total: Option<u64>) -> ProgressBar {
        let bar = ProgressBar::with_draw_target(total, self.target());
        bar.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ProgressReporter {
    fn resolving(&mut self, _query: &str) {
        self.clear_spinner();
        self.spinner = Some(Spinner::with_target("Searching and analysing...", self.target()));
    }

    fn resolved(&mut self, entry: &MediaEntry) {
        self.clear_spinner();
        if !self.hidden {
            println!(
                "{} {}",
                format!("Found: '{}'.", entry.title).green(),
                "Starting download...".white()
            );
        }
    }

    fn on_event(&mut self, event: &ProgressEvent) {
        if event.status != ProgressStatus::Downloading {
            return;
        }

        if self.bar.is_none() {
            self.clear_spinner();
            self.bar = Some(self.create_bar(event.expected_total()));
        }

        if let Some(bar) = &self.bar {
            // Fragmented downloads only learn their size part way through
            if bar.length().is_none() {
                if let Some(total) = event.expected_total() {
                    bar.set_length(total);
                }
            }
            bar.set_position(event.downloaded_bytes);
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.clear_spinner();
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

/// Indeterminate status line, cleared when dropped
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        Self::with_target(message, ProgressDrawTarget::stderr())
    }

    fn with_target(message: &str, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK);
        Self { bar }
    }

    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
