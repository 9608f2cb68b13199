//! Terminal rendering of core progress messages.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use stackforge_adapters::NoopProgress;
use stackforge_core::application::ports::ProgressSink;

use crate::output::OutputManager;

/// Spinner on stderr that shows the latest status message.
#[derive(Debug, Clone)]
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Clear the spinner without a final message.
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for SpinnerProgress {
    fn status(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Spinner when the terminal can show one, a silent sink otherwise.
pub fn sink_for(output: &OutputManager) -> Box<dyn ProgressSink> {
    if output.shows_progress() {
        Box::new(SpinnerProgress::new())
    } else {
        Box::new(NoopProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_keeps_latest_message() {
        let spinner = SpinnerProgress::new();
        spinner.status("Generating backend");
        spinner.status("Writing documentation");
        assert_eq!(spinner.bar.message(), "Writing documentation");
        spinner.finish("done");
        assert!(spinner.bar.is_finished());
    }
}
