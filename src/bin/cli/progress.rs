//! Progress display for CLI operations.
//!
//! Archive operations run to completion in one call, so progress is shown
//! as a spinner with the current step rather than a bar.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while an operation runs
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Starts a spinner with `message`; hidden when `quiet` is set
    pub fn start(message: &str, quiet: bool) -> Self {
        if quiet {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Clears the spinner
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
