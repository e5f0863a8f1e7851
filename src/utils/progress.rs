//! Progress spinner utilities using indicatif
//!
//! Input arrives as a stream of unknown length, so progress is reported as a
//! spinner with a running line count. indicatif draws to stderr and stays
//! hidden when stderr is not a terminal.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress wrapper for displaying line-processing status
pub struct ProgressBar {
    bar: IndicatifBar,
}

impl ProgressBar {
    /// Create a spinner showing the number of lines read
    pub fn new_spinner(label: &str) -> Self {
        let bar = IndicatifBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{msg} {spinner} {pos} lines ({per_sec})")
        {
            bar.set_style(style);
        }
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// A progress bar that never draws
    pub fn hidden() -> Self {
        Self {
            bar: IndicatifBar::hidden(),
        }
    }

    /// Update progress
    pub fn update(&self, current: usize) {
        self.bar.set_position(current as u64);
    }

    /// Finish with custom message
    pub fn finish_with_message(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
