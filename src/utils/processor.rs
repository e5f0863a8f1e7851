//! Line-oriented input processing.
//!
//! This module provides the common loop over every input (files or stdin),
//! with progress tracking, error context and consistent line handling.
//! Lines are split on `\n`, a trailing `\r` is dropped, and invalid UTF-8 is
//! replaced rather than aborting the run: URL dumps are rarely clean.

use crate::utils::progress::ProgressBar;
use crate::utils::reader::{open_input, STDIN};
use anyhow::{Context, Result};
use std::io::{BufRead, BufReader};

/// Statistics collected while reading inputs
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessStats {
    /// Total number of lines read across all inputs
    pub total_lines: usize,
    /// Number of inputs fully read
    pub inputs_processed: usize,
}

/// Reads every line of `reader`, passing each to `handler`.
///
/// Returns the number of lines read. `source` only names the input in error
/// messages.
pub fn process_lines<R, F>(
    mut reader: R,
    source: &str,
    progress: &ProgressBar,
    handler: &mut F,
) -> Result<usize>
where
    R: BufRead,
    F: FnMut(&str) -> Result<()>,
{
    let mut buf = Vec::with_capacity(256);
    let mut lines = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("Failed to read line {} from {}", lines + 1, source))?;
        if read == 0 {
            break;
        }
        lines += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        let line = String::from_utf8_lossy(&buf);
        handler(&line).with_context(|| format!("Failed at line {} in {}", lines, source))?;

        // Update progress every 10k lines
        if lines % 10_000 == 0 {
            progress.update(lines);
        }
    }

    progress.update(lines);
    Ok(lines)
}

/// Processes a list of inputs in order, line by line
pub struct LineProcessor<'a> {
    inputs: &'a [String],
    progress_label: String,
    show_progress: bool,
}

impl<'a> LineProcessor<'a> {
    /// Create a processor for the given inputs; an empty list reads stdin
    pub fn new(inputs: &'a [String], progress_label: &str) -> Self {
        Self {
            inputs,
            progress_label: progress_label.to_string(),
            show_progress: false,
        }
    }

    /// Show a spinner on stderr while reading
    #[must_use]
    pub const fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Process all inputs with the given line handler
    ///
    /// The handler should return Ok(()) to continue or Err(e) to stop.
    pub fn process<F>(self, mut handler: F) -> Result<ProcessStats>
    where
        F: FnMut(&str) -> Result<()>,
    {
        let stdin_only = [STDIN.to_string()];
        let inputs = if self.inputs.is_empty() {
            &stdin_only[..]
        } else {
            self.inputs
        };

        let mut stats = ProcessStats::default();

        for (idx, input) in inputs.iter().enumerate() {
            let progress = if self.show_progress {
                let label = if inputs.len() > 1 {
                    format!("[{}/{}] {}", idx + 1, inputs.len(), self.progress_label)
                } else {
                    self.progress_label.clone()
                };
                ProgressBar::new_spinner(&label)
            } else {
                ProgressBar::hidden()
            };

            let source = if input == STDIN { "stdin" } else { input.as_str() };
            let reader = open_input(input)?;
            let lines = process_lines(BufReader::new(reader), source, &progress, &mut handler)?;

            progress.finish_with_message(&format!("Read {} lines from {}", lines, source));
            stats.total_lines += lines;
            stats.inputs_processed += 1;
        }

        Ok(stats)
    }
}
