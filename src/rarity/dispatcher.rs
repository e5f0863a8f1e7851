//! Producer side of the pipeline.
//!
//! The dispatcher turns input lines into [`Job`]s: it parses each line as a
//! URL, picks the path segment at the configured position, scores it and
//! enqueues it when it is low-entropy enough. Lines that fail any step are
//! dropped silently; they only show up in [`DispatchStats`].

use crate::rarity::aggregate::Job;
use crate::rarity::config::ScanConfig;
use crate::rarity::entropy::EntropyScorer;
use crate::rarity::path::ParsedLine;
use crate::utils::format::format_number;
use crate::utils::processor::{process_lines, LineProcessor};
use crate::utils::progress::ProgressBar;
use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use std::io::BufRead;
use std::sync::Arc;
use tracing::debug;

/// Why a line produced no job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The line is not URL syntax
    Malformed,
    /// The path has no segment at the requested position
    OutOfRange,
    /// The segment scored above the entropy threshold
    AboveThreshold,
}

/// Returns the decoded path segment at `position` of the URL on `line`.
///
/// The path is split on `/`, so index 0 is the empty string before the
/// leading slash and index 1 is the first real component. A bare host
/// such as `http://a.com` has no segment past index 0.
pub fn extract_segment(line: &str, position: usize) -> Result<String, Skip> {
    let parsed = ParsedLine::parse(line).ok_or(Skip::Malformed)?;
    parsed
        .segment(position)
        .map(str::to_string)
        .ok_or(Skip::OutOfRange)
}

/// Counts of what happened to each input line
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchStats {
    pub total_lines: usize,
    pub dispatched: usize,
    pub malformed: usize,
    pub out_of_range: usize,
    pub above_threshold: usize,
    pub inputs: usize,
}

impl DispatchStats {
    fn record_skip(&mut self, skip: Skip) {
        match skip {
            Skip::Malformed => self.malformed += 1,
            Skip::OutOfRange => self.out_of_range += 1,
            Skip::AboveThreshold => self.above_threshold += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.malformed + self.out_of_range + self.above_threshold
    }

    /// Print a summary of dispatch statistics to stderr
    pub fn report(&self) {
        eprintln!("\nProcessing Summary:");
        eprintln!("  Inputs read: {}", self.inputs);
        eprintln!("  Total lines: {}", format_number(self.total_lines));
        eprintln!("  Queued words: {}", format_number(self.dispatched));
        if self.skipped() > 0 && self.total_lines > 0 {
            let skip_percentage = (self.skipped() as f64 / self.total_lines as f64) * 100.0;
            eprintln!(
                "  Skipped lines: {} ({:.2}%)",
                format_number(self.skipped()),
                skip_percentage
            );
            eprintln!("    Not a URL: {}", format_number(self.malformed));
            eprintln!("    No segment at position: {}", format_number(self.out_of_range));
            eprintln!("    Above entropy level: {}", format_number(self.above_threshold));
        }
    }
}

pub struct Dispatcher {
    position: usize,
    max_entropy: f64,
    scorer: Arc<EntropyScorer>,
}

impl Dispatcher {
    pub fn new(config: &ScanConfig, scorer: Arc<EntropyScorer>) -> Self {
        Self {
            position: config.position,
            max_entropy: config.max_entropy,
            scorer,
        }
    }

    /// Turns one line into a job, or says why it was dropped.
    pub fn classify(&self, line: &str) -> Result<Job, Skip> {
        let word = extract_segment(line, self.position)?;
        if self.scorer.score(&word) > self.max_entropy {
            return Err(Skip::AboveThreshold);
        }
        Ok(Job::new(word, line))
    }

    /// Classifies `line` and enqueues the resulting job, blocking while the
    /// queue is full.
    pub fn dispatch_line(
        &self,
        line: &str,
        jobs: &Sender<Job>,
        stats: &mut DispatchStats,
    ) -> Result<()> {
        stats.total_lines += 1;
        match self.classify(line) {
            Ok(job) => {
                jobs.send(job)
                    .map_err(|_| anyhow!("Job queue closed before input was exhausted"))?;
                stats.dispatched += 1;
            }
            Err(skip) => stats.record_skip(skip),
        }
        Ok(())
    }

    /// Dispatches every line of every input, then closes the queue.
    pub fn run(
        &self,
        processor: LineProcessor<'_>,
        jobs: Sender<Job>,
    ) -> Result<DispatchStats> {
        let mut stats = DispatchStats::default();
        let processed = processor.process(|line| self.dispatch_line(line, &jobs, &mut stats))?;
        stats.inputs = processed.inputs_processed;

        drop(jobs);
        debug!(dispatched = stats.dispatched, "job queue closed");
        Ok(stats)
    }

    /// Dispatches every line of an in-memory or already opened reader, then
    /// closes the queue.
    pub fn run_reader<R: BufRead>(&self, reader: R, jobs: Sender<Job>) -> Result<DispatchStats> {
        let mut stats = DispatchStats::default();
        process_lines(reader, "input", &ProgressBar::hidden(), &mut |line: &str| {
            self.dispatch_line(line, &jobs, &mut stats)
        })?;
        stats.inputs = 1;

        drop(jobs);
        debug!(dispatched = stats.dispatched, "job queue closed");
        Ok(stats)
    }
}
