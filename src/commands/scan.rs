//! Rare segment scan command.
//!
//! Reads URLs, keeps the ones whose segment at the chosen position is
//! low-entropy, and prints them rarest first.
//!
//! # Usage
//!
//! ```bash
//! # First path component, default entropy level, every result
//! cat urls.txt | rare-segments
//!
//! # Second component, ten rarest, with entropy annotations
//! rare-segments -p 2 -x 10 -v urls.txt.gz
//!
//! # Stricter entropy level, JSON for further processing
//! rare-segments -e 3.0 --format json crawl-*.txt
//! ```
//!
//! # Output
//!
//! One URL per result with the matched segment highlighted. In verbose mode
//! the number of unique words, the entropy level and a per-result
//! entropy/frequency annotation are printed as well, and a processing
//! summary goes to stderr.

use crate::output::{OutputFormat, Renderer};
use crate::rarity::config::ScanConfig;
use crate::rarity::scan::scan_inputs;
use crate::utils::format::format_number;
use anyhow::Result;
use std::io::{self, BufWriter};

/// Presentation settings that do not affect the scan itself
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub verbose: bool,
    pub color: bool,
    pub progress: bool,
    pub format: OutputFormat,
}

pub fn run(inputs: &[String], config: &ScanConfig, options: RunOptions) -> Result<()> {
    let outcome = scan_inputs(inputs, config, options.progress)?;

    if options.verbose {
        outcome.dispatch.report();
        eprintln!(
            "  Unique words: {}",
            format_number(outcome.snapshot.distinct_words())
        );
        eprintln!(
            "  Workers: {} (busiest handled {} jobs)",
            outcome.pool.workers(),
            format_number(outcome.pool.jobs_per_worker.iter().copied().max().unwrap_or(0))
        );
        eprintln!();
    }

    let renderer = Renderer::new(options.format)
        .verbose(options.verbose)
        .color(options.color);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    renderer.render(&mut out, &outcome)
}
