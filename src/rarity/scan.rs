//! End-to-end scan pipeline.
//!
//! ```text
//! inputs -> Dispatcher -> bounded queue -> WorkerPool -> Aggregate -> rank/select
//! ```
//!
//! The dispatcher closes the queue once every input is exhausted, and the
//! pool is joined before anything is ranked.

use crate::rarity::aggregate::{Aggregate, AggregateSnapshot, Job};
use crate::rarity::config::ScanConfig;
use crate::rarity::dispatcher::{DispatchStats, Dispatcher};
use crate::rarity::entropy::EntropyScorer;
use crate::rarity::pool::{PoolStats, WorkerPool};
use crate::rarity::ranker::{select, RankedWord};
use crate::utils::processor::LineProcessor;
use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Sender};
use std::io::BufRead;
use std::sync::Arc;
use tracing::debug;

/// Everything a scan produced, ready for rendering.
#[derive(Debug)]
pub struct ScanOutcome {
    pub config: ScanConfig,
    pub snapshot: AggregateSnapshot,
    pub ranked: Vec<RankedWord>,
    pub dispatch: DispatchStats,
    pub pool: PoolStats,
}

impl ScanOutcome {
    /// Ranked words in output order.
    pub fn words(&self) -> Vec<&str> {
        self.ranked.iter().map(|r| r.word.as_str()).collect()
    }
}

/// Scans files (or stdin when `inputs` is empty or `-`).
pub fn scan_inputs(
    inputs: &[String],
    config: &ScanConfig,
    show_progress: bool,
) -> Result<ScanOutcome> {
    run_pipeline(config, |dispatcher, jobs| {
        let processor = LineProcessor::new(inputs, "Reading URLs").show_progress(show_progress);
        dispatcher.run(processor, jobs)
    })
}

/// Scans an already opened reader.
pub fn scan_reader<R: BufRead>(reader: R, config: &ScanConfig) -> Result<ScanOutcome> {
    run_pipeline(config, |dispatcher, jobs| dispatcher.run_reader(reader, jobs))
}

fn run_pipeline<F>(config: &ScanConfig, feed: F) -> Result<ScanOutcome>
where
    F: FnOnce(&Dispatcher, Sender<Job>) -> Result<DispatchStats>,
{
    config.validate()?;

    let scorer = Arc::new(EntropyScorer::new());
    let aggregate = Arc::new(Aggregate::new(config.representative));
    let (jobs_tx, jobs_rx) = bounded::<Job>(config.queue_capacity);

    let pool = WorkerPool::spawn(config.workers, jobs_rx, Arc::clone(&aggregate))?;
    let dispatcher = Dispatcher::new(config, Arc::clone(&scorer));

    // The sender moves into the feed, so the queue is closed on every path
    let dispatched = feed(&dispatcher, jobs_tx);
    let pool_stats = pool.join()?;
    let dispatch = dispatched?;

    let snapshot = Arc::try_unwrap(aggregate)
        .map_err(|_| anyhow!("Aggregate still shared after workers were joined"))?
        .into_snapshot();
    debug!(
        words = snapshot.distinct_words(),
        cached = scorer.len(),
        "aggregation finished"
    );

    let ranked = select(&snapshot, config.limit, &scorer);

    Ok(ScanOutcome {
        config: config.clone(),
        snapshot,
        ranked,
        dispatch,
        pool: pool_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_scan_reader_basic() {
        let input = "http://a.com/admin\nhttp://a.com/login\nhttp://a.com/admin\n";
        let outcome = scan_reader(Cursor::new(input), &ScanConfig::default()).unwrap();

        assert_eq!(outcome.words(), vec!["login", "admin"]);
        assert_eq!(outcome.pool.total_jobs(), 3);
        assert_eq!(outcome.dispatch.dispatched, 3);
        assert_eq!(outcome.snapshot.frequency_of("admin"), Some(2));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScanConfig::default().workers(0);
        assert!(scan_reader(Cursor::new(""), &config).is_err());
    }

    #[test]
    fn test_empty_input() {
        let outcome = scan_reader(Cursor::new(""), &ScanConfig::default()).unwrap();
        assert!(outcome.ranked.is_empty());
        assert_eq!(outcome.snapshot.distinct_words(), 0);
        assert_eq!(outcome.dispatch.total_lines, 0);
    }
}
