//! Fixed-size worker pool draining the job queue into the shared aggregate.
//!
//! Workers compete for jobs on a single bounded channel. A worker exits once
//! the channel is closed (every sender dropped) and empty; [`WorkerPool::join`]
//! is the barrier that must complete before ranking starts.

use crate::rarity::aggregate::{Aggregate, Job};
use anyhow::{anyhow, Context, Result};
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Jobs handled per worker, in spawn order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PoolStats {
    pub jobs_per_worker: Vec<usize>,
}

impl PoolStats {
    pub fn total_jobs(&self) -> usize {
        self.jobs_per_worker.iter().sum()
    }

    pub fn workers(&self) -> usize {
        self.jobs_per_worker.len()
    }
}

pub struct WorkerPool {
    handles: Vec<JoinHandle<usize>>,
}

impl WorkerPool {
    /// Spawns `workers` threads consuming from `jobs`.
    pub fn spawn(workers: usize, jobs: Receiver<Job>, aggregate: Arc<Aggregate>) -> Result<Self> {
        if workers == 0 {
            return Err(anyhow!("Worker pool needs at least one worker"));
        }

        let mut handles = Vec::with_capacity(workers);
        for worker_idx in 0..workers {
            let rx = jobs.clone();
            let aggregate = Arc::clone(&aggregate);

            let handle = thread::Builder::new()
                .name(format!("rarity-worker-{worker_idx}"))
                .spawn(move || {
                    let mut handled = 0usize;
                    for job in rx.iter() {
                        aggregate.record(job);
                        handled += 1;
                    }
                    handled
                })
                .with_context(|| format!("Failed to spawn worker {}", worker_idx))?;
            handles.push(handle);
        }

        debug!(workers, "worker pool started");
        Ok(Self { handles })
    }

    /// Blocks until every worker has drained the queue and exited.
    pub fn join(self) -> Result<PoolStats> {
        let mut stats = PoolStats::default();
        for (idx, handle) in self.handles.into_iter().enumerate() {
            let handled = handle
                .join()
                .map_err(|_| anyhow!("Worker {} panicked while aggregating", idx))?;
            stats.jobs_per_worker.push(handled);
        }

        debug!(jobs = stats.total_jobs(), "worker pool drained");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rarity::config::RepresentativePolicy;
    use crossbeam_channel::bounded;

    #[test]
    fn test_pool_drains_closed_queue() {
        let aggregate = Arc::new(Aggregate::new(RepresentativePolicy::Last));
        let (tx, rx) = bounded::<Job>(4);

        let pool = WorkerPool::spawn(3, rx, Arc::clone(&aggregate)).unwrap();

        for i in 0..100 {
            let word = if i % 10 == 0 { "rare" } else { "common" };
            tx.send(Job::new(word, format!("http://a.com/{}/{}", word, i)))
                .unwrap();
        }
        drop(tx);

        let stats = pool.join().unwrap();
        assert_eq!(stats.workers(), 3);
        assert_eq!(stats.total_jobs(), 100);

        let snapshot = Arc::try_unwrap(aggregate).unwrap().into_snapshot();
        assert_eq!(snapshot.frequency_of("rare"), Some(10));
        assert_eq!(snapshot.frequency_of("common"), Some(90));
    }

    #[test]
    fn test_pool_with_no_jobs() {
        let aggregate = Arc::new(Aggregate::new(RepresentativePolicy::Last));
        let (tx, rx) = bounded::<Job>(1);
        let pool = WorkerPool::spawn(2, rx, Arc::clone(&aggregate)).unwrap();
        drop(tx);

        let stats = pool.join().unwrap();
        assert_eq!(stats.total_jobs(), 0);
        assert_eq!(aggregate.distinct_words(), 0);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let aggregate = Arc::new(Aggregate::default());
        let (_tx, rx) = bounded::<Job>(1);
        assert!(WorkerPool::spawn(0, rx, aggregate).is_err());
    }
}
