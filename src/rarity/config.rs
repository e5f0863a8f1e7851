//! Scan configuration.
//!
//! [`ScanConfig`] is the single value threaded from the command line into
//! the pipeline. Its [`Default`] carries the documented defaults.

use thiserror::Error;

/// Default path segment index (first real path component).
pub const DEFAULT_POSITION: usize = 1;
/// Default maximum entropy, in bits, for a segment to be considered.
pub const DEFAULT_MAX_ENTROPY: f64 = 3.5;
/// Default number of aggregation workers.
pub const DEFAULT_WORKERS: usize = 10;
/// Default capacity of the bounded job queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Which source URL is kept as the representative for a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RepresentativePolicy {
    /// Most recently recorded URL wins (nondeterministic across runs)
    #[default]
    Last,
    /// First recorded URL is kept
    First,
    /// Lexicographically smallest URL is kept (reproducible)
    Smallest,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("queue capacity must be at least 1")]
    EmptyQueue,

    #[error("entropy threshold must be a number, got {0}")]
    InvalidEntropy(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// 0-based index into the `/`-split path
    pub position: usize,
    /// Maximum number of results; `None` means unlimited
    pub limit: Option<usize>,
    /// Segments scoring above this are discarded
    pub max_entropy: f64,
    pub workers: usize,
    pub queue_capacity: usize,
    pub representative: RepresentativePolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            limit: None,
            max_entropy: DEFAULT_MAX_ENTROPY,
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            representative: RepresentativePolicy::default(),
        }
    }
}

impl ScanConfig {
    #[must_use]
    pub const fn position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn max_entropy(mut self, max_entropy: f64) -> Self {
        self.max_entropy = max_entropy;
        self
    }

    #[must_use]
    pub const fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub const fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn representative(mut self, policy: RepresentativePolicy) -> Self {
        self.representative = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::EmptyQueue);
        }
        if self.max_entropy.is_nan() {
            return Err(ConfigError::InvalidEntropy(self.max_entropy));
        }
        Ok(())
    }
}
