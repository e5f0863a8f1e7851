//! Shared word aggregate updated by the worker pool.
//!
//! Frequencies and representative URLs live behind a single mutex so that
//! every recorded job updates both tables in one critical section. Once the
//! pool has drained, the aggregate is frozen into an [`AggregateSnapshot`].

use crate::rarity::config::RepresentativePolicy;
use std::collections::HashMap;
use std::sync::Mutex;

/// A word extracted from a URL path together with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub word: String,
    pub url: String,
}

impl Job {
    pub fn new(word: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    frequency: HashMap<String, usize>,
    representative: HashMap<String, String>,
}

/// Word frequencies and representative URLs, safe to share across workers.
#[derive(Debug, Default)]
pub struct Aggregate {
    policy: RepresentativePolicy,
    tables: Mutex<Tables>,
}

impl Aggregate {
    pub fn new(policy: RepresentativePolicy) -> Self {
        Self {
            policy,
            tables: Mutex::new(Tables::default()),
        }
    }

    /// Counts one occurrence of `job.word` and updates its representative URL.
    pub fn record(&self, job: Job) {
        // Nothing between the two table updates can panic, so a poisoned
        // guard still holds matching key sets
        let mut tables = match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let Job { word, url } = job;
        *tables.frequency.entry(word.clone()).or_insert(0) += 1;

        match self.policy {
            RepresentativePolicy::Last => {
                tables.representative.insert(word, url);
            }
            RepresentativePolicy::First => {
                tables.representative.entry(word).or_insert(url);
            }
            RepresentativePolicy::Smallest => {
                let current = tables.representative.entry(word).or_insert_with(|| url.clone());
                if url < *current {
                    *current = url;
                }
            }
        }
    }

    /// Number of distinct words recorded so far.
    pub fn distinct_words(&self) -> usize {
        self.tables
            .lock()
            .map(|tables| tables.frequency.len())
            .unwrap_or(0)
    }

    /// Freezes the aggregate. Call only after every worker has been joined.
    pub fn into_snapshot(self) -> AggregateSnapshot {
        let tables = match self.tables.into_inner() {
            Ok(tables) => tables,
            Err(poisoned) => poisoned.into_inner(),
        };

        AggregateSnapshot {
            frequency: tables.frequency,
            representative: tables.representative,
        }
    }
}

/// Read-only view of the aggregate after the barrier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateSnapshot {
    pub frequency: HashMap<String, usize>,
    pub representative: HashMap<String, String>,
}

impl AggregateSnapshot {
    pub fn frequency_of(&self, word: &str) -> Option<usize> {
        self.frequency.get(word).copied()
    }

    pub fn representative_of(&self, word: &str) -> Option<&str> {
        self.representative.get(word).map(String::as_str)
    }

    pub fn distinct_words(&self) -> usize {
        self.frequency.len()
    }
}
