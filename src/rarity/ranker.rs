//! Ranking of aggregated words, rarest first.
//!
//! Words are ordered by ascending frequency and then lexicographically, which
//! is a total order: identical aggregates always produce identical rankings.

use crate::rarity::aggregate::AggregateSnapshot;
use crate::rarity::entropy::EntropyScorer;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Converts the command-line limit convention (negative means unlimited).
pub fn limit_from_flag(flag: i64) -> Option<usize> {
    usize::try_from(flag).ok()
}

fn by_rarity(freq: &HashMap<String, usize>, a: &str, b: &str) -> Ordering {
    let count_a = freq.get(a).copied().unwrap_or(0);
    let count_b = freq.get(b).copied().unwrap_or(0);
    count_a.cmp(&count_b).then_with(|| a.cmp(b))
}

/// Returns the distinct words of `freq`, rarest first, truncated to `limit`.
///
/// A limit larger than the number of words returns every word.
pub fn rank(freq: &HashMap<String, usize>, limit: Option<usize>) -> Vec<String> {
    let mut words: Vec<String> = freq.keys().cloned().collect();
    words.par_sort_by(|a, b| by_rarity(freq, a, b));

    if let Some(limit) = limit {
        words.truncate(limit);
    }
    words
}

/// A ranked word joined with everything needed to display it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedWord {
    pub word: String,
    pub frequency: usize,
    pub entropy: f64,
    pub url: String,
}

/// Ranks the snapshot and attaches frequency, entropy and representative URL.
pub fn select(
    snapshot: &AggregateSnapshot,
    limit: Option<usize>,
    scorer: &EntropyScorer,
) -> Vec<RankedWord> {
    rank(&snapshot.frequency, limit)
        .into_iter()
        .filter_map(|word| {
            let frequency = snapshot.frequency_of(&word)?;
            let url = snapshot.representative_of(&word)?.to_string();
            let entropy = scorer.score(&word);
            Some(RankedWord {
                word,
                frequency,
                entropy,
                url,
            })
        })
        .collect()
}
