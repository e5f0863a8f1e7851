//! Shannon entropy scoring for path segments.
//!
//! Low-entropy segments look like words or identifiers a human picked
//! (`admin`, `backup`, `v2`), high-entropy segments look like hashes,
//! session IDs and other random tokens. Entropy is measured in bits over
//! the Unicode code points of the segment.
//!
//! # Examples
//!
//! ```
//! use rare_segments::rarity::entropy::{shannon_entropy, EntropyScorer};
//!
//! assert_eq!(shannon_entropy(""), 0.0);
//! assert_eq!(shannon_entropy("aaaa"), 0.0);
//! assert!((shannon_entropy("ab") - 1.0).abs() < f64::EPSILON);
//!
//! let scorer = EntropyScorer::new();
//! assert_eq!(scorer.score("aaaa"), 0.0);
//! assert_eq!(scorer.len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

/// Computes the Shannon entropy of `token` in bits.
///
/// The empty string has no symbols and is defined to have zero entropy.
pub fn shannon_entropy(token: &str) -> f64 {
    if token.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in token.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }

    let len = total as f64;
    let mut entropy = 0.0;
    for &count in counts.values() {
        let p = count as f64 / len;
        entropy -= p * p.log2();
    }

    entropy
}

/// Memoizing entropy scorer shared by the dispatcher and the renderer.
///
/// The cache lock is only taken for the lookup and for the final insert,
/// so concurrent callers never serialize on the computation itself.
#[derive(Debug, Default)]
pub struct EntropyScorer {
    cache: Mutex<HashMap<String, f64>>,
}

impl EntropyScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entropy of `token`, computing and caching it on a miss.
    pub fn score(&self, token: &str) -> f64 {
        if let Some(entropy) = self.lookup(token) {
            return entropy;
        }

        let entropy = shannon_entropy(token);

        match self.cache.lock() {
            // Another thread may have raced us here; the first value wins
            Ok(mut cache) => *cache.entry(token.to_string()).or_insert(entropy),
            Err(_) => entropy,
        }
    }

    fn lookup(&self, token: &str) -> Option<f64> {
        self.cache.lock().ok()?.get(token).copied()
    }

    /// Number of distinct tokens scored so far.
    pub fn len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_string_is_zero() {
        let entropy = shannon_entropy("");
        assert_eq!(entropy, 0.0);
        assert!(!entropy.is_nan());

        let scorer = EntropyScorer::new();
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score(""), 0.0);
    }

    #[test]
    fn test_single_repeated_symbol_is_zero() {
        assert_eq!(shannon_entropy("a"), 0.0);
        assert_eq!(shannon_entropy("zzzzzzzz"), 0.0);
        assert_eq!(shannon_entropy("ééé"), 0.0);
        assert!(shannon_entropy("zzzzzzzz").is_sign_positive());
    }

    #[test]
    fn test_known_values() {
        assert!(approx(shannon_entropy("ab"), 1.0));
        assert!(approx(shannon_entropy("abcd"), 2.0));
        assert!(approx(shannon_entropy("aabb"), 1.0));
        assert!(approx(shannon_entropy("abc123"), 6f64.log2()));
        assert!(approx(shannon_entropy("0123456789abcdef"), 4.0));
    }

    #[test]
    fn test_counts_code_points_not_bytes() {
        // Two distinct code points, each multi-byte in UTF-8
        assert!(approx(shannon_entropy("éü"), 1.0));
        assert!(approx(shannon_entropy("日本日本"), 1.0));
    }

    #[test]
    fn test_non_negative_and_positive_for_mixed_tokens() {
        for token in ["admin", "login", "a1", "session-4f9a", "xyzzy"] {
            let entropy = shannon_entropy(token);
            assert!(entropy > 0.0, "{} should have positive entropy", token);
        }
    }

    #[test]
    fn test_cache_is_deterministic() {
        let scorer = EntropyScorer::new();
        let first = scorer.score("backup");
        let second = scorer.score("backup");

        assert_eq!(first, second);
        assert_eq!(first, shannon_entropy("backup"));
        assert_eq!(scorer.len(), 1);
    }

    #[test]
    fn test_cache_is_case_sensitive() {
        let scorer = EntropyScorer::new();
        scorer.score("Admin");
        scorer.score("admin");
        assert_eq!(scorer.len(), 2);
    }

    #[test]
    fn test_concurrent_scoring() {
        let scorer = Arc::new(EntropyScorer::new());
        let tokens = ["alpha", "beta", "gamma", "delta", "0123456789abcdef"];

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let scorer = Arc::clone(&scorer);
                thread::spawn(move || {
                    tokens
                        .iter()
                        .map(|t| scorer.score(t))
                        .collect::<Vec<f64>>()
                })
            })
            .collect();

        let expected: Vec<f64> = tokens.iter().map(|t| shannon_entropy(t)).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
        assert_eq!(scorer.len(), tokens.len());
    }
}
