//! Rare, low-entropy path segment detection.
//!
//! The pipeline is split into small pieces that are wired together by
//! [`scan`]:
//!
//! - [`entropy`] - Shannon entropy of a segment, with a shared cache
//! - [`path`] - Decoded path recovery for absolute and relative lines
//! - [`dispatcher`] - Segment extraction and entropy filtering
//! - [`pool`] - Worker threads counting words from the job queue
//! - [`aggregate`] - The word frequency and representative URL tables
//! - [`ranker`] - Rarest-first ordering and truncation
//! - [`config`] - Scan settings and their defaults
//!
//! # Example
//!
//! ```
//! use rare_segments::rarity::config::ScanConfig;
//! use rare_segments::rarity::scan::scan_reader;
//! use std::io::Cursor;
//!
//! let input = "http://a.com/x/abc123\nhttp://a.com/x/abc123\nhttp://a.com/x/q\n";
//! let config = ScanConfig::default().position(2).max_entropy(4.0);
//! let outcome = scan_reader(Cursor::new(input), &config).unwrap();
//!
//! assert_eq!(outcome.words(), vec!["q", "abc123"]);
//! ```

pub mod aggregate;
pub mod config;
pub mod dispatcher;
pub mod entropy;
pub mod path;
pub mod pool;
pub mod ranker;
pub mod scan;
