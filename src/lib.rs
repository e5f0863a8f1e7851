//! # Rare Segments
//!
//! Command-line triage for large URL corpora: find the URLs whose path
//! segment at a given position is both **rare** across the input and
//! **low-entropy**, i.e. looks like a word someone chose (`backup`,
//! `internal`, `v1-old`) rather than a hash or session token.
//!
//! ## Overview
//!
//! URLs are read line by line from stdin or files, the segment at the
//! requested position is scored with Shannon entropy, and segments under the
//! entropy level are counted by a pool of worker threads. The counted words
//! are then ranked rarest first (ties broken alphabetically) and printed
//! with the matching segment highlighted.
//!
//! ## Features
//!
//! - **Bounded producer/consumer pipeline** - a single reader feeds a worker
//!   pool through a bounded queue, so memory stays flat on huge inputs
//! - **Cached entropy scoring** - each distinct segment is scored once
//! - **Deterministic ranking** - frequency ascending, then lexicographic
//! - **Compressed input** - `.gz` and `.zst` files are read directly
//! - **Text, JSON and CSV output**
//! - **Shell completion** for bash, zsh, fish, powershell, and elvish
//!
//! ## Architecture
//!
//! - [`rarity`] - Entropy scoring, dispatch, aggregation and ranking
//! - [`output`] - Highlighted text, JSON and CSV rendering
//! - [`commands`] - The command wiring configuration, scan and output
//! - [`utils`] - Shared utilities (input reading, progress, formatting)
//!
//! ## Example Usage
//!
//! ```bash
//! # Rarest first path components
//! cat urls.txt | rare-segments
//!
//! # Third path component, 20 rarest, verbose annotations
//! rare-segments -p 3 -x 20 -v urls.txt
//!
//! # Compressed crawl output, stricter entropy level
//! rare-segments -e 3.0 crawl.txt.zst
//! ```

pub mod commands;
pub mod output;
pub mod rarity;
pub mod utils;
