//! Utility functions and helpers.
//!
//! This module provides common functionality used by the scan pipeline:
//!
//! - [`format`] - Number formatting for summaries
//! - [`processor`] - Line-by-line processing of every input
//! - [`progress`] - Progress spinner display
//! - [`reader`] - Input reader with stdin and automatic decompression
//!
//! # Examples
//!
//! ## Reading compressed files
//!
//! ```no_run
//! use rare_segments::utils::reader::open_input;
//! use std::io::{BufRead, BufReader};
//!
//! // Automatically decompresses .gz and .zst files
//! let reader = open_input("urls.txt.gz").unwrap();
//! let buf_reader = BufReader::new(reader);
//! ```

pub mod format;
pub mod processor;
pub mod progress;
pub mod reader;
