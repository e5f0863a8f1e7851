//! Input reader with stdin and automatic decompression support.
//!
//! URL lists are often archived compressed, so `.gz` and `.zst` inputs are
//! decompressed transparently. The name `-` selects standard input.
//!
//! # Examples
//!
//! ```no_run
//! use rare_segments::utils::reader::open_input;
//! use std::io::{BufRead, BufReader};
//!
//! // Automatically handles .gz, .zst, plain text or "-" for stdin
//! let reader = open_input("urls.txt.gz").unwrap();
//! let buf_reader = BufReader::new(reader);
//!
//! for line in buf_reader.lines() {
//!     let line = line.unwrap();
//!     // Process line...
//! }
//! ```

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Input name that selects standard input.
pub const STDIN: &str = "-";

/// Opens an input for reading.
///
/// - `-` → standard input
/// - `.gz` → Gzip decompression
/// - `.zst` → Zstandard decompression
/// - Otherwise → plain file
pub fn open_input(name: &str) -> Result<Box<dyn Read + Send>> {
    if name == STDIN {
        return Ok(Box::new(io::stdin()));
    }
    open_file(name)
}

/// Opens a file with automatic decompression based on extension.
pub fn open_file(path: impl AsRef<Path>) -> Result<Box<dyn Read + Send>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "gz" => Ok(Box::new(GzDecoder::new(file))),
        "zst" => {
            let decoder = zstd::Decoder::new(file).with_context(|| {
                format!("Failed to create zstd decoder for: {}", path.display())
            })?;
            Ok(Box::new(decoder))
        }
        _ => Ok(Box::new(file)),
    }
}
