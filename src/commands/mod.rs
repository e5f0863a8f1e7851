//! Command implementations.
//!
//! - [`scan`] - Find URLs with rare, low-entropy path segments

pub mod scan;
