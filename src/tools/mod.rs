//! The tools module provides helpers for the compressor.
//!
//! The tools are:
//! - cli: Command line interface.
//! - error: The crate error type.
//! - freq_count: Frequency count of the source bytes.
//! - staged_write: Write output through a scratch file so failures leave nothing behind.
//!
pub mod cli;
pub mod error;
pub mod freq_count;
pub mod staged_write;
