//! Error types for vectorrep
//!
//! Provides a unified error type for the fallible edges of the crate
//! (configuration parsing and entry decoding). Contract violations on the
//! memtable itself are panics, not error values.

use thiserror::Error;

/// Result type alias using MemTableError
pub type Result<T> = std::result::Result<T, MemTableError>;

/// Unified error type for vectorrep operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemTableError {
    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Entry Errors
    // -------------------------------------------------------------------------
    #[error("Malformed entry: {len} bytes, needed at least {needed}")]
    MalformedEntry { len: usize, needed: usize },

    #[error("Key too large: {0} bytes exceeds the u32 length header")]
    KeyTooLarge(usize),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),
}
