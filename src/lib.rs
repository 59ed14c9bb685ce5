//! # vectorrep
//!
//! A vector-backed memtable representation for an LSM write buffer:
//! - Append-only inserts while the memtable is accepting writes
//! - One-way freeze into a read-only bucket shared by all readers
//! - Lazy sort on first read, performed at most once for frozen memtables
//! - Snapshot iterators for memtables that are still mutable
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Write Path                            │
//! │                 (insert encoded entries)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       VectorRep                              │
//! │             RwLock<Mutable(Vec) | Frozen(Arc)>               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ iter()
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Private   │          │   Shared    │
//!   │  snapshot   │          │ sort-once   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod memtable;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MemTableError, Result};
pub use config::MemTableConfig;
pub use memtable::{
    BytewiseComparator, Entry, EntryArena, KeyComparator, LengthPrefixedKeyComparator,
    MemTableRep, MemTableRepFactory, RepIterator, VectorRep, VectorRepFactory, VectorRepIter,
};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of vectorrep
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
