//! MemTable Module
//!
//! Vector-backed representation for the in-memory write buffer.
//!
//! ## Responsibilities
//! - Hold references to entries that are written but not yet flushed
//! - Freeze permanently once the write buffer is sealed for flush
//! - Yield entries in comparator order for seeks and range scans
//!
//! ## Data Structure Choice
//! Using an unsorted Vec that is sorted on first read:
//! - O(1) amortized inserts, no ordering work on the write path
//! - Frozen memtables share one bucket, sorted at most once
//! - Mutable memtables hand each reader a private snapshot
//! - Good fit for bulk loads that are read only after freezing

mod comparator;
mod entry;
mod factory;
mod iterator;
mod vector;

pub use comparator::{BytewiseComparator, KeyComparator, LengthPrefixedKeyComparator};
pub use entry::{decode_entry, decode_key, encode_entry, EntryArena, ENTRY_HEADER_SIZE};
pub use factory::{MemTableRepFactory, VectorRepFactory};
pub use iterator::VectorRepIter;
pub use vector::VectorRep;

/// Reference to an encoded entry owned by an external arena.
///
/// The memtable copies the reference, never the bytes.
pub type Entry<'a> = &'a [u8];

/// A pluggable memtable representation
pub trait MemTableRep<'a> {
    type Iter: RepIterator<'a>;

    /// Insert an entry.
    ///
    /// REQUIRES: nothing that compares equal to `entry` is in the collection,
    /// and the collection has not been marked read-only.
    fn insert(&self, entry: Entry<'a>);

    /// Returns true iff this exact entry reference is in the collection
    fn contains(&self, entry: Entry<'a>) -> bool;

    /// Permanently stop accepting inserts
    fn mark_read_only(&self);

    /// Approximate memory held by the representation itself (not the entries)
    fn approximate_memory_usage(&self) -> usize;

    /// Return an iterator over the entries. The iterator starts unpositioned.
    fn iter(&self) -> Self::Iter;
}

/// Cursor over memtable entries in comparator order
///
/// An iterator starts in an invalid state. Call one of the seek methods
/// to position it:
///
/// ```ignore
/// let mut iter = rep.iter();
/// iter.seek_to_first();
/// while iter.valid() {
///     println!("{:?}", iter.key());
///     iter.next();
/// }
/// ```
pub trait RepIterator<'a> {
    /// Returns true iff the iterator is positioned at an entry
    fn valid(&self) -> bool;

    /// Returns the entry at the current position.
    ///
    /// REQUIRES: valid()
    fn key(&self) -> Entry<'a>;

    /// Advances to the next position.
    ///
    /// REQUIRES: valid()
    fn next(&mut self);

    /// Moves to the previous position. Moving before the first entry
    /// leaves the iterator invalid.
    ///
    /// REQUIRES: valid()
    fn prev(&mut self);

    /// Position at the first entry not ordered before `target`
    fn seek(&mut self, target: &[u8]);

    /// Position at the last entry not ordered after `target`
    fn seek_for_prev(&mut self, target: &[u8]);

    /// Position at the first entry. Valid iff the collection is not empty.
    fn seek_to_first(&mut self);

    /// Position at the last entry. Valid iff the collection is not empty.
    fn seek_to_last(&mut self);
}
