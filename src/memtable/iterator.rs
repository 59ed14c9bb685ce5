//! Vector memtable iterator
//!
//! Cursor over either a private snapshot (memtable still mutable) or the
//! shared frozen bucket. Both are sorted lazily, on the first call that
//! depends on order.

use std::cell::{OnceCell, RefCell};
use std::mem;
use std::cmp::Ordering;
use std::sync::Arc;

use tracing::trace;

use super::comparator::KeyComparator;
use super::vector::FrozenBucket;
use super::{Entry, RepIterator};

/// Cursor value for "not positioned at an entry"
const PAST_END: usize = usize::MAX;

/// Where the iterator's entries live
enum Backing<'a> {
    /// Copy taken while the memtable was mutable. Owned by this iterator
    /// only, so it sorts without any synchronization.
    Snapshot {
        pending: RefCell<Vec<Entry<'a>>>,
        sorted: OnceCell<Vec<Entry<'a>>>,
    },

    /// Bucket of a frozen memtable, sorted once for all iterators.
    Shared(Arc<FrozenBucket<'a>>),
}

/// Iterator returned by [`VectorRep::iter`](super::VectorRep)
///
/// ## States
/// - unpositioned: freshly created, `valid() == false`
/// - positioned: `cursor` indexes an entry
/// - invalid: stepped off either end or a seek found nothing
///
/// Unpositioned and invalid share the `PAST_END` cursor.
pub struct VectorRepIter<'a, C> {
    backing: Backing<'a>,
    comparator: Arc<C>,
    cursor: usize,
}

impl<'a, C: KeyComparator> VectorRepIter<'a, C> {
    pub(super) fn snapshot(entries: Vec<Entry<'a>>, comparator: Arc<C>) -> Self {
        Self {
            backing: Backing::Snapshot {
                pending: RefCell::new(entries),
                sorted: OnceCell::new(),
            },
            comparator,
            cursor: PAST_END,
        }
    }

    pub(super) fn shared(bucket: Arc<FrozenBucket<'a>>, comparator: Arc<C>) -> Self {
        Self {
            backing: Backing::Shared(bucket),
            comparator,
            cursor: PAST_END,
        }
    }

    /// Returns true if this iterator reads the shared bucket of a frozen memtable
    pub fn is_shared(&self) -> bool {
        matches!(self.backing, Backing::Shared(_))
    }

    /// Number of entries visible to this iterator. Does not sort.
    pub fn len(&self) -> usize {
        match &self.backing {
            Backing::Snapshot { pending, sorted } => match sorted.get() {
                Some(entries) => entries.len(),
                None => pending.borrow().len(),
            },
            Backing::Shared(bucket) => bucket.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted view of the backing entries, sorting on first use
    fn entries(&self) -> &[Entry<'a>] {
        match &self.backing {
            Backing::Snapshot { pending, sorted } => sorted.get_or_init(|| {
                // Sort before moving out: a panicking comparator leaves
                // `pending` a full permutation.
                let mut pending = pending.borrow_mut();
                pending.sort_unstable_by(|a, b| self.comparator.compare(a, b));
                let entries = mem::take(&mut *pending);
                trace!(entries = entries.len(), "sorted memtable snapshot");
                entries
            }),
            Backing::Shared(bucket) => bucket.sorted(&*self.comparator),
        }
    }

    /// Move to `pos`, or past the end if `pos` is out of range
    fn position_at(&mut self, pos: usize) {
        let len = self.entries().len();
        self.cursor = if pos < len { pos } else { PAST_END };
    }
}

impl<'a, C: KeyComparator> RepIterator<'a> for VectorRepIter<'a, C> {
    fn valid(&self) -> bool {
        self.cursor < self.entries().len()
    }

    /// # Panics
    /// If the iterator is not valid.
    fn key(&self) -> Entry<'a> {
        assert!(self.valid(), "key() called on an invalid memtable iterator");
        self.entries()[self.cursor]
    }

    fn next(&mut self) {
        debug_assert!(self.valid());
        if self.cursor == PAST_END {
            return;
        }
        let next = self.cursor + 1;
        self.position_at(next);
    }

    /// Stepping back from the first entry invalidates the iterator; it does
    /// not wrap around to the last one.
    fn prev(&mut self) {
        debug_assert!(self.valid());
        self.cursor = match self.cursor {
            0 | PAST_END => PAST_END,
            pos => pos - 1,
        };
    }

    fn seek(&mut self, target: &[u8]) {
        let pos = self
            .entries()
            .partition_point(|e| self.comparator.compare(e, target) == Ordering::Less);
        self.position_at(pos);
    }

    fn seek_for_prev(&mut self, target: &[u8]) {
        let pos = self
            .entries()
            .partition_point(|e| self.comparator.compare(e, target) != Ordering::Greater);
        self.cursor = pos.checked_sub(1).unwrap_or(PAST_END);
    }

    fn seek_to_first(&mut self) {
        self.position_at(0);
    }

    fn seek_to_last(&mut self) {
        self.cursor = self.entries().len().checked_sub(1).unwrap_or(PAST_END);
    }
}
