//! Vector memtable representation
//!
//! Unsorted, append-only bucket of entry references with a one-way freeze.

use std::mem;
use std::sync::{Arc, OnceLock};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use super::comparator::KeyComparator;
use super::iterator::VectorRepIter;
use super::{Entry, MemTableRep};

/// Vector-backed memtable representation
///
/// ## Lifecycle
/// - **Mutable**: inserts append to a private `Vec`; every iterator gets its
///   own snapshot copy, sorted lazily by that iterator alone.
/// - **Frozen**: after `mark_read_only` the entries move into a
///   [`FrozenBucket`] shared by every iterator. The first iterator to need
///   order sorts it in place, exactly once.
///
/// ## Concurrency
/// - `bucket`: RwLock. `insert` and `mark_read_only` take the write side,
///   `contains`, `iter` and `approximate_memory_usage` the read side.
/// - The shared sort is serialized by the frozen bucket itself, so readers
///   holding a frozen iterator never touch this lock again.
pub struct VectorRep<'a, C> {
    bucket: RwLock<Bucket<'a>>,
    comparator: Arc<C>,
}

enum Bucket<'a> {
    Mutable(Vec<Entry<'a>>),
    Frozen(Arc<FrozenBucket<'a>>),
}

impl<'a, C: KeyComparator> VectorRep<'a, C> {
    /// Create an empty memtable, reserving room for `count` entries
    pub fn new(comparator: Arc<C>, count: usize) -> Self {
        Self {
            bucket: RwLock::new(Bucket::Mutable(Vec::with_capacity(count))),
            comparator,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        match &*self.bucket.read() {
            Bucket::Mutable(entries) => entries.len(),
            Bucket::Frozen(frozen) => frozen.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true once `mark_read_only` has been called
    pub fn is_read_only(&self) -> bool {
        matches!(&*self.bucket.read(), Bucket::Frozen(_))
    }

    /// Returns true once a frozen memtable has been sorted by some iterator
    pub fn is_sorted(&self) -> bool {
        match &*self.bucket.read() {
            Bucket::Mutable(_) => false,
            Bucket::Frozen(frozen) => frozen.is_sorted(),
        }
    }

    pub fn comparator(&self) -> &Arc<C> {
        &self.comparator
    }
}

impl<'a, C: KeyComparator> MemTableRep<'a> for VectorRep<'a, C> {
    type Iter = VectorRepIter<'a, C>;

    /// Append an entry.
    ///
    /// # Panics
    /// If the memtable is read-only. Duplicate references are caught in
    /// debug builds.
    fn insert(&self, entry: Entry<'a>) {
        debug_assert!(!self.contains(entry), "entry inserted twice into memtable");

        match &mut *self.bucket.write() {
            Bucket::Mutable(entries) => entries.push(entry),
            Bucket::Frozen(_) => panic!("insert into a read-only memtable"),
        }
    }

    /// Identity check: matches the same reference (address and length),
    /// not another buffer with an equal key.
    fn contains(&self, entry: Entry<'a>) -> bool {
        match &*self.bucket.read() {
            Bucket::Mutable(entries) => contains_ref(entries, entry),
            Bucket::Frozen(frozen) => frozen.contains(entry, &*self.comparator),
        }
    }

    /// Freeze the memtable. Calling it again is a no-op.
    fn mark_read_only(&self) {
        let mut bucket = self.bucket.write();
        if let Bucket::Mutable(entries) = &mut *bucket {
            let entries = mem::take(entries);
            debug!(entries = entries.len(), "memtable marked read-only");
            *bucket = Bucket::Frozen(Arc::new(FrozenBucket::new(entries)));
        }
    }

    fn approximate_memory_usage(&self) -> usize {
        let (overhead, len) = match &*self.bucket.read() {
            Bucket::Mutable(entries) => (0, entries.len()),
            Bucket::Frozen(frozen) => (mem::size_of::<FrozenBucket<'a>>(), frozen.len()),
        };
        mem::size_of::<Self>() + overhead + len * mem::size_of::<Entry<'a>>()
    }

    /// No sorting happens here; it is deferred to the first positioning call
    /// on the returned iterator.
    fn iter(&self) -> VectorRepIter<'a, C> {
        match &*self.bucket.read() {
            Bucket::Mutable(entries) => {
                trace!(entries = entries.len(), "memtable snapshot iterator");
                VectorRepIter::snapshot(entries.clone(), Arc::clone(&self.comparator))
            }
            Bucket::Frozen(frozen) => {
                VectorRepIter::shared(Arc::clone(frozen), Arc::clone(&self.comparator))
            }
        }
    }
}

/// Entries of a read-only memtable, shared by its iterators.
///
/// `pending` holds the entries in insertion order until the first sort
/// moves them into `sorted`. `OnceLock` guarantees a single sort and
/// publishes the result to every racing reader.
pub(super) struct FrozenBucket<'a> {
    pending: Mutex<Vec<Entry<'a>>>,
    sorted: OnceLock<Box<[Entry<'a>]>>,
    len: usize,
}

impl<'a> FrozenBucket<'a> {
    fn new(entries: Vec<Entry<'a>>) -> Self {
        Self {
            len: entries.len(),
            pending: Mutex::new(entries),
            sorted: OnceLock::new(),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.len
    }

    pub(super) fn is_sorted(&self) -> bool {
        self.sorted.get().is_some()
    }

    /// Sorted entries, sorting them on the first call.
    pub(super) fn sorted<C: KeyComparator + ?Sized>(&self, comparator: &C) -> &[Entry<'a>] {
        self.sorted.get_or_init(|| {
            // Sort before moving out: a panicking comparator leaves
            // `pending` a full permutation for the next caller.
            let mut pending = self.pending.lock();
            pending.sort_unstable_by(|a, b| comparator.compare(a, b));
            let entries = mem::take(&mut *pending);
            debug!(entries = entries.len(), "sorted read-only memtable");
            entries.into_boxed_slice()
        })
    }

    fn contains<C: KeyComparator + ?Sized>(&self, entry: Entry<'a>, comparator: &C) -> bool {
        if let Some(sorted) = self.sorted.get() {
            return contains_ref(sorted, entry);
        }

        {
            let pending = self.pending.lock();
            if pending.len() == self.len {
                return contains_ref(&pending, entry);
            }
        }

        // A sort is in flight; wait for it to publish.
        contains_ref(self.sorted(comparator), entry)
    }
}

fn contains_ref(entries: &[Entry<'_>], entry: Entry<'_>) -> bool {
    entries.iter().any(|e| std::ptr::eq(*e, entry))
}
