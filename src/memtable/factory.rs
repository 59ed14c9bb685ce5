//! MemTable representation factory
//!
//! Creates a fresh representation for every new write buffer.

use std::sync::Arc;

use tracing::trace;

use crate::config::MemTableConfig;

use super::comparator::KeyComparator;
use super::vector::VectorRep;
use super::MemTableRep;

/// Factory for a memtable representation
pub trait MemTableRepFactory {
    type Rep<'a, C: KeyComparator>: MemTableRep<'a>;

    /// Create an empty memtable ordered by `comparator`
    fn create_rep<'a, C: KeyComparator>(&self, comparator: Arc<C>) -> Self::Rep<'a, C>;

    /// Name reported in engine options and logs
    fn name(&self) -> &'static str;
}

/// Creates [`VectorRep`] memtables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VectorRepFactory {
    /// Entries to pre-reserve in each new memtable
    count: usize,
}

impl VectorRepFactory {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl MemTableRepFactory for VectorRepFactory {
    type Rep<'a, C: KeyComparator> = VectorRep<'a, C>;

    fn create_rep<'a, C: KeyComparator>(&self, comparator: Arc<C>) -> VectorRep<'a, C> {
        trace!(reserve = self.count, "creating vector memtable");
        VectorRep::new(comparator, self.count)
    }

    fn name(&self) -> &'static str {
        "VectorRepFactory"
    }
}

impl From<&MemTableConfig> for VectorRepFactory {
    fn from(config: &MemTableConfig) -> Self {
        Self::new(config.reserve_count)
    }
}
