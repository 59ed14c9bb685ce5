//! Key comparators
//!
//! The memtable only relies on the ordering contract: a strict weak order
//! over two entry references, fixed for the lifetime of the memtable.

use std::cmp::Ordering;

use super::entry::decode_key;

/// Total order over encoded entries
pub trait KeyComparator: Send + Sync {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;
}

impl<F> KeyComparator for F
where
    F: Fn(&[u8], &[u8]) -> Ordering + Send + Sync,
{
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        self(a, b)
    }
}

/// Lexicographic order over the raw entry bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct BytewiseComparator;

impl KeyComparator for BytewiseComparator {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        a.cmp(b)
    }
}

/// Orders entries produced by [`encode_entry`](super::encode_entry) by key only.
///
/// Buffers that do not decode are compared as raw bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthPrefixedKeyComparator;

impl KeyComparator for LengthPrefixedKeyComparator {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        let a = decode_key(a).unwrap_or(a);
        let b = decode_key(b).unwrap_or(b);
        a.cmp(b)
    }
}
