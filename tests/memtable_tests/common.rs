//! Shared helpers for memtable tests

use std::sync::Arc;

use vectorrep::memtable::decode_key;
use vectorrep::{
    EntryArena, LengthPrefixedKeyComparator, MemTableRep, RepIterator, VectorRep, VectorRepIter,
};

pub type TestRep<'a> = VectorRep<'a, LengthPrefixedKeyComparator>;

/// Arena holding one entry per key, in the given order
pub fn arena_with_keys(keys: &[&str]) -> EntryArena {
    let mut arena = EntryArena::new();
    for key in keys {
        arena.add(key.as_bytes(), format!("value-{}", key).as_bytes()).unwrap();
    }
    arena
}

/// Empty memtable ordered by entry key
pub fn new_rep<'a>() -> TestRep<'a> {
    VectorRep::new(Arc::new(LengthPrefixedKeyComparator), 0)
}

/// Memtable filled with every entry of `arena`
pub fn rep_from_arena(arena: &EntryArena) -> TestRep<'_> {
    let rep = new_rep();
    for entry in arena.iter() {
        rep.insert(entry);
    }
    rep
}

/// Target usable with `seek` for a plain key
pub fn target(key: &str) -> Vec<u8> {
    vectorrep::memtable::encode_entry(key.as_bytes(), b"").unwrap().to_vec()
}

pub fn key_of(entry: &[u8]) -> String {
    String::from_utf8(decode_key(entry).unwrap().to_vec()).unwrap()
}

pub fn current_key(iter: &VectorRepIter<'_, LengthPrefixedKeyComparator>) -> String {
    key_of(iter.key())
}

/// Keys from the first entry to the end
pub fn scan_keys(iter: &mut VectorRepIter<'_, LengthPrefixedKeyComparator>) -> Vec<String> {
    let mut keys = Vec::new();
    iter.seek_to_first();
    while iter.valid() {
        keys.push(current_key(iter));
        iter.next();
    }
    keys
}
