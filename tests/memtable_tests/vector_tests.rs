//! Tests for VectorRep
//!
//! These tests verify:
//! - Insert and identity-based contains
//! - Freeze lifecycle (idempotent, rejects inserts)
//! - Memory usage accounting
//! - Factory and config wiring

use std::sync::Arc;

use vectorrep::{
    LengthPrefixedKeyComparator, MemTableConfig, MemTableRep, MemTableRepFactory, RepIterator,
    VectorRepFactory,
};

use crate::common::{arena_with_keys, new_rep, rep_from_arena, scan_keys};

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_rep_is_empty() {
    let rep = new_rep();

    assert!(rep.is_empty());
    assert_eq!(rep.len(), 0);
    assert!(!rep.is_read_only());
}

#[test]
fn test_insert_preserves_count() {
    let arena = arena_with_keys(&["5", "3", "4", "1", "2"]);
    let rep = rep_from_arena(&arena);

    assert_eq!(rep.len(), 5);
    for entry in arena.iter() {
        assert!(rep.contains(entry));
    }
}

#[test]
fn test_contains_does_not_match_equal_keys_from_other_buffers() {
    let arena = arena_with_keys(&["a"]);
    let other = arena_with_keys(&["a"]);
    let rep = rep_from_arena(&arena);

    assert!(rep.contains(arena.get(0).unwrap()));
    assert!(!rep.contains(other.get(0).unwrap()));
}

// =============================================================================
// Freeze Tests
// =============================================================================

#[test]
fn test_mark_read_only() {
    let arena = arena_with_keys(&["b", "a"]);
    let rep = rep_from_arena(&arena);

    rep.mark_read_only();

    assert!(rep.is_read_only());
    assert_eq!(rep.len(), 2);
}

#[test]
fn test_mark_read_only_twice_is_noop() {
    let arena = arena_with_keys(&["b", "a"]);
    let rep = rep_from_arena(&arena);

    rep.mark_read_only();
    let mut iter = rep.iter();
    assert_eq!(scan_keys(&mut iter), vec!["a", "b"]);

    rep.mark_read_only();
    assert!(rep.is_sorted());
    assert_eq!(scan_keys(&mut rep.iter()), vec!["a", "b"]);
}

#[test]
#[should_panic(expected = "read-only")]
fn test_insert_after_freeze_panics() {
    let arena = arena_with_keys(&["a", "b"]);
    let rep = new_rep();
    rep.insert(arena.get(0).unwrap());
    rep.mark_read_only();

    rep.insert(arena.get(1).unwrap());
}

#[test]
fn test_empty_rep_can_freeze() {
    let rep = new_rep();
    rep.mark_read_only();

    let mut iter = rep.iter();
    iter.seek_to_first();
    assert!(!iter.valid());
}

// =============================================================================
// Memory Usage Tests
// =============================================================================

#[test]
fn test_memory_usage_non_decreasing() {
    let keys: Vec<String> = (0..100).map(|i| format!("key{:03}", i)).collect();
    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let arena = arena_with_keys(&refs);
    let rep = new_rep();

    let mut last = rep.approximate_memory_usage();
    for entry in arena.iter() {
        rep.insert(entry);
        let usage = rep.approximate_memory_usage();
        assert!(usage > last);
        last = usage;
    }
}

#[test]
fn test_memory_usage_excludes_entry_bytes() {
    let arena = arena_with_keys(&["a-very-long-key-that-outweighs-a-reference"]);
    let empty = new_rep().approximate_memory_usage();
    let rep = rep_from_arena(&arena);

    let per_entry = rep.approximate_memory_usage() - empty;
    assert_eq!(per_entry, std::mem::size_of::<&[u8]>());
}

// =============================================================================
// Factory Tests
// =============================================================================

#[test]
fn test_factory_creates_empty_rep() {
    let config: MemTableConfig = "vector:64".parse().unwrap();
    let factory = VectorRepFactory::from(&config);
    let rep = factory.create_rep(Arc::new(LengthPrefixedKeyComparator));

    assert_eq!(factory.name(), "VectorRepFactory");
    assert_eq!(factory.count(), 64);
    assert!(rep.is_empty());
}
