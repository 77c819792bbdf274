/// Tests for ResourceCache
///
/// Instance identity is checked with Arc::ptr_eq; factory invocations are
/// counted with a Cell so the tests can prove a factory never ran.

use super::*;
use crate::error::Error;
use std::cell::Cell;

#[derive(Debug, PartialEq)]
struct Shape {
    size: u32,
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_same_key_returns_same_instance() {
    let mut cache = ResourceCache::new("shape");

    let first = cache.get("fence", || Shape { size: 50 });
    let second = cache.get("fence", || Shape { size: 50 });

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_second_factory_never_invoked() {
    let mut cache = ResourceCache::new("shape");
    let second_calls = Cell::new(0);

    let first = cache.get("leaves", || Shape { size: 3 });
    let second = cache.get("leaves", || {
        second_calls.set(second_calls.get() + 1);
        Shape { size: 13 }
    });

    assert_eq!(second_calls.get(), 0);
    assert!(Arc::ptr_eq(&first, &second));
    // First factory wins even though the second one would build something else
    assert_eq!(second.size, 3);
}

// ============================================================================
// Isolation
// ============================================================================

#[test]
fn test_distinct_keys_invoke_independent_factories() {
    let mut cache = ResourceCache::new("shape");
    let calls = Cell::new(0);
    let make = || {
        calls.set(calls.get() + 1);
        Shape { size: 1 }
    };

    let a = cache.get("cloud", make);
    let b = cache.get("window", make);

    assert_eq!(calls.get(), 2);
    // Structurally equal but distinct instances
    assert_eq!(*a, *b);
    assert!(!Arc::ptr_eq(&a, &b));
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_failed_factory_is_not_memoized() {
    let mut cache: ResourceCache<Shape> = ResourceCache::new("shape");

    let err = cache
        .try_get("roof", || Err(Error::InvalidResource("negative height".to_string())))
        .unwrap_err();
    assert_eq!(err, Error::InvalidResource("negative height".to_string()));
    assert!(!cache.contains("roof"));
    assert!(cache.is_empty());

    // Next request retries construction
    let calls = Cell::new(0);
    let roof = cache
        .try_get("roof", || {
            calls.set(calls.get() + 1);
            Ok(Shape { size: 5 })
        })
        .unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(roof.size, 5);
    assert!(cache.contains("roof"));
}

#[test]
fn test_try_get_hit_skips_factory() {
    let mut cache = ResourceCache::new("shape");
    let stored = cache.get("door", || Shape { size: 2 });

    let again = cache
        .try_get("door", || Err(Error::InvalidResource("must not run".to_string())))
        .unwrap();
    assert!(Arc::ptr_eq(&stored, &again));
}

// ============================================================================
// Introspection
// ============================================================================

#[test]
fn test_peek_does_not_create() {
    let mut cache = ResourceCache::new("shape");
    assert!(cache.peek("trunk").is_none());

    let trunk = cache.get("trunk", || Shape { size: 4 });
    let peeked = cache.peek("trunk").unwrap();
    assert!(Arc::ptr_eq(&trunk, &peeked));
}

#[test]
fn test_stats_count_hits_and_misses() {
    let mut cache = ResourceCache::new("shape");
    cache.get("a", || Shape { size: 1 });
    cache.get("a", || Shape { size: 1 });
    cache.get("a", || Shape { size: 1 });
    let _ = cache.try_get("b", || Err(Error::InvalidResource("nope".to_string())));

    assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 2, entries: 1 });
    assert_eq!(cache.namespace(), "shape");
}

#[test]
fn test_keys_lists_entries() {
    let mut cache = ResourceCache::new("shape");
    cache.get("x", || Shape { size: 1 });
    cache.get("y", || Shape { size: 2 });

    let mut keys: Vec<&str> = cache.keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["x", "y"]);
}
