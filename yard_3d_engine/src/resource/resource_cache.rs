/// Key-based memoization of shared resources.
///
/// A ResourceCache maps a symbolic string key to exactly one shared
/// instance (`Arc<T>`). The first request for a key runs the supplied
/// factory; every later request returns the stored instance and never
/// runs a factory again, whatever factory it supplies. There is no
/// eviction: entries live as long as the cache.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::{engine_debug, engine_trace, engine_warn};

/// Hit/miss counters for a cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered from a stored entry
    pub hits: u64,
    /// Requests that ran a factory (successfully or not)
    pub misses: u64,
    /// Number of stored entries
    pub entries: usize,
}

/// Memoization table scoped to its owner's lifetime.
pub struct ResourceCache<T> {
    /// Namespace used in log messages ("geometry", "material", ...)
    namespace: &'static str,
    entries: FxHashMap<String, Arc<T>>,
    hits: u64,
    misses: u64,
}

impl<T> ResourceCache<T> {
    /// Create an empty cache for the given namespace
    pub fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            entries: FxHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }

    /// Namespace given at construction
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Return the instance stored under `key`, creating it with `factory`
    /// on first request.
    pub fn get<F>(&mut self, key: &str, factory: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.lookup(key) {
            return existing;
        }

        self.misses += 1;
        let value = Arc::new(factory());
        self.store(key, &value);
        value
    }

    /// Fallible form of [`get`](Self::get).
    ///
    /// A failing factory stores nothing: the error goes back to the caller
    /// and the next request for the same key runs a factory again.
    pub fn try_get<F>(&mut self, key: &str, factory: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(existing) = self.lookup(key) {
            return Ok(existing);
        }

        self.misses += 1;
        match factory() {
            Ok(value) => {
                let value = Arc::new(value);
                self.store(key, &value);
                Ok(value)
            }
            Err(err) => {
                engine_warn!("yard3d::ResourceCache",
                    "Factory for {} '{}' failed, nothing cached: {}", self.namespace, key, err);
                Err(err)
            }
        }
    }

    /// Stored instance for `key`, without creating it
    pub fn peek(&self, key: &str) -> Option<Arc<T>> {
        self.entries.get(key).cloned()
    }

    /// Whether an instance is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over stored keys (unordered)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Hit/miss counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    fn lookup(&mut self, key: &str) -> Option<Arc<T>> {
        let existing = self.entries.get(key).cloned()?;
        self.hits += 1;
        engine_trace!("yard3d::ResourceCache", "Hit {} '{}'", self.namespace, key);
        Some(existing)
    }

    fn store(&mut self, key: &str, value: &Arc<T>) {
        self.entries.insert(key.to_string(), Arc::clone(value));
        engine_debug!("yard3d::ResourceCache",
            "Created {} '{}' ({} cached)", self.namespace, key, self.entries.len());
    }
}

#[cfg(test)]
#[path = "resource_cache_tests.rs"]
mod tests;
