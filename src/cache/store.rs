//! Cache Store Module
//!
//! Key-value storage with per-entry TTL and lazy expiry on read.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// In-memory key-value store whose entries expire passively.
///
/// There is no capacity bound and no background sweep: an expired entry
/// stays in the map until the next `get` for its key drops it or a `set`
/// replaces it.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Hit/miss counters
    stats: CacheStats,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new, empty CacheStore.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    // == Has ==
    /// Returns true if `key` holds an entry that has not expired yet.
    pub fn has(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Missing and expired entries both read as `None` and count as misses.
    /// An expired entry is removed on the way out.
    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl_seconds`.
    ///
    /// Any previous entry for the key is replaced and its expiry reset.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_seconds: u64) {
        self.entries
            .insert(key.into(), CacheEntry::new(value, ttl_seconds));
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of entries, expired ones included until dropped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
