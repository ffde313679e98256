//! Cache Statistics Module
//!
//! Tracks how often cached releases were served versus refetched.

use serde::Serialize;

// == Cache Stats ==
/// Hit and miss counters for a cache store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of reads served from a live entry
    pub hits: u64,
    /// Number of reads that found no entry or an expired one
    pub misses: u64,
    /// Current number of entries held (expired ones included until read)
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Update Entry Count ==
    /// Records how many entries the store currently holds.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
