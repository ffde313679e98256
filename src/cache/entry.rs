//! Cache Entry Module
//!
//! Defines a single cached value together with its expiry instant.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A cached value and the moment it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry that expires `ttl_seconds` after now.
    pub fn new(value: V, ttl_seconds: u64) -> Self {
        Self {
            value,
            expires_at: current_timestamp_ms().saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the expiration time,
    /// so a zero TTL produces an entry that is never served.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
