//! Cache Module
//!
//! Provides process-lifetime in-memory caching with per-entry TTL.

mod entry;
mod stats;
mod store;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Key under which the fetched release page is cached
pub const RELEASES_CACHE_KEY: &str = "releases";

/// Default lifetime of the cached release page in seconds (3 minutes)
pub const DEFAULT_CACHE_TTL: u64 = 60 * 3;
