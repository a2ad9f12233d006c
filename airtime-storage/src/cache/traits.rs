//! Cache store trait and usage statistics.

use std::time::Duration;

/// Key-value store with per-entry absolute expiration.
///
/// Implementations must support concurrent `get`/`set` from multiple
/// request threads without caller-side locking, and must never block on
/// I/O. There are no partial-write states: a reader sees either the prior
/// value or the new one, never something in between.
pub trait CacheStore<V: Clone + Send + Sync>: Send + Sync {
    /// Return the cached value for `key` if present and not expired.
    /// Expired entries behave as absent.
    fn get(&self, key: &str) -> Option<V>;

    /// Store `value` under `key`, replacing any prior entry, with
    /// expiration `now + ttl`.
    fn set(&self, key: &str, value: V, ttl: Duration);

    /// Snapshot of usage counters.
    fn stats(&self) -> CacheStats;
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses (including expired-entry reads).
    pub misses: u64,
    /// Number of entries evicted after expiring.
    pub evictions: u64,
    /// Number of entries currently in the cache.
    pub entry_count: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
