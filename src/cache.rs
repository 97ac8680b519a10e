//! Bounded, time-expiring in-memory cache for place lookups.
//!
//! Keys are exact query signatures; two equivalent queries that differ in
//! capitalization or parameter order are distinct entries. Nothing survives
//! a process restart.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use crate::config::CacheConfig;
use crate::models::Poi;

struct StoredEntry<T> {
    value: T,
    expires_at: Instant,
    last_used: Instant,
}

/// Capacity-bounded key/value store with per-entry time-to-live.
///
/// When the capacity is exceeded the least-recently-used entry is evicted;
/// independently, an entry that has outlived its TTL is reported as a miss
/// (and dropped) even if capacity pressure never reached it.
pub struct TtlCache<T> {
    entries: Mutex<HashMap<String, StoredEntry<T>>>,
    capacity: usize,
}

impl<T: Clone> TtlCache<T> {
    /// Create a cache holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Stores a value under `key` with a time-to-live (TTL).
    pub fn put(&self, key: &str, value: T, ttl: Duration) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        if !entries.contains_key(key) && entries.len() >= self.capacity {
            evict_lru(&mut entries);
        }

        entries.insert(
            key.to_string(),
            StoredEntry {
                value,
                expires_at: now + ttl,
                last_used: now,
            },
        );
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        if let Some(entry) = entries.get_mut(key) {
            if now < entry.expires_at {
                debug!(key, "cache entry found and still fresh");
                entry.last_used = now;
                return Some(entry.value.clone());
            }
        } else {
            return None;
        }

        // Present but past its TTL: treat as a miss.
        debug!(key, "cache entry found but expired");
        entries.remove(key);
        None
    }

    /// Manually removes a key from the cache.
    pub fn remove(&self, key: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn evict_lru<T>(entries: &mut HashMap<String, StoredEntry<T>>) {
    let oldest = entries
        .iter()
        .min_by_key(|(_, entry)| entry.last_used)
        .map(|(key, _)| key.clone());
    if let Some(key) = oldest {
        debug!(key = %key, "evicting least-recently-used cache entry");
        entries.remove(&key);
    }
}

/// The two independently keyed caches backing the places gateway.
///
/// Owned by whoever constructs the gateway and injected at construction,
/// so tests get isolated caches instead of process-wide shared state.
pub struct PoiCache {
    /// Text-search results keyed by query signature
    pub searches: TtlCache<Vec<Poi>>,
    /// Place-detail blobs keyed by place id
    pub details: TtlCache<Value>,
    ttl: Duration,
}

impl PoiCache {
    /// Create both caches from the cache configuration section.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            searches: TtlCache::new(config.max_entries),
            details: TtlCache::new(config.max_entries),
            ttl: Duration::from_secs(config.ttl_seconds),
        }
    }

    /// Time-to-live applied to every entry written by the gateway.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_put_then_get() {
        let cache: TtlCache<u32> = TtlCache::new(10);
        cache.put("a", 1, Duration::from_secs(60));
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache: TtlCache<u32> = TtlCache::new(10);
        cache.put("a", 1, Duration::from_millis(5));
        thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get("a"), None);
        // The expired entry is dropped on lookup.
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_eviction_at_capacity() {
        let cache: TtlCache<u32> = TtlCache::new(2);
        cache.put("a", 1, Duration::from_secs(60));
        thread::sleep(Duration::from_millis(2));
        cache.put("b", 2, Duration::from_secs(60));
        thread::sleep(Duration::from_millis(2));

        // Touch "a" so "b" becomes the least recently used.
        assert_eq!(cache.get("a"), Some(1));
        thread::sleep(Duration::from_millis(2));

        cache.put("c", 3, Duration::from_secs(60));
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("c"), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let cache: TtlCache<u32> = TtlCache::new(2);
        cache.put("a", 1, Duration::from_secs(60));
        cache.put("b", 2, Duration::from_secs(60));
        cache.put("a", 9, Duration::from_secs(60));
        assert_eq!(cache.get("a"), Some(9));
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_remove() {
        let cache: TtlCache<u32> = TtlCache::new(2);
        cache.put("a", 1, Duration::from_secs(60));
        cache.remove("a");
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_poi_cache_from_config() {
        let cache = PoiCache::new(&CacheConfig::default());
        assert_eq!(cache.ttl(), Duration::from_secs(3600));
        assert!(cache.searches.is_empty());
        assert!(cache.details.is_empty());
    }
}
