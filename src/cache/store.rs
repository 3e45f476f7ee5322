// Cache stores - where read-through responses live
// Author: kelexine (https://github.com/kelexine)

use crate::cache::models::{CacheConfig, CacheEntry};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A string-keyed response store with its own eviction policy.
///
/// Implementations must tolerate concurrent calls from many requests.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<CacheEntry>;

    fn put(&self, key: &str, entry: CacheEntry);

    fn remove(&self, key: &str) -> Option<CacheEntry>;

    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys currently held, for stores that can list their contents.
    fn keys(&self) -> Option<Vec<String>> {
        None
    }
}

impl<S: CacheStore + ?Sized> CacheStore for Arc<S> {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        (**self).get(key)
    }

    fn put(&self, key: &str, entry: CacheEntry) {
        (**self).put(key, entry)
    }

    fn remove(&self, key: &str) -> Option<CacheEntry> {
        (**self).remove(key)
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn keys(&self) -> Option<Vec<String>> {
        (**self).keys()
    }
}

/// In-memory LRU store with optional per-entry time-to-live.
pub struct MemoryStore {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Option<Duration>,
}

impl MemoryStore {
    /// Create a store holding at most `max_entries` (minimum 1).
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        let capacity = NonZeroUsize::new(max_entries.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        let ttl = (config.ttl_seconds > 0).then(|| Duration::from_secs(config.ttl_seconds));
        Self::new(config.max_entries, ttl)
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        self.ttl.map(|ttl| entry.age() > ttl).unwrap_or(false)
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        let mut entries = self.entries.lock();
        let expired = entries.peek(key).map(|entry| self.is_expired(entry))?;
        if expired {
            debug!("Cache entry expired: {}", key);
            entries.pop(key);
            return None;
        }
        entries.get(key).cloned()
    }

    fn put(&self, key: &str, entry: CacheEntry) {
        if let Some((evicted, _)) = self.entries.lock().push(key.to_string(), entry) {
            if evicted != key {
                debug!("Evicted least recently used entry: {}", evicted);
            }
        }
    }

    fn remove(&self, key: &str) -> Option<CacheEntry> {
        self.entries.lock().pop(key)
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn keys(&self) -> Option<Vec<String>> {
        Some(self.entries.lock().iter().map(|(k, _)| k.clone()).collect())
    }
}

/// A store that never keeps anything. Every lookup is a miss.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl CacheStore for NoopStore {
    fn get(&self, _key: &str) -> Option<CacheEntry> {
        None
    }

    fn put(&self, _key: &str, _entry: CacheEntry) {}

    fn remove(&self, _key: &str) -> Option<CacheEntry> {
        None
    }

    fn clear(&self) {}

    fn len(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponseEntity;
    use serde_json::{json, Value};

    fn entry(body: Value) -> CacheEntry {
        CacheEntry::new(ResponseEntity::new(200, body))
    }

    #[test]
    fn test_put_then_get() {
        let store = MemoryStore::new(4, None);
        store.put("GET /a", entry(json!({"id": "a"})));

        let entry = store.get("GET /a").unwrap();
        assert_eq!(entry.body(), &json!({"id": "a"}));
        assert!(store.get("GET /b").is_none());
    }

    #[test]
    fn test_lru_eviction() {
        let store = MemoryStore::new(2, None);
        store.put("a", entry(json!(1)));
        store.put("b", entry(json!(2)));
        // Touch "a" so "b" becomes least recently used
        assert!(store.get("a").is_some());
        store.put("c", entry(json!(3)));

        assert_eq!(store.len(), 2);
        assert!(store.get("b").is_none());
        assert!(store.get("a").is_some());
        assert!(store.get("c").is_some());
    }

    #[test]
    fn test_ttl_expiry() {
        let store = MemoryStore::new(4, Some(Duration::from_millis(20)));
        store.put("a", entry(json!(1)));
        assert!(store.get("a").is_some());

        std::thread::sleep(Duration::from_millis(40));
        assert!(store.get("a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_ttl_counts_from_stored_at() {
        let store = MemoryStore::new(4, Some(Duration::from_secs(60)));
        let mut stale = entry(json!(1));
        stale.stored_at = chrono::Utc::now() - chrono::Duration::seconds(120);
        store.put("stale", stale);
        store.put("fresh", entry(json!(2)));

        assert!(store.get("stale").is_none());
        assert!(store.get("fresh").is_some());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let store = MemoryStore::new(0, None);
        assert_eq!(store.capacity(), 1);
        store.put("a", entry(json!(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_keys_and_clear() {
        let store = MemoryStore::new(4, None);
        store.put("a", entry(json!(1)));
        store.put("b", entry(json!(2)));

        let mut keys = store.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);

        assert!(store.remove("a").is_some());
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_noop_store_never_keeps() {
        let store = NoopStore;
        store.put("a", entry(json!(1)));
        assert!(store.get("a").is_none());
        assert!(store.keys().is_none());
    }

    #[test]
    fn test_from_config() {
        let config = CacheConfig {
            enabled: true,
            max_entries: 7,
            ttl_seconds: 0,
        };
        let store = MemoryStore::from_config(&config);
        assert_eq!(store.capacity(), 7);
        assert!(store.ttl.is_none());
    }
}
