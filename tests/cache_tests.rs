// Cache store and configuration tests - public APIs only
// Author: kelexine (https://github.com/kelexine)

use cachegate::cache::{CacheConfig, CacheEntry, CacheStats};
use cachegate::{build_key, CacheStore, MemoryStore, ResponseEntity};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_cache_stats_initialization() {
    let stats = CacheStats::default();

    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.stores, 0);
    assert_eq!(stats.hit_ratio(), 0.0);
}

#[test]
fn test_hit_ratio() {
    let stats = CacheStats {
        hits: 3,
        misses: 1,
        ..CacheStats::default()
    };
    assert!((stats.hit_ratio() - 0.75).abs() < f64::EPSILON);
}

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();

    assert_eq!(config.max_entries, 1000);
    assert_eq!(config.ttl_seconds, 0);
    assert!(config.enabled); // Should be enabled by default
}

#[test]
fn test_store_indexes_on_canonical_key() {
    let store = MemoryStore::new(10, None);
    let key = build_key(&Method::GET, "https://lims.example.org/api/v2/samples/S1");
    store.put(
        key.as_str(),
        CacheEntry::new(ResponseEntity::new(200, json!({"name": "S1"}))),
    );

    assert!(store.get("GET https://lims.example.org/api/v2/samples/S1").is_some());
    assert!(store.get("https://lims.example.org/api/v2/samples/S1").is_none());
}

#[test]
fn test_entry_keeps_response_metadata() {
    let entry = CacheEntry::new(
        ResponseEntity::new(200, json!({"name": "S1"})).with_header("ETag", "\"1\""),
    );

    assert_eq!(entry.entity.status, 200);
    assert_eq!(entry.entity.header("etag"), Some("\"1\""));
    assert_eq!(entry.body(), &json!({"name": "S1"}));
    assert!(entry.age() < std::time::Duration::from_secs(5));
}

#[test]
fn test_shared_store_across_threads() {
    let store = Arc::new(MemoryStore::new(256, None));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..50 {
                    let key = format!("GET /api/{}/{}", t, i);
                    store.put(&key, CacheEntry::new(ResponseEntity::new(200, json!(i))));
                    assert!(store.get(&key).is_some());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.len(), 200);
}
