//! Cache configuration, entry and statistics models.

// Author: kelexine (https://github.com/kelexine)

use crate::models::ResponseEntity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Configuration for the response cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether responses are cached at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum number of entries kept before the least recently used is evicted.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Entry lifetime in seconds. `0` keeps entries until evicted.
    #[serde(default)]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    /// Provides default values for cache configuration.
    ///
    /// - `enabled`: true
    /// - `max_entries`: 1000
    /// - `ttl_seconds`: 0 (no expiry)
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_max_entries(),
            ttl_seconds: 0,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> usize {
    1000
}

/// A single cached response.
///
/// Responses are always stored with their status and headers, so one entry
/// answers both the body-only and the entity fetch for its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub entity: ResponseEntity<Value>,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(entity: ResponseEntity<Value>) -> Self {
        Self {
            entity,
            stored_at: Utc::now(),
        }
    }

    pub fn body(&self) -> &Value {
        &self.entity.body
    }

    /// Time since the entry was stored. Zero if the clock went backwards.
    pub fn age(&self) -> Duration {
        (Utc::now() - self.stored_at).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: u64,
    /// Number of lookups that went to the upstream client.
    pub misses: u64,
    /// Number of entries written after a miss.
    pub stores: u64,
    /// Number of entries removed on request.
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}
