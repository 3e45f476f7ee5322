//! Read-through caching gateway.
//!
//! [`CachingRestClient`] wraps any [`RestOperations`] implementation and
//! answers repeated GETs from a [`CacheStore`]. It implements
//! `RestOperations` itself, so it is dropped in wherever the plain client
//! would be used:
//!
//! ```rust,ignore
//! let client = HttpRestClient::new(&config.client)?;
//! let store = MemoryStore::from_config(&config.cache);
//! let gateway = CachingRestClient::new(client, store).with_policy(policy.clone());
//!
//! let sample: Sample = gateway.get_for_object("samples/S1").await?;
//! ```
//!
//! A miss always fetches the full response entity from the wrapped client
//! and stores it, so one entry answers both fetch forms. Failed fetches are
//! returned unchanged and nothing is stored. When the
//! [`AccessPolicy`] is auditing, every miss is checked against it before the
//! result is stored.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::audit::AccessPolicy;
use crate::cache::{build_key, CacheEntry, CacheKey, CacheStats, CacheStore};
use crate::client::RestOperations;
use crate::error::{GatewayError, Result};
use crate::metrics;
use crate::models::{Resource, ResourceKind, ResponseEntity};
use crate::utils::logging::sanitize_uri;
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, Level};

/// Caching decorator around a REST client.
pub struct CachingRestClient<C, S> {
    inner: C,
    store: S,
    policy: Arc<AccessPolicy>,
    stats: Mutex<CacheStats>,
}

impl<C: RestOperations, S: CacheStore> CachingRestClient<C, S> {
    /// Wrap `inner`, caching into `store`. Auditing starts disabled.
    pub fn new(inner: C, store: S) -> Self {
        Self {
            inner,
            store,
            policy: Arc::new(AccessPolicy::new()),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// Use a shared access policy, typically owned by a test harness.
    pub fn with_policy(mut self, policy: Arc<AccessPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &Arc<AccessPolicy> {
        &self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }

    /// Whether a GET of `uri` would currently be answered from the cache.
    pub fn is_cached(&self, uri: &str) -> bool {
        self.store.get(build_key(&Method::GET, uri).as_str()).is_some()
    }

    /// Drop the cached response for `uri`. Returns whether one was present.
    pub fn evict(&self, uri: &str) -> bool {
        let key = build_key(&Method::GET, uri);
        let removed = self.store.remove(key.as_str()).is_some();
        if removed {
            debug!("Evicted {}", sanitize_uri(key.as_str()));
            self.stats.lock().evictions += 1;
            metrics::record_cache_evict();
            metrics::update_cache_entries(self.store.len());
        }
        removed
    }

    /// Drop every cached response.
    pub fn clear(&self) {
        self.store.clear();
        metrics::update_cache_entries(0);
        debug!("Cache cleared");
    }

    /// Keys held by the store, if the store can list them.
    pub fn cached_keys(&self) -> Option<Vec<String>> {
        self.store.keys()
    }

    /// Write the cache contents to the debug log.
    pub fn list_cache(&self) {
        if !tracing::enabled!(Level::DEBUG) {
            return;
        }
        match self.store.keys() {
            Some(keys) => {
                debug!("Cache dump ({} entries)", keys.len());
                for key in keys {
                    debug!("  {}", sanitize_uri(&key));
                }
            }
            None => debug!("Cache store cannot list its contents"),
        }
    }

    fn record_hit(&self, key: &CacheKey) {
        debug!("Cache hit: {}", sanitize_uri(key.as_str()));
        self.stats.lock().hits += 1;
        metrics::record_cache_hit();
    }

    fn record_miss(&self, key: &CacheKey) {
        debug!("Cache miss: {}", sanitize_uri(key.as_str()));
        self.stats.lock().misses += 1;
        metrics::record_cache_miss();
    }

    fn store_entry(&self, key: &CacheKey, entry: CacheEntry) {
        self.store.put(key.as_str(), entry);
        self.stats.lock().stores += 1;
        metrics::record_cache_store();
        metrics::update_cache_entries(self.store.len());
    }

    /// Check an uncached fetch against the access policy.
    fn audit(&self, key: &CacheKey, kind: ResourceKind) -> Result<()> {
        let verdict = self.policy.check(key.uri(), kind);
        if verdict.is_err() {
            self.list_cache();
        }
        verdict
    }

    /// Look up a cached response and decode its body as `T`.
    ///
    /// A body that does not decode is reported as an error, never refetched.
    fn cached<T: Resource>(&self, key: &CacheKey) -> Result<Option<ResponseEntity<T>>> {
        let Some(entry) = self.store.get(key.as_str()) else {
            return Ok(None);
        };
        let body = serde_json::from_value(entry.entity.body).map_err(|e| {
            debug!(
                "Cached body for {} does not decode as requested type: {}",
                sanitize_uri(key.as_str()),
                e
            );
            GatewayError::Json(e)
        })?;
        Ok(Some(ResponseEntity {
            status: entry.entity.status,
            headers: entry.entity.headers,
            body,
        }))
    }

    /// Shared path of both operations. Misses always fetch the full entity,
    /// so every stored entry can answer either operation.
    async fn read_through<T: Resource>(
        &self,
        uri: &str,
        operation: &'static str,
    ) -> Result<ResponseEntity<T>> {
        let key = build_key(&Method::GET, uri);

        if let Some(entity) = self.cached::<T>(&key)? {
            self.record_hit(&key);
            return Ok(entity);
        }
        self.record_miss(&key);

        let started = Instant::now();
        let fetched = self.inner.get_for_entity::<T>(uri).await;
        metrics::record_upstream_fetch(operation, fetched.is_ok(), started.elapsed().as_secs_f64());
        let entity = fetched?;

        self.audit(&key, entity.body.kind())?;
        let stored = ResponseEntity {
            status: entity.status,
            headers: entity.headers.clone(),
            body: serde_json::to_value(&entity.body)?,
        };
        self.store_entry(&key, CacheEntry::new(stored));
        Ok(entity)
    }
}

#[async_trait]
impl<C: RestOperations, S: CacheStore> RestOperations for CachingRestClient<C, S> {
    async fn get_for_object<T: Resource>(&self, uri: &str) -> Result<T> {
        Ok(self.read_through::<T>(uri, "object").await?.body)
    }

    async fn get_for_entity<T: Resource>(&self, uri: &str) -> Result<ResponseEntity<T>> {
        self.read_through(uri, "entity").await
    }
}
