// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    AUDIT_VIOLATIONS,
    CACHE_ENTRIES,
    CACHE_OPERATIONS,
    UPSTREAM_FETCHES,
    UPSTREAM_FETCH_DURATION,
};

/// Helper to record cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_store() {
    CACHE_OPERATIONS.with_label_values(&["store"]).inc();
}

pub fn record_cache_evict() {
    CACHE_OPERATIONS.with_label_values(&["evict"]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.with_label_values(&["active"]).set(count as f64);
}

/// Helper to record a fetch that went past the cache
pub fn record_upstream_fetch(operation: &str, success: bool, duration_secs: f64) {
    let outcome = if success { "success" } else { "error" };
    UPSTREAM_FETCHES
        .with_label_values(&[operation, outcome])
        .inc();

    UPSTREAM_FETCH_DURATION
        .with_label_values(&[operation])
        .observe(duration_secs);
}

pub fn record_audit_violation() {
    AUDIT_VIOLATIONS.inc();
}
