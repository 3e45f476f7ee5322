// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, HistogramVec, GaugeVec, IntCounter, Opts, Registry, TextEncoder, Encoder,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_gauge_vec_with_registry, register_int_counter_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // CACHE METRICS
    // ============================================================================

    /// Cache operations
    pub static ref CACHE_OPERATIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("cache_operations_total", "Total cache operations"),
        &["operation"], // operation: hit, miss, store, evict
        REGISTRY
    ).unwrap();

    /// Current cache entries
    pub static ref CACHE_ENTRIES: GaugeVec = register_gauge_vec_with_registry!(
        Opts::new("cache_entries_current", "Current number of cache entries"),
        &["type"], // type: active
        REGISTRY
    ).unwrap();

    // ============================================================================
    // UPSTREAM METRICS
    // ============================================================================

    /// Fetches that reached the upstream client
    pub static ref UPSTREAM_FETCHES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("upstream_fetches_total", "Total fetches sent to the upstream API"),
        &["operation", "outcome"], // operation: object, entity; outcome: success, error
        REGISTRY
    ).unwrap();

    /// Upstream fetch duration
    pub static ref UPSTREAM_FETCH_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("upstream_fetch_duration_seconds", "Upstream fetch duration")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["operation"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // AUDIT METRICS
    // ============================================================================

    /// Fetches rejected by the access policy
    pub static ref AUDIT_VIOLATIONS: IntCounter = register_int_counter_with_registry!(
        Opts::new("audit_violations_total", "Uncached fetches rejected in audit mode"),
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
