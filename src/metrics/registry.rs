// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_int_counter_with_registry, CounterVec, Encoder, HistogramVec, IntCounter, Opts,
    Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // PROXY METRICS
    // ============================================================================

    /// Requests answered by the proxy route, by final status
    pub static ref PROXY_REQUESTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("proxy_requests_total", "Total proxied requests"),
        &["method", "status"],
        REGISTRY
    ).unwrap();

    /// Requests that ran out of their wall-clock budget
    pub static ref PROXY_TIMEOUTS: IntCounter = register_int_counter_with_registry!(
        Opts::new("proxy_timeouts_total", "Total proxied requests that timed out"),
        REGISTRY
    ).unwrap();

    /// Duration of individual upstream calls (forward, refresh and retry each count)
    pub static ref UPSTREAM_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("upstream_duration_seconds", "Upstream call duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["method"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // SESSION METRICS
    // ============================================================================

    /// Token refresh attempts
    pub static ref TOKEN_REFRESHES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("token_refreshes_total", "Total access token refreshes"),
        &["outcome"], // outcome: success, failure, shared
        REGISTRY
    ).unwrap();

    /// Logout requests, by what happened upstream
    pub static ref LOGOUTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("logouts_total", "Total logout requests"),
        &["upstream"], // upstream: notified, failed, skipped
        REGISTRY
    ).unwrap();

    /// Login attempts through the gateway
    pub static ref LOGINS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("logins_total", "Total login attempts"),
        &["outcome"], // outcome: success, failure
        REGISTRY
    ).unwrap();
}

/// Gather all metrics in Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
