// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, LOGINS, LOGOUTS, PROXY_REQUESTS, PROXY_TIMEOUTS, TOKEN_REFRESHES,
    UPSTREAM_DURATION,
};

/// Helper to record the final outcome of a proxied request
pub fn record_proxy_request(method: &str, status_code: u16) {
    PROXY_REQUESTS
        .with_label_values(&[method, &status_code.to_string()])
        .inc();
}

pub fn record_proxy_timeout() {
    PROXY_TIMEOUTS.inc();
}

/// Helper to record one upstream round trip
pub fn record_upstream_call(method: &str, duration_secs: f64) {
    UPSTREAM_DURATION
        .with_label_values(&[method])
        .observe(duration_secs);
}

/// Outcome of a token refresh as seen by one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Success,
    Failure,
    /// Another request's refresh was reused
    Shared,
}

pub fn record_refresh(outcome: RefreshOutcome) {
    let label = match outcome {
        RefreshOutcome::Success => "success",
        RefreshOutcome::Failure => "failure",
        RefreshOutcome::Shared => "shared",
    };
    TOKEN_REFRESHES.with_label_values(&[label]).inc();
}

/// Helper to record what a logout did upstream: notified, failed or skipped
pub fn record_logout(upstream: &str) {
    LOGOUTS.with_label_values(&[upstream]).inc();
}

pub fn record_login(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    LOGINS.with_label_values(&[outcome]).inc();
}
