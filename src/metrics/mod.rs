// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics, IMAGE_NORMALIZATIONS, PROVIDER_CALLS, PROVIDER_DURATION, REQUESTS_TOTAL,
    REQUEST_DURATION,
};

/// Helper to record inbound request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    let status = status_code.to_string();
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint, &status])
        .observe(duration_secs);
}

/// Helper to record Stability API call metrics
pub fn record_provider_call(endpoint: &str, outcome: &str, duration_secs: f64) {
    PROVIDER_CALLS.with_label_values(&[endpoint, outcome]).inc();

    PROVIDER_DURATION
        .with_label_values(&[endpoint])
        .observe(duration_secs);
}

pub fn record_normalization(outcome: &str) {
    IMAGE_NORMALIZATIONS.with_label_values(&[outcome]).inc();
}
