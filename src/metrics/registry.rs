// Prometheus metrics registry and collectors

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Total number of inbound requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of inbound requests"),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).expect("requests_total registers once");

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).expect("request_duration_seconds registers once");

    // ============================================================================
    // PROVIDER METRICS
    // ============================================================================

    /// Total Stability API calls, by outcome (HTTP status, `timeout`, `transport_error`)
    pub static ref PROVIDER_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("provider_calls_total", "Total Stability API calls"),
        &["endpoint", "outcome"],
        REGISTRY
    ).expect("provider_calls_total registers once");

    /// Stability API call duration
    pub static ref PROVIDER_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("provider_call_duration_seconds", "Stability API call duration")
            .buckets(vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 45.0, 60.0]),
        &["endpoint"],
        REGISTRY
    ).expect("provider_call_duration_seconds registers once");

    // ============================================================================
    // IMAGE METRICS
    // ============================================================================

    /// Upload normalizations, by outcome (`resized`, `unchanged`, `error`)
    pub static ref IMAGE_NORMALIZATIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("image_normalizations_total", "Total image normalizations"),
        &["outcome"],
        REGISTRY
    ).expect("image_normalizations_total registers once");
}

/// Gather all metrics and return as Prometheus text format
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
