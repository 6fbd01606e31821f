//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, matched route, and status
//! - HTTP request latency histograms
//! - Shopping list exports and the number of consolidated lines
//! - Relation toggles by kind and action

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "foodgram";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Shopping list downloads
pub static SHOPPING_LIST_EXPORTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "shopping_list_exports_total",
            "Number of generated shopping list documents",
        )
        .namespace(NAMESPACE),
    )
    .expect("Failed to create SHOPPING_LIST_EXPORTS_TOTAL metric")
});

/// Distribution of consolidated lines per exported shopping list
pub static SHOPPING_LIST_LINES: Lazy<Histogram> = Lazy::new(|| {
    let buckets = vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0];
    Histogram::with_opts(
        HistogramOpts::new(
            "shopping_list_lines",
            "Consolidated lines per exported shopping list",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
    )
    .expect("Failed to create SHOPPING_LIST_LINES metric")
});

/// Favorite / cart / subscription changes
pub static RELATION_CHANGES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("relation_changes_total", "Relation additions and removals")
            .namespace(NAMESPACE),
        &["kind", "action"], // action: "add", "remove"
    )
    .expect("Failed to create RELATION_CHANGES_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(SHOPPING_LIST_EXPORTS_TOTAL.clone()))
        .expect("Failed to register SHOPPING_LIST_EXPORTS_TOTAL");
    registry
        .register(Box::new(SHOPPING_LIST_LINES.clone()))
        .expect("Failed to register SHOPPING_LIST_LINES");
    registry
        .register(Box::new(RELATION_CHANGES_TOTAL.clone()))
        .expect("Failed to register RELATION_CHANGES_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
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

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to record a generated shopping list
pub fn record_shopping_list_export(lines: usize) {
    SHOPPING_LIST_EXPORTS_TOTAL.inc();
    SHOPPING_LIST_LINES.observe(lines as f64);
}

/// Helper to record a relation change
pub fn record_relation_change(kind: &str, action: &str) {
    RELATION_CHANGES_TOTAL
        .with_label_values(&[kind, action])
        .inc();
}
