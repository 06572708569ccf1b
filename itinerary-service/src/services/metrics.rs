//! Prometheus metrics for itinerary-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec, TextEncoder,
};

pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register http_requests_total")
});

pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path", "status"]
    )
    .expect("Failed to register http_request_duration_seconds")
});

/// Itinerary requests by outcome (`success` or an error kind).
pub static ITINERARY_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "itinerary_requests_total",
        "Total number of itinerary generation requests",
        &["outcome"]
    )
    .expect("Failed to register itinerary_requests_total")
});

/// Model call latency. Generation is slow, so the buckets reach minutes.
pub static GENERATION_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "generation_duration_seconds",
        "Time spent waiting on the generation provider",
        &["provider"],
        vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0, 120.0, 300.0]
    )
    .expect("Failed to register generation_duration_seconds")
});

/// Registers every collector so `/metrics` lists them before first use.
pub fn init_metrics() {
    Lazy::force(&HTTP_REQUESTS_TOTAL);
    Lazy::force(&HTTP_REQUEST_DURATION_SECONDS);
    Lazy::force(&ITINERARY_REQUESTS_TOTAL);
    Lazy::force(&GENERATION_DURATION_SECONDS);
}

pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path, status.as_str()])
        .observe(duration_secs);
}

pub fn record_itinerary_outcome(outcome: &str) {
    ITINERARY_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_generation(provider: &str, duration_secs: f64) {
    GENERATION_DURATION_SECONDS
        .with_label_values(&[provider])
        .observe(duration_secs);
}

/// Text exposition of the default registry.
pub fn get_metrics() -> Result<String, prometheus::Error> {
    TextEncoder::new().encode_to_string(&prometheus::gather())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_are_exposed() {
        init_metrics();
        record_itinerary_outcome("success");
        record_generation("mock", 0.25);

        let text = get_metrics().unwrap();
        assert!(text.contains("itinerary_requests_total"));
        assert!(text.contains("generation_duration_seconds"));
        assert!(text.contains("provider=\"mock\""));
    }

    #[test]
    fn http_requests_are_labelled() {
        init_metrics();
        record_http_request("GET", "/health", 200, 0.001);

        let text = get_metrics().unwrap();
        assert!(text.contains("path=\"/health\""));
    }
}
