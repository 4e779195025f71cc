//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by method, status, route
//! - `relay_request_duration_seconds` (histogram): latency distribution
//! - `relay_backend_failures_total` (counter): failures by kind
//!
//! Recording is a no-op until an exporter is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, route: &'static str, start: Instant) {
    ::metrics::counter!(
        "relay_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route
    )
    .increment(1);

    ::metrics::histogram!(
        "relay_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a request that could not be relayed normally.
pub fn record_failure(kind: &'static str) {
    ::metrics::counter!("relay_backend_failures_total", "kind" => kind).increment(1);
}
