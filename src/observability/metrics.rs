//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): forwarded requests by method, status
//! - `gateway_request_duration_seconds` (histogram): forwarding latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exposition endpoint.
///
/// Failure to start the exporter is logged but never fatal; the gateway
/// keeps serving without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(err) => tracing::error!(error = %err, "Failed to start metrics exporter"),
    }
}

/// Record one forwarded request (502s from connectivity failures included).
pub fn record_forward(method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();

    counter!(
        "gateway_requests_total",
        "method" => method.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "gateway_request_duration_seconds",
        "method" => method,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}
