//! Metrics collection and exposition.
//!
//! # Metrics
//! - `georouter_requests_total` (counter): requests by method, status, outcome
//! - `georouter_request_duration_seconds` (histogram): latency distribution
//! - `georouter_lookups_total` (counter): country lookups by outcome
//! - `georouter_redirects_total` (counter): redirects issued, by country
//!
//! # Design Decisions
//! - Prometheus exposition on a dedicated address, separate from traffic
//! - Exporter install failure is logged, never fatal

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, outcome: &str, start: Instant) {
    counter!(
        "georouter_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    histogram!("georouter_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one country lookup by outcome ("resolved" or "unknown").
pub fn record_lookup(outcome: &str) {
    counter!("georouter_lookups_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record one redirect issued for a country.
pub fn record_redirect(country: &str) {
    counter!("georouter_redirects_total", "country" => country.to_string()).increment(1);
}
