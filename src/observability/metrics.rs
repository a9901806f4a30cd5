//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dispatch_requests_total` (counter): dispatches by outcome
//! - `dispatch_duration_seconds` (histogram): handler latency by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one dispatch. `outcome` is `ok` or a `DispatchError` label.
pub fn record_dispatch(outcome: &'static str, start: Instant) {
    metrics::counter!("dispatch_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("dispatch_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
