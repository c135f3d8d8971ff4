//! Metrics collection and exposition.
//!
//! # Metrics
//! - `zone_transitions_total` (counter): recorded zone changes, by zone
//! - `zone_resets_total` (counter): explicit resets
//! - `zone_level_updates_total` (counter): accepted level updates
//! - `http_requests_total` (counter): requests by method, status
//! - `http_request_duration_seconds` (histogram): latency by method
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder, so the zone core can call these unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::zones::Zone;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_transition(zone: Zone) {
    metrics::counter!("zone_transitions_total", "zone" => zone.as_str()).increment(1);
}

pub fn record_reset() {
    metrics::counter!("zone_resets_total").increment(1);
}

pub fn record_level_update() {
    metrics::counter!("zone_level_updates_total").increment(1);
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Axum middleware feeding [`record_request`].
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start);
    response
}
