//! Metrics collection and exposition.
//!
//! # Metrics
//! - `htm_requests_total` (counter): requests by outcome
//! - `htm_request_duration_seconds` (histogram): handling latency by outcome
//! - `htm_routes` (gauge): hostnames in the route table
//!
//! # Design Decisions
//! - Prometheus exporter is opt-in via `--metrics-address`
//! - Without an exporter the macros record into a no-op recorder

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// How a proxied request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Proxied,
    NoRoute,
    UpstreamError,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Proxied => "proxied",
            Outcome::NoRoute => "no_route",
            Outcome::UpstreamError => "upstream_error",
        }
    }
}

/// Install the Prometheus recorder and its scrape listener.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(outcome: Outcome, start: Instant) {
    let outcome = outcome.as_str();
    metrics::counter!("htm_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("htm_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn set_route_count(routes: usize) {
    metrics::gauge!("htm_routes").set(routes as f64);
}
