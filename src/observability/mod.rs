//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup, routing and forwarding produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms, gauges)
//!
//! Consumers:
//!     → stdout (text or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (hostname, upstream, error)
//! - Metrics are cheap and become no-ops when no exporter is installed

pub mod logging;
pub mod metrics;
