//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Choose text or JSON output
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the default filter
//! - JSON format for log shippers, text format for terminals

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

const DEFAULT_FILTER: &str = "htm=info,tower_http=warn";

/// Install the global subscriber. Call once, before any other subsystem.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let json = config
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json());
    let text = (!config.json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}
