//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the route table
//! - Initialize metrics when configured
//! - Bind the listener and begin accepting traffic
//! - Hold the server until a shutdown signal arrives
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

use crate::config::{load_routes, ConfigError, ProxyConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net::{self, ListenerError};
use crate::observability::metrics;

/// Fatal errors that stop the proxy from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not read config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("could not build upstream TLS client: {0}")]
    Tls(#[from] rustls::Error),

    #[error("could not start metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the proxy with `config` until Ctrl-C or SIGTERM.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    let table = Arc::new(load_routes(&config.routes_path)?);

    if let Some(addr) = config.observability.metrics_address {
        metrics::init_metrics(addr)?;
    }
    metrics::set_route_count(table.len());

    let server = HttpServer::new(&config, table)?;
    let listener = net::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        trigger.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
