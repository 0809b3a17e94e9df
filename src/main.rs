//! htm: name-based HTTP reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │                     HTM                      │
//!                          │                                              │
//!     Client Request       │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!     ─────────────────────┼─▶│   net   │───▶│  http   │───▶│ routing  │  │
//!                          │  │listener │    │ server  │    │  suffix  │  │
//!                          │  └─────────┘    └─────────┘    │  table   │  │
//!                          │                                └────┬─────┘  │
//!                          │                                     │ 502 on │
//!                          │                                     ▼ miss   │
//!     Client Response      │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!     ◀────────────────────┼──│response │◀───│  http   │◀───│ request  │◀─┼── Upstream
//!                          │  │  relay  │    │ client  │    │ rewrite  │  │
//!                          │  └─────────┘    └─────────┘    └──────────┘  │
//!                          │                                              │
//!                          │  config · observability · lifecycle          │
//!                          └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use htm::config::{Cli, ProxyConfig};
use htm::lifecycle;
use htm::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ProxyConfig::from(Cli::parse());

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        config = %config.routes_path.display(),
        "htm v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = lifecycle::run(config).await {
        tracing::error!(error = %e, "Fatal error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
