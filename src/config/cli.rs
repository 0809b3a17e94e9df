//! Command-line interface.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::schema::{
    ListenerConfig, ObservabilityConfig, ProxyConfig, TimeoutConfig, DEFAULT_CONFIG_PATH,
    DEFAULT_PORT,
};

#[derive(Debug, Parser)]
#[command(name = "htm")]
#[command(about = "Name-based HTTP reverse proxy", long_about = None)]
pub struct Cli {
    /// Port to serve on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Route configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Upstream connect timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub connect_timeout: u64,

    /// Upstream response header timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub upstream_timeout: Option<u64>,

    /// Serve Prometheus metrics on this address
    #[arg(long, value_name = "ADDR")]
    pub metrics_address: Option<SocketAddr>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl From<Cli> for ProxyConfig {
    fn from(cli: Cli) -> Self {
        Self {
            listener: ListenerConfig {
                bind_address: SocketAddr::from(([0, 0, 0, 0], cli.port)),
            },
            routes_path: cli.config,
            timeouts: TimeoutConfig {
                connect: Some(cli.connect_timeout)
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs),
                upstream: cli.upstream_timeout.map(Duration::from_secs),
            },
            observability: ObservabilityConfig {
                json_logs: cli.log_json,
                metrics_address: cli.metrics_address,
            },
        }
    }
}
