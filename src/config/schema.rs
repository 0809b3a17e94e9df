//! Configuration schema definitions.
//!
//! Process-level settings for the proxy. Routes live in their own file and
//! are loaded by [`crate::config::loader`].

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default location of the route file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/htm/htm.conf";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Root configuration for the proxy process.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Path of the hostname → upstream route file.
    pub routes_path: PathBuf,

    /// Upstream timeouts.
    pub timeouts: TimeoutConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: SocketAddr,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        }
    }
}

/// Timeout configuration for upstream traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout; `None` waits indefinitely.
    pub connect: Option<Duration>,

    /// Time allowed for the upstream to send response headers.
    /// `None` disables the limit, so long-polling upstreams keep working.
    pub upstream: Option<Duration>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Some(Duration::from_secs(10)),
            upstream: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Emit JSON log lines instead of human-readable text.
    pub json_logs: bool,

    /// Prometheus scrape endpoint; metrics are not exported when unset.
    pub metrics_address: Option<SocketAddr>,
}

