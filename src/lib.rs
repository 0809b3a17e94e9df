//! Name-based HTTP reverse proxy.
//!
//! Requests are routed to an upstream by the hostname they address, using a
//! hostname-suffix → upstream table loaded once at startup.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod security;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::RouteTable;
