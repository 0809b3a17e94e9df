//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line
//!     → cli.rs (clap flags)
//!     → ProxyConfig (process settings, immutable)
//!
//! route file (whitespace-delimited lines)
//!     → loader.rs (parse lines, collect warnings)
//!     → RouteTable (validated, immutable)
//!     → shared via Arc with the request handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload
//! - Every process setting has a default
//! - Malformed route lines are skipped with a warning; only I/O is fatal

pub mod cli;
pub mod loader;
pub mod schema;

pub use cli::Cli;
pub use loader::{load_routes, parse_routes, ConfigError, ConfigWarning, LoadedRoutes};
pub use schema::{ListenerConfig, ObservabilityConfig, ProxyConfig, TimeoutConfig};
