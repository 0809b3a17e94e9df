//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, trace layer, proxy handler)
//!     → routing (hostname → upstream, or 502)
//!     → request.rs (rewrite target, adjust headers)
//!     → client.rs (forward to upstream, stream bodies)
//!     → response.rs (strip hop-by-hop, relay)
//!     → Send to client
//! ```

pub mod client;
pub mod request;
pub mod response;
pub mod server;

pub use client::{Forward, ForwardError, HyperForwarder};
pub use server::HttpServer;
