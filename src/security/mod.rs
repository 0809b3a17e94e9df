//! Header hygiene for proxied traffic.
//!
//! # Data Flow
//! ```text
//! Client request:
//!     → headers.rs (strip hop-by-hop, append X-Forwarded-For)
//!     → upstream
//!
//! Upstream response:
//!     → headers.rs (strip hop-by-hop)
//!     → client
//! ```

pub mod headers;

pub use headers::{append_forwarded_for, is_hop_by_hop, strip_hop_by_hop, X_FORWARDED_FOR};
