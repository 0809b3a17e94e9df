//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → connect timeout (set on the client connector)
//!     → timeouts.rs (optional deadline for response headers)
//!     → On failure: 502 Bad Gateway to the caller
//! ```
//!
//! # Design Decisions
//! - No retries: requests are streamed and cannot be replayed
//! - Upstream failures stay contained to the request that hit them

pub mod timeouts;

pub use timeouts::{with_deadline, TimedOut};
