//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! --port flag
//!     → listener.rs (bind, fail fast)
//!     → Hand off to HTTP layer (axum::serve)
//! ```
//!
//! # Design Decisions
//! - Plain TCP only; no TLS on the listener
//! - Bind failure is fatal at startup

pub mod listener;

pub use listener::{bind, ListenerError};
