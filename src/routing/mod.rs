//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (authority / Host header)
//!     → matcher.rs (extract and normalize hostname)
//!     → router.rs (suffix lookup in the route table)
//!     → Return: Matched upstream or NoMatch
//!
//! Route Table (at startup):
//!     config file lines
//!     → config::loader (parse, warn, continue)
//!     → table.rs (frozen hostname-suffix → upstream map)
//! ```
//!
//! # Design Decisions
//! - Table built once at startup, immutable at runtime
//! - Plain string suffix comparison, not DNS-label aware
//! - Longest matching suffix wins, so lookups are deterministic
//! - Explicit NoMatch rather than silent default

pub mod matcher;
pub mod router;
pub mod table;

pub use router::{RouteMatch, Router};
pub use table::{Route, RouteTable};
