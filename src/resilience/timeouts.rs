//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream calls with an optional deadline
//! - Cancel the wrapped future cleanly when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out after {0:?}")]
pub struct TimedOut(pub Duration);

/// Await `fut`, giving up after `deadline` when one is set.
pub async fn with_deadline<F>(deadline: Option<Duration>, fut: F) -> Result<F::Output, TimedOut>
where
    F: Future,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| TimedOut(limit)),
        None => Ok(fut.await),
    }
}
