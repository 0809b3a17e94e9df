//! Response handling and transformation.
//!
//! # Responsibilities
//! - Relay upstream responses to the client
//! - Strip hop-by-hop headers
//! - Render gateway errors
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - Every routing or upstream failure is a 502 Bad Gateway

use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;

use crate::security::strip_hop_by_hop;

/// Prepare an upstream response for the client; status and body pass through.
pub fn relay(response: Response<Body>) -> Response<Body> {
    let (mut parts, body) = response.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    Response::from_parts(parts, body)
}

pub fn bad_gateway() -> Response<Body> {
    (StatusCode::BAD_GATEWAY, "Bad Gateway\n").into_response()
}
