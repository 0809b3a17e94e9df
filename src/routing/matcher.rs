//! Route matching logic.
//!
//! # Responsibilities
//! - Extract the routing hostname from a request
//! - Normalize it (drop port, lowercase)
//! - Compare against route-table suffixes
//!
//! # Design Decisions
//! - URI authority (absolute-form, HTTP/2) takes precedence over `Host`
//! - Host names are case-insensitive (RFC 9110)
//! - Suffix comparison is a plain `ends_with`

use axum::http::{header, Request};

/// Raw host the client addressed, as sent on the wire.
///
/// Prefers the request-target authority and falls back to the `Host` header.
pub fn request_host<B>(req: &Request<B>) -> Option<&str> {
    if let Some(authority) = req.uri().authority() {
        return Some(authority.as_str());
    }
    req.headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
}

/// Hostname used for routing: the request host without port, lowercased.
///
/// Requests without any host yield an empty string, which matches nothing.
pub fn routing_hostname<B>(req: &Request<B>) -> String {
    request_host(req).map(normalize_host).unwrap_or_default()
}

/// Strip an optional `:port` (and userinfo) and lowercase the name.
pub fn normalize_host(raw: &str) -> String {
    let raw = raw.rsplit_once('@').map_or(raw, |(_, host)| host).trim();

    let host = if raw.starts_with('[') {
        // IPv6 literal, keep the brackets.
        match raw.find(']') {
            Some(end) => &raw[..=end],
            None => raw,
        }
    } else {
        match raw.rsplit_once(':') {
            Some((host, port)) if port.bytes().all(|b| b.is_ascii_digit()) => host,
            _ => raw,
        }
    };

    normalize_name(host)
}

/// Canonical form of a bare host name: no trailing dot, lowercase.
///
/// Applied to request hosts and route-file hostnames alike so both sides of
/// the suffix comparison agree.
pub fn normalize_name(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// True when `hostname` ends with `suffix`.
pub fn is_suffix_match(hostname: &str, suffix: &str) -> bool {
    !suffix.is_empty() && hostname.ends_with(suffix)
}
