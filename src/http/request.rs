//! Request transformation for forwarding.
//!
//! # Responsibilities
//! - Rewrite the request target onto the upstream (scheme, authority, path)
//! - Send the virtual host that routing used in `Host`
//! - Apply hop-by-hop stripping and X-Forwarded-For
//!
//! # Design Decisions
//! - The body is moved, never read, so uploads stream through
//! - Outbound requests are HTTP/1.1 regardless of the inbound version

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, uri::PathAndQuery, HeaderValue, Request, Uri, Version};
use url::Url;

use crate::http::client::ForwardError;
use crate::security::{append_forwarded_for, strip_hop_by_hop};

/// Join two URL paths with exactly one `/` between them.
pub fn join_paths(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}

/// Combine the upstream's own query with the request query.
pub fn join_queries(base: Option<&str>, query: Option<&str>) -> Option<String> {
    match (base.filter(|q| !q.is_empty()), query.filter(|q| !q.is_empty())) {
        (Some(a), Some(b)) => Some(format!("{}&{}", a, b)),
        (Some(q), None) | (None, Some(q)) => Some(q.to_string()),
        (None, None) => None,
    }
}

/// Target URI for `original` on `upstream`.
///
/// The upstream path acts as a prefix for the request path.
pub fn upstream_uri(upstream: &Url, original: &Uri) -> Result<Uri, ForwardError> {
    let host = upstream
        .host_str()
        .ok_or_else(|| ForwardError::InvalidUpstream(upstream.to_string()))?;
    let authority = match upstream.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    let path = join_paths(upstream.path(), original.path());
    let path_and_query = match join_queries(upstream.query(), original.query()) {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    };
    let path_and_query = PathAndQuery::try_from(path_and_query.as_str())
        .map_err(|_| ForwardError::InvalidUpstream(upstream.to_string()))?;

    Uri::builder()
        .scheme(upstream.scheme())
        .authority(authority.as_str())
        .path_and_query(path_and_query)
        .build()
        .map_err(|_| ForwardError::InvalidUpstream(upstream.to_string()))
}

/// Build the request sent to `upstream` from the inbound request.
pub fn outbound_request(req: Request<Body>, upstream: &Url) -> Result<Request<Body>, ForwardError> {
    let client_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let (mut parts, body) = req.into_parts();

    // A request-target authority (absolute-form, HTTP/2) is what routing
    // used, so it replaces any Host header before the target is rewritten.
    if let Some(value) = parts
        .uri
        .authority()
        .map(|a| a.as_str().rsplit_once('@').map_or(a.as_str(), |(_, host)| host))
        .and_then(|host| HeaderValue::from_str(host).ok())
    {
        parts.headers.insert(header::HOST, value);
    }

    parts.uri = upstream_uri(upstream, &parts.uri)?;
    parts.version = Version::HTTP_11;

    strip_hop_by_hop(&mut parts.headers);
    if let Some(ip) = client_ip {
        append_forwarded_for(&mut parts.headers, ip);
    }

    Ok(Request::from_parts(parts, body))
}
