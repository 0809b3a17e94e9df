//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Hold the shared route table
//! - Resolve a request to its upstream
//! - Return matched upstream or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) suffix scan (acceptable for typical route counts)

use std::sync::Arc;

use axum::http::Request;
use url::Url;

use crate::routing::matcher::routing_hostname;
use crate::routing::table::RouteTable;

/// Outcome of routing a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Matched {
        hostname: String,
        suffix: String,
        upstream: Url,
    },
    NoMatch {
        hostname: String,
    },
}

impl RouteMatch {
    pub fn hostname(&self) -> &str {
        match self {
            RouteMatch::Matched { hostname, .. } | RouteMatch::NoMatch { hostname } => hostname,
        }
    }

    pub fn upstream(&self) -> Option<&Url> {
        match self {
            RouteMatch::Matched { upstream, .. } => Some(upstream),
            RouteMatch::NoMatch { .. } => None,
        }
    }
}

/// Request router over a frozen [`RouteTable`].
#[derive(Debug, Clone)]
pub struct Router {
    table: Arc<RouteTable>,
}

impl Router {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table }
    }


    /// Resolve the upstream for `req` from its hostname.
    pub fn match_request<B>(&self, req: &Request<B>) -> RouteMatch {
        self.match_hostname(routing_hostname(req))
    }

    pub fn match_hostname(&self, hostname: String) -> RouteMatch {
        match self.table.resolve(&hostname) {
            Some(route) => RouteMatch::Matched {
                suffix: route.suffix.to_string(),
                upstream: route.upstream.clone(),
                hostname,
            },
            None => RouteMatch::NoMatch { hostname },
        }
    }
}

impl From<RouteTable> for Router {
    fn from(table: RouteTable) -> Self {
        Self::new(Arc::new(table))
    }
}
