//! Hostname-suffix to upstream mapping.

use std::collections::HashMap;

use url::Url;

use crate::routing::matcher::is_suffix_match;

/// A resolved table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route<'a> {
    /// The suffix that matched the request hostname.
    pub suffix: &'a str,
    /// Upstream base URL requests are forwarded to.
    pub upstream: &'a Url,
}

/// Mapping from hostname suffix to upstream base URL.
///
/// Keys are unique; inserting an existing key replaces its upstream. The
/// table is built once and then shared read-only between request handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: HashMap<String, Url>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `suffix`, returning the upstream it previously mapped to.
    pub fn insert(&mut self, suffix: impl Into<String>, upstream: Url) -> Option<Url> {
        self.routes.insert(suffix.into(), upstream)
    }

    /// Exact lookup by suffix key.
    pub fn get(&self, suffix: &str) -> Option<&Url> {
        self.routes.get(suffix)
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.routes.contains_key(suffix)
    }

    /// Find the route for a request hostname.
    ///
    /// Every suffix the hostname ends with is a candidate; the longest one
    /// wins. Two distinct keys of equal length cannot both be suffixes of the
    /// same hostname, so the result never depends on map iteration order.
    pub fn resolve(&self, hostname: &str) -> Option<Route<'_>> {
        self.routes
            .iter()
            .filter(|(suffix, _)| is_suffix_match(hostname, suffix))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(suffix, upstream)| Route {
                suffix: suffix.as_str(),
                upstream,
            })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl FromIterator<(String, Url)> for RouteTable {
    fn from_iter<I: IntoIterator<Item = (String, Url)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (suffix, upstream) in iter {
            table.insert(suffix, upstream);
        }
        table
    }
}
