//! Upstream forwarding.
//!
//! # Responsibilities
//! - Define the [`Forward`] capability the proxy handler depends on
//! - Send rewritten requests to upstreams over HTTP or HTTPS
//! - Map every transport failure to a [`ForwardError`]
//!
//! # Design Decisions
//! - Request and response bodies are streamed, never collected
//! - Dropping the returned future aborts the upstream exchange
//! - Only `http` and `https` upstreams are supported

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::{BoxFuture, FutureExt};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use thiserror::Error;
use url::Url;

use crate::config::TimeoutConfig;
use crate::http::request::outbound_request;
use crate::http::response::relay;
use crate::resilience::{with_deadline, TimedOut};

/// Errors that can occur while forwarding a request.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid upstream url {0}")]
    InvalidUpstream(String),

    #[error("unsupported upstream scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("upstream {0}")]
    Timeout(#[from] TimedOut),
}

/// Sends a request to an upstream and yields its response.
pub trait Forward: Send + Sync {
    fn forward(
        &self,
        request: Request<Body>,
        upstream: &Url,
    ) -> BoxFuture<'static, Result<Response<Body>, ForwardError>>;
}

/// Single-host reverse proxy transport built on the hyper-util client.
#[derive(Clone)]
pub struct HyperForwarder {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    timeouts: TimeoutConfig,
}

impl HyperForwarder {
    pub fn new(timeouts: TimeoutConfig) -> Result<Self, rustls::Error> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_nodelay(true);
        http.set_connect_timeout(timeouts.connect);

        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
            .https_or_http()
            .enable_http1()
            .wrap_connector(http);

        let client = Client::builder(TokioExecutor::new()).build(https);

        Ok(Self { client, timeouts })
    }
}

impl Forward for HyperForwarder {
    fn forward(
        &self,
        request: Request<Body>,
        upstream: &Url,
    ) -> BoxFuture<'static, Result<Response<Body>, ForwardError>> {
        let outbound = match upstream.scheme() {
            "http" | "https" => outbound_request(request, upstream),
            other => Err(ForwardError::UnsupportedScheme(other.to_string())),
        };
        let client = self.client.clone();
        let deadline = self.timeouts.upstream;

        async move {
            let response = with_deadline(deadline, client.request(outbound?)).await??;
            Ok::<_, ForwardError>(relay(response.map(Body::new)))
        }
        .boxed()
    }
}
