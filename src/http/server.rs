//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with the proxy handler
//! - Wire up middleware (tracing)
//! - Bind server to listener with graceful shutdown
//! - Dispatch requests to the routing engine
//! - Forward requests to the matched upstream

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::client::{Forward, HyperForwarder};
use crate::http::response::bad_gateway;
use crate::lifecycle::shutdown;
use crate::observability::metrics::{self, Outcome};
use crate::routing::{RouteMatch, RouteTable, Router as ProxyRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: ProxyRouter,
    pub forwarder: Arc<dyn Forward>,
}

/// HTTP server for the reverse proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server forwarding over the hyper client.
    pub fn new(config: &ProxyConfig, table: Arc<RouteTable>) -> Result<Self, rustls::Error> {
        let forwarder = HyperForwarder::new(config.timeouts.clone())?;
        Ok(Self::with_forwarder(table, Arc::new(forwarder)))
    }

    /// Create a server with a custom forwarding transport.
    pub fn with_forwarder(table: Arc<RouteTable>, forwarder: Arc<dyn Forward>) -> Self {
        let state = AppState {
            router: ProxyRouter::new(table),
            forwarder,
        };
        Self {
            router: Self::build_router(state),
        }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// The axum router, for driving the proxy without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve connections from `listener` until `shutdown_rx` fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "htm server started");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
/// Resolves the upstream from the hostname and forwards the request.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();

    let (hostname, upstream) = match state.router.match_request(&request) {
        RouteMatch::Matched {
            hostname, upstream, ..
        } => (hostname, upstream),
        RouteMatch::NoMatch { hostname } => {
            tracing::warn!(hostname = %hostname, "Failed to proxy request: no matching route");
            metrics::record_request(Outcome::NoRoute, start);
            return bad_gateway();
        }
    };

    tracing::info!(
        hostname = %hostname,
        upstream = %upstream,
        method = %request.method(),
        path = %request.uri().path(),
        "Proxying request"
    );

    match state.forwarder.forward(request, &upstream).await {
        Ok(response) => {
            metrics::record_request(Outcome::Proxied, start);
            response
        }
        Err(e) => {
            tracing::error!(
                hostname = %hostname,
                upstream = %upstream,
                error = %e,
                "Upstream error"
            );
            metrics::record_request(Outcome::UpstreamError, start);
            bad_gateway()
        }
    }
}
