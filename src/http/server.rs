//! Server composition and listener lifecycle.
//!
//! # Responsibilities
//! - Wrap the registry's router with CORS and request tracing
//! - Expose the composed router for in-process testing
//! - Bind the router to a listener
//!
//! # Design Decisions
//! - The router is an explicit value handed to the listener, not global
//!   registration state; tests drive it without a socket
//! - Construction completes (or fails) before the listener accepts

use axum::http::{header, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::routing::registry::{build, BuildError};
use crate::routing::route::{MiddlewareSet, Route};

/// A fully composed HTTP server, ready to bind.
pub struct Server {
    router: Router,
}

impl Server {
    /// Validate and register `routes`, then wrap the result with the
    /// cross-origin policy and request tracing.
    pub fn new(routes: Vec<Route>, middleware: MiddlewareSet) -> Result<Self, BuildError> {
        let router = build(routes, middleware)?
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer());
        Ok(Self { router })
    }

    /// The composed router, for in-process dispatch without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on an already-bound listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "http server listening");
        axum::serve(listener, self.router).await
    }

    /// Bind to the configured address and serve.
    pub async fn serve(self, config: &ServerConfig) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(config.addr()).await?;
        self.run(listener).await
    }
}

// TODO: make the CORS policy configurable; the permissive default is for
// development only.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::HEAD,
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
}
