//! Stock middleware and middleware boxing.
//!
//! # Responsibilities
//! - Provide the request logger and response content-type middleware most
//!   services want in their `pre` chain
//! - Box arbitrary tower layers into the uniform [`Middleware`] type

use std::convert::Infallible;

use axum::extract::Request;
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tower::{Layer, Service};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::routing::route::Middleware;

/// Box any compatible tower layer into a [`Middleware`].
pub fn boxed<L>(layer: L) -> Middleware
where
    L: Layer<axum::routing::Route> + Send + Sync + 'static,
    L::Service: Service<Request, Response = Response, Error = Infallible>
        + Clone
        + Send
        + Sync
        + 'static,
    <L::Service as Service<Request>>::Future: Send + 'static,
{
    Middleware::new(layer)
}

/// Logs method and path of every inbound request.
pub fn request_logger() -> Middleware {
    boxed(axum::middleware::from_fn(log_request))
}

async fn log_request(req: Request, next: Next) -> Response {
    tracing::debug!(method = %req.method(), path = %req.uri().path(), "http request received");
    next.run(req).await
}

/// Forces `Content-Type: application/json; charset=UTF-8` on responses.
pub fn json_content_type() -> Middleware {
    boxed(SetResponseHeaderLayer::overriding(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=UTF-8"),
    ))
}
