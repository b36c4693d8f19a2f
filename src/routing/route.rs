//! Route descriptors and middleware sets.
//!
//! # Responsibilities
//! - Describe one exposed endpoint (method, version, path, handler, auth)
//! - Carry the ordered middleware chains applied around registered routes
//!
//! # Design Decisions
//! - Descriptors are wire-ish records with string verbs and paths; the
//!   registry performs semantic validation at build time, mirroring the
//!   serde-syntactic / semantic-pass split used for configuration
//! - Handlers and middleware are boxed tower services so the descriptor list
//!   is a plain, uniform value that can be assembled anywhere

use std::convert::Infallible;

use axum::extract::Request;
use axum::response::Response;
use tower::util::{BoxCloneSyncService, BoxCloneSyncServiceLayer};

/// Opaque transport-level handler, method-agnostic until registration.
pub type RouteHandler = BoxCloneSyncService<Request, Response, Infallible>;

/// A boxed middleware layer applicable to a router scope.
pub type Middleware =
    BoxCloneSyncServiceLayer<axum::routing::Route, Request, Response, Infallible>;

/// Declarative description of one endpoint.
///
/// Consumed once by [`crate::routing::registry::build`]; the built router
/// holds the handler, not the descriptor.
#[derive(Debug, Clone)]
pub struct Route {
    /// HTTP verb, e.g. `"GET"`. Must be non-empty.
    pub method: String,

    /// API version, used to build the `/v{version}/...` path prefix.
    pub version: u32,

    /// Resource path. One leading `/` is stripped during normalization.
    pub path: String,

    /// Transport handler, typically produced by [`crate::http::adapter::adapt`].
    /// `None` is a build-time configuration error.
    pub handler: Option<RouteHandler>,

    /// Whether the route is registered behind the auth middleware.
    pub requires_auth: bool,
}

impl Route {
    /// Path with at most one leading separator stripped.
    pub fn normalized_path(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }

    /// Full URL pattern the route is registered under.
    pub fn pattern(&self) -> String {
        format!("/v{}/{}", self.version, self.normalized_path())
    }
}

/// The ordered middleware chains applied around registered routes.
///
/// On the wire the order is `pre -> auth -> post -> handler`: `pre` runs on
/// every request, `auth` only for routes that require it, and `post` wraps
/// handlers innermost on both tiers. Within each list, index 0 is outermost.
#[derive(Debug, Default)]
pub struct MiddlewareSet {
    pub pre: Vec<Middleware>,
    /// Gate for authenticated routes. Required if any route sets
    /// `requires_auth`.
    pub auth: Option<Middleware>,
    pub post: Vec<Middleware>,
}
