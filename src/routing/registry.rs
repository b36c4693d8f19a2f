//! Route table validation and router construction.
//!
//! # Responsibilities
//! - Validate a route table before anything is registered
//! - Partition routes into unauthenticated and authenticated scopes
//! - Bind each handler to its verb and compose the middleware chains
//!
//! # Design Decisions
//! - Validation fails fast, in a fixed order, and aborts the whole build;
//!   a partial router is never returned
//! - The router is frozen at build time and never mutated while serving
//! - Pattern matching itself is delegated to Axum; the registry only governs
//!   what gets registered and how handlers are shaped

use std::collections::HashSet;

use axum::http::Method;
use axum::routing::{on_service, MethodFilter};
use axum::Router;
use thiserror::Error;

use crate::routing::route::{Middleware, MiddlewareSet, Route, RouteHandler};

/// Configuration error raised while building the route table.
///
/// These are fatal at build time and never reach clients; serving has not
/// started when they occur.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no routes provided")]
    NoRoutes,

    #[error("route for path '{path}' has no HTTP method")]
    MissingMethod { path: String },

    #[error("{method} route has an empty path")]
    MissingPath { method: String },

    #[error("route {method} '{path}' has no handler")]
    MissingHandler { method: String, path: String },

    #[error("HTTP method '{method}' cannot be bound to a route")]
    UnsupportedMethod { method: String },

    #[error("multiple routes registered for '{key}'")]
    DuplicateRoute { key: String },

    #[error("route for '{path}' requires authentication but no auth middleware was provided")]
    MissingAuthMiddleware { path: String },
}

/// A route that passed field validation, ready for registration.
struct Prepared {
    method: String,
    filter: MethodFilter,
    pattern: String,
    key: String,
    handler: RouteHandler,
    requires_auth: bool,
}

/// Validate `routes` and register them into a composed router.
///
/// Unauthenticated routes land in the base scope; authenticated routes land
/// in a lazily created sub-scope layered with `middleware.auth`. The same
/// path may appear on both tiers with different verbs and dispatches
/// independently.
pub fn build(routes: Vec<Route>, middleware: MiddlewareSet) -> Result<Router, BuildError> {
    if routes.is_empty() {
        return Err(BuildError::NoRoutes);
    }

    let mut prepared = Vec::with_capacity(routes.len());
    for route in routes {
        if route.method.trim().is_empty() {
            return Err(BuildError::MissingMethod { path: route.path });
        }
        if route.path.trim().is_empty() {
            return Err(BuildError::MissingPath {
                method: route.method,
            });
        }
        let pattern = route.pattern();
        // Uniqueness is per registered pattern; the same method and path may
        // coexist under different versions.
        let key = format!("{} {}", route.method, pattern);
        let handler = match route.handler {
            Some(handler) => handler,
            None => {
                return Err(BuildError::MissingHandler {
                    method: route.method,
                    path: route.path,
                })
            }
        };
        let filter = parse_method(&route.method).ok_or(BuildError::UnsupportedMethod {
            method: route.method.clone(),
        })?;
        prepared.push(Prepared {
            method: route.method,
            filter,
            pattern,
            key,
            handler,
            requires_auth: route.requires_auth,
        });
    }

    let mut seen = HashSet::new();
    for route in &prepared {
        if !seen.insert(route.key.as_str()) {
            return Err(BuildError::DuplicateRoute {
                key: route.key.clone(),
            });
        }
    }

    if middleware.auth.is_none() {
        if let Some(route) = prepared.iter().find(|r| r.requires_auth) {
            return Err(BuildError::MissingAuthMiddleware {
                path: route.pattern.clone(),
            });
        }
    }

    let mut base = Router::new();
    let mut authed = Router::new();
    let mut any_auth = false;

    for route in prepared {
        tracing::info!(method = %route.method, path = %route.pattern, "registering endpoint");
        let bound = on_service(route.filter, route.handler);
        if route.requires_auth {
            authed = authed.route(&route.pattern, bound);
            any_auth = true;
        } else {
            base = base.route(&route.pattern, bound);
        }
    }

    // post wraps handlers innermost on both tiers; the auth gate sits
    // between pre and post for authenticated routes.
    base = apply_layers(base, &middleware.post);
    let composed = if any_auth {
        let mut authed = apply_layers(authed, &middleware.post);
        if let Some(auth) = &middleware.auth {
            authed = authed.layer(auth.clone());
        }
        base.merge(authed)
    } else {
        base
    };

    Ok(apply_layers(composed, &middleware.pre))
}

/// Apply layers so that index 0 ends up outermost.
fn apply_layers(router: Router, layers: &[Middleware]) -> Router {
    layers
        .iter()
        .rev()
        .fold(router, |router, layer| router.layer(layer.clone()))
}

fn parse_method(method: &str) -> Option<MethodFilter> {
    let method = Method::from_bytes(method.as_bytes()).ok()?;
    MethodFilter::try_from(method).ok()
}
