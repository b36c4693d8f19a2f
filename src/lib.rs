//! Declarative route registration and typed request dispatch for Axum
//! services.
//!
//! Callers describe an API as a list of [`Route`] descriptors (method,
//! version, path, auth flag, handler) plus a [`MiddlewareSet`], and receive
//! a composed router or a running [`Server`]. Business functions stay
//! strongly typed as `(RequestContext, Req) -> Result<Resp, ApiError>`, and
//! [`adapt`] turns them into transport handlers with a uniform response
//! envelope and error-to-status mapping.
//!
//! # Architecture Overview
//!
//! ```text
//! Route descriptors ──▶ routing::registry ──▶ axum::Router ──▶ http::server
//!        │                 (validate,            ▲               (CORS,
//!   http::adapter           partition,           │                trace,
//!   (typed wrappers)        register)       middleware            listen)
//!        │                                  (pre/auth/post)
//!        ▼
//! http::envelope + http::error
//! (uniform success/error envelope, status classification)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use apiframe::{adapt, ApiError, MiddlewareSet, RequestContext, Route, Server};
//! use axum::http::Method;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! struct PingReq { msg: String }
//! impl apiframe::Validate for PingReq {}
//!
//! #[derive(Serialize)]
//! struct PingResp { msg: String }
//!
//! async fn ping(_ctx: RequestContext, req: PingReq) -> Result<PingResp, ApiError> {
//!     Ok(PingResp { msg: format!("You said: {}", req.msg) })
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let routes = vec![Route {
//!     method: "GET".to_string(),
//!     version: 1,
//!     path: "ping".to_string(),
//!     handler: Some(adapt(Method::GET, ping)?),
//!     requires_auth: false,
//! }];
//! let server = Server::new(routes, MiddlewareSet::default())?;
//! # Ok(()) }
//! ```

pub mod config;
pub mod http;
pub mod routing;
pub mod validation;

pub use config::{ConfigError, ServerConfig};
pub use http::adapter::{adapt, RequestContext};
pub use http::envelope::{write_error, write_success, StandardResponse};
pub use http::error::{AdapterError, ApiError, ClassifiedError, GENERIC_ERROR_MESSAGE};
pub use http::server::Server;
pub use routing::registry::{build, BuildError};
pub use routing::route::{Middleware, MiddlewareSet, Route, RouteHandler};
pub use validation::{Validate, ValidationError};
