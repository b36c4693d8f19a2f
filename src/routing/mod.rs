//! Route registry subsystem.
//!
//! # Data Flow
//! ```text
//! Route descriptors + MiddlewareSet
//!     → registry.rs (validate: non-empty, fields, duplicates, auth gate)
//!     → partition by requires_auth
//!     → register into base / authenticated scopes, bound to each verb
//!     → layer middleware (pre → auth → post → handler)
//!     → Frozen axum::Router
//! ```
//!
//! # Design Decisions
//! - The route table is validated as a whole before anything is registered
//! - Configuration errors abort the build; they are never retried
//! - The built router is immutable; descriptors are not retained

pub mod registry;
pub mod route;

pub use registry::{build, BuildError};
pub use route::{Middleware, MiddlewareSet, Route, RouteHandler};
