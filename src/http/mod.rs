//! HTTP dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → middleware chain (logger, content-type, auth, ...)
//!     → adapter.rs (extract typed input by method class)
//!     → business function (context, TypedRequest) -> Result<TypedResponse>
//!     → envelope.rs / error.rs (uniform response envelope, status mapping)
//! ```

pub mod adapter;
pub mod envelope;
pub mod error;
pub mod middleware;
pub mod server;

pub use adapter::{adapt, RequestContext};
pub use envelope::{write_error, write_success, StandardResponse};
pub use error::{AdapterError, ApiError, ClassifiedError};
pub use server::Server;
