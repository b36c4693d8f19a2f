//! Error taxonomy and HTTP classification.
//!
//! # Responsibilities
//! - Define the error surface business functions return to the adapter
//! - Map each error to an HTTP status and a client-safe message
//!
//! # Design Decisions
//! - Unclassified errors collapse to a fixed generic message; internal detail
//!   is only visible on the process's own logs, never on the wire
//! - Request extraction errors are client errors (4xx), never crash a request
//! - A caller-supplied status override always wins; the error-intrinsic
//!   status applies only when no override was given

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::validation::ValidationError;

/// External message used for every unclassified internal failure.
pub const GENERIC_ERROR_MESSAGE: &str =
    "There was an unexpected internal error. Please try again later.";

/// Errors surfaced to clients through the standard response envelope.
///
/// Every variant except [`ApiError::Internal`] is classified: it carries a
/// known HTTP status and a message that is safe to expose. `Internal` wraps
/// whatever a business function failed with and never leaks its detail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL query parameter '{0}' is required")]
    MissingQueryParam(&'static str),

    #[error("multiple URL query parameters named '{0}' found")]
    AmbiguousQueryParam(&'static str),

    #[error("URL query parameter '{name}' is not valid JSON: {source}")]
    Deserialization {
        name: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to read request body: {0}")]
    BodyRead(axum::Error),

    #[error("request body is empty")]
    EmptyBody,

    #[error("request body is not valid JSON: {0}")]
    InvalidPayload(serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Unclassified failure from a business function.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// The HTTP status intrinsic to this error kind.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQueryParam(_)
            | ApiError::AmbiguousQueryParam(_)
            | ApiError::Deserialization { .. }
            | ApiError::BodyRead(_)
            | ApiError::EmptyBody
            | ApiError::InvalidPayload(_)
            | ApiError::Validation(_)
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Resolve this error to a status and a client-safe message.
    ///
    /// Precedence: `status_override` wins when present, otherwise the
    /// error-intrinsic status applies. Classified errors keep their own
    /// message even under an override; an unclassified error exposes its
    /// message only when the resolved status is not 500.
    pub fn classify(&self, status_override: Option<StatusCode>) -> ClassifiedError {
        let status = status_override.unwrap_or_else(|| self.status());
        let external_message = match self {
            ApiError::Internal(inner) => {
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    inner.to_string()
                }
            }
            classified => classified.to_string(),
        };
        ClassifiedError {
            status,
            external_message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        crate::http::envelope::write_error(None, &self)
    }
}

/// The result of mapping a raw error to an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub status: StatusCode,
    pub external_message: String,
}

/// Configuration error raised when wrapping a business function.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The adapter has no extraction strategy for this verb. This is a
    /// programmer error caught when the handler is constructed, not on the
    /// first request.
    #[error("HTTP method '{0}' is not supported by the handler adapter")]
    UnsupportedMethod(Method),
}
