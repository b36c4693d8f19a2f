//! Standard response envelope.
//!
//! Every response carries the same JSON shape:
//!
//! ```text
//! { "StatusCode": 200, "Data": <payload> }          success
//! { "StatusCode": 404, "Error": "<message>" }       failure
//! ```
//!
//! # Design Decisions
//! - At most one of `Data`/`Error` is present; both are absent-when-empty
//! - The HTTP status line always equals `StatusCode`
//! - The error envelope is a status plus a string message and cannot fail to
//!   serialize; a success payload that cannot be serialized degrades to a 500
//!   error envelope so a response is always written

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::error::ApiError;

/// The wire envelope wrapping every response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardResponse {
    #[serde(rename = "StatusCode")]
    pub status_code: u16,

    #[serde(rename = "Data", skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(rename = "Error", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Write a success envelope with status 200.
///
/// A value that serializes to JSON null produces a body with the `Data`
/// field absent.
pub fn write_success<T: Serialize>(value: &T) -> Response {
    let data = match serde_json::to_value(value) {
        Ok(Value::Null) => None,
        Ok(v) => Some(v),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize success payload");
            return write_error(
                Some(StatusCode::INTERNAL_SERVER_ERROR),
                &ApiError::Internal(err.into()),
            );
        }
    };

    let envelope = StandardResponse {
        status_code: StatusCode::OK.as_u16(),
        data,
        error: None,
    };
    (StatusCode::OK, Json(envelope)).into_response()
}

/// Write an error envelope.
///
/// `status_override` takes precedence over the error's intrinsic status when
/// present; pass `None` to let the classifier derive the code. The raw error
/// is logged here; only the classified external message reaches the client.
pub fn write_error(status_override: Option<StatusCode>, err: &ApiError) -> Response {
    let classified = err.classify(status_override);

    if classified.status.is_server_error() {
        tracing::error!(error = %err, status = classified.status.as_u16(), "request failed");
    } else {
        tracing::warn!(error = %err, status = classified.status.as_u16(), "request rejected");
    }

    let envelope = StandardResponse {
        status_code: classified.status.as_u16(),
        data: None,
        error: Some(classified.external_message),
    };
    (classified.status, Json(envelope)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::error::GENERIC_ERROR_MESSAGE;
    use anyhow::anyhow;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Payload {
        msg: String,
    }

    async fn read_envelope(resp: Response) -> (StatusCode, StandardResponse) {
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn success_round_trips_payload() {
        let value = Payload { msg: "hi".into() };
        let (status, envelope) = read_envelope(write_success(&value)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope.status_code, 200);
        assert!(envelope.error.is_none());
        let decoded: Payload = serde_json::from_value(envelope.data.unwrap()).unwrap();
        assert_eq!(decoded, value);
    }

    #[tokio::test]
    async fn null_success_payload_omits_data_field() {
        let (status, envelope) = read_envelope(write_success(&())).await;

        assert_eq!(status, StatusCode::OK);
        assert!(envelope.data.is_none());
        assert!(envelope.error.is_none());

        let body = serde_json::to_string(&envelope).unwrap();
        assert!(!body.contains("Data"));
        assert!(!body.contains("Error"));
    }

    #[tokio::test]
    async fn error_envelope_has_no_data_and_matching_status() {
        let err = ApiError::NotFound("nothing here".into());
        let (status, envelope) = read_envelope(write_error(None, &err)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(envelope.status_code, 404);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.as_deref(), Some("nothing here"));
    }

    #[tokio::test]
    async fn internal_error_never_leaks_detail() {
        let err = ApiError::Internal(anyhow!("password=hunter2"));
        let (status, envelope) = read_envelope(write_error(None, &err)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(envelope.error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
        let body = serde_json::to_string(&envelope).unwrap();
        assert!(!body.contains("hunter2"));
    }

    #[tokio::test]
    async fn wire_field_names_are_pascal_case() {
        let (_, envelope) = read_envelope(write_success(&Payload { msg: "x".into() })).await;
        let body = serde_json::to_string(&envelope).unwrap();
        assert!(body.contains("\"StatusCode\":200"));
        assert!(body.contains("\"Data\""));
    }
}
