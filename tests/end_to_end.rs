//! End-to-end dispatch through a composed server, driven in-process.

use anyhow::anyhow;
use axum::body::Body;
use axum::http::Request;
use axum::http::{header, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower::ServiceExt;

use apiframe::http::middleware::{json_content_type, request_logger};
use apiframe::{
    adapt, ApiError, MiddlewareSet, RequestContext, Route, Server, StandardResponse, Validate,
    GENERIC_ERROR_MESSAGE,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct PingReq {
    msg: String,
    fail_with: String,
}

impl Validate for PingReq {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PingResp {
    msg: String,
}

async fn ping(_ctx: RequestContext, req: PingReq) -> Result<PingResp, ApiError> {
    if !req.fail_with.is_empty() {
        return Err(ApiError::Internal(anyhow!("{}", req.fail_with)));
    }
    Ok(PingResp {
        msg: format!("You said: {}", req.msg),
    })
}

fn ping_server() -> Server {
    let routes = vec![Route {
        method: "GET".to_string(),
        version: 1,
        path: "/ping".to_string(),
        handler: Some(adapt(Method::GET, ping).unwrap()),
        requires_auth: false,
    }];
    let middleware = MiddlewareSet {
        pre: vec![request_logger(), json_content_type()],
        auth: None,
        post: Vec::new(),
    };
    Server::new(routes, middleware).unwrap()
}

fn ping_uri(req_json: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("req", req_json)
        .finish();
    format!("/v1/ping?{query}")
}

async fn dispatch(server: &Server, req: Request<Body>) -> (StatusCode, StandardResponse) {
    let resp = server.router().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn ping_round_trip() {
    let server = ping_server();
    let req = Request::get(ping_uri(r#"{"Msg":"hi"}"#))
        .body(Body::empty())
        .unwrap();

    let (status, envelope) = dispatch(&server, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.data, Some(json!({"Msg": "You said: hi"})));
    assert!(envelope.error.is_none());
}

#[tokio::test]
async fn business_error_produces_error_envelope() {
    let server = ping_server();
    let req = Request::get(ping_uri(r#"{"Msg":"hi","FailWith":"downstream exploded"}"#))
        .body(Body::empty())
        .unwrap();

    let (status, envelope) = dispatch(&server, req).await;

    assert_ne!(status, StatusCode::OK);
    assert!(envelope.data.is_none());
    // Unclassified business errors never leak their detail.
    assert_eq!(envelope.error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
    assert_eq!(envelope.status_code, status.as_u16());
}

#[tokio::test]
async fn missing_req_param_is_reported() {
    let server = ping_server();
    let req = Request::get("/v1/ping").body(Body::empty()).unwrap();

    let (status, envelope) = dispatch(&server, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(envelope.error.unwrap().contains("'req' is required"));
}

#[tokio::test]
async fn responses_assert_json_content_type() {
    let server = ping_server();
    let req = Request::get(ping_uri(r#"{"Msg":"hi"}"#))
        .body(Body::empty())
        .unwrap();

    let resp = server.router().oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json; charset=UTF-8"
    );
}

#[tokio::test]
async fn version_prefix_is_part_of_the_pattern() {
    let server = ping_server();
    let req = Request::get("/ping").body(Body::empty()).unwrap();
    let resp = server.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
