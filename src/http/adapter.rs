//! Generic handler adaptation.
//!
//! # Responsibilities
//! - Wrap a typed business function into an opaque transport handler
//! - Pick the input-extraction strategy by HTTP method:
//!   read-class (GET) pulls the typed request from the `req` query parameter,
//!   write-class (POST/PUT/PATCH) deserializes the request body
//! - Convert every outcome into the standard response envelope
//!
//! # Design Decisions
//! - The adapter owns no state; every request is self-contained and safe to
//!   run concurrently without synchronization
//! - Extraction failures are client errors written at the boundary; nothing
//!   propagates out of the adapter
//! - An unsupported verb fails when the handler is constructed, not lazily
//!   on the first request

use std::convert::Infallible;
use std::future::Future;

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{Extensions, HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower::util::service_fn;

use crate::http::envelope;
use crate::http::error::{AdapterError, ApiError};
use crate::routing::route::RouteHandler;
use crate::validation::Validate;

/// Name of the query parameter carrying the serialized request on GET.
const REQ_PARAM: &str = "req";

/// Read-only view of the request head handed to business functions.
///
/// Middleware can attach values (an authenticated identity, a request id)
/// through request extensions and business functions read them back here.
#[derive(Debug)]
pub struct RequestContext {
    head: Parts,
}

impl RequestContext {
    fn new(head: Parts) -> Self {
        Self { head }
    }

    pub fn method(&self) -> &Method {
        &self.head.method
    }

    pub fn uri(&self) -> &Uri {
        &self.head.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    pub fn extensions(&self) -> &Extensions {
        &self.head.extensions
    }
}

/// Wrap a typed business function into a transport handler for `method`.
///
/// The business function receives the request head and a deserialized
/// `Req`, and returns `Resp` or an [`ApiError`]. The returned handler is
/// method-agnostic; the route registry binds it to the verb.
pub fn adapt<Req, Resp, F, Fut>(method: Method, business_fn: F) -> Result<RouteHandler, AdapterError>
where
    Req: DeserializeOwned + Validate + Send + 'static,
    Resp: Serialize + Send + 'static,
    F: Fn(RequestContext, Req) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Resp, ApiError>> + Send + 'static,
{
    match method {
        Method::GET => Ok(box_handler(move |req| {
            handle_read(business_fn.clone(), req)
        })),
        Method::POST | Method::PUT | Method::PATCH => Ok(box_handler(move |req| {
            handle_write(business_fn.clone(), req)
        })),
        other => Err(AdapterError::UnsupportedMethod(other)),
    }
}

fn box_handler<F, Fut>(f: F) -> RouteHandler
where
    F: Fn(Request) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    RouteHandler::new(service_fn(move |req: Request| {
        let fut = f(req);
        async move { Ok::<_, Infallible>(fut.await) }
    }))
}

/// Read-class extraction: exactly one `req` query parameter holding the
/// JSON-serialized request.
async fn handle_read<Req, Resp, F, Fut>(business_fn: F, req: Request) -> Response
where
    Req: DeserializeOwned + Validate + Send + 'static,
    Resp: Serialize + Send + 'static,
    F: Fn(RequestContext, Req) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Resp, ApiError>> + Send + 'static,
{
    let (head, _body) = req.into_parts();
    tracing::debug!(method = %head.method, path = %head.uri.path(), "dispatching read-class handler");

    let query = head.uri.query().unwrap_or("");
    let mut values = url::form_urlencoded::parse(query.as_bytes())
        .filter(|(name, _)| name == REQ_PARAM)
        .map(|(_, value)| value.into_owned());

    let raw = match values.next() {
        Some(raw) => raw,
        None => return ApiError::MissingQueryParam(REQ_PARAM).into_response(),
    };
    if values.next().is_some() {
        return ApiError::AmbiguousQueryParam(REQ_PARAM).into_response();
    }

    let typed: Req = match serde_json::from_str(&raw) {
        Ok(typed) => typed,
        Err(source) => {
            return ApiError::Deserialization {
                name: REQ_PARAM,
                source,
            }
            .into_response()
        }
    };

    invoke(business_fn, RequestContext::new(head), typed).await
}

/// Write-class extraction: the request body is the JSON-serialized request,
/// validated after deserialization.
async fn handle_write<Req, Resp, F, Fut>(business_fn: F, req: Request) -> Response
where
    Req: DeserializeOwned + Validate + Send + 'static,
    Resp: Serialize + Send + 'static,
    F: Fn(RequestContext, Req) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Resp, ApiError>> + Send + 'static,
{
    let (head, body) = req.into_parts();
    tracing::debug!(method = %head.method, path = %head.uri.path(), "dispatching write-class handler");

    // An unreadable body (aborted or truncated upload) is the client's
    // fault, not a server failure.
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => return ApiError::BodyRead(err).into_response(),
    };
    if bytes.is_empty() {
        return ApiError::EmptyBody.into_response();
    }

    let typed: Req = match serde_json::from_slice(&bytes) {
        Ok(typed) => typed,
        Err(source) => return ApiError::InvalidPayload(source).into_response(),
    };
    if let Err(violation) = typed.validate() {
        return ApiError::Validation(violation).into_response();
    }

    invoke(business_fn, RequestContext::new(head), typed).await
}

async fn invoke<Req, Resp, F, Fut>(business_fn: F, ctx: RequestContext, typed: Req) -> Response
where
    Resp: Serialize,
    F: Fn(RequestContext, Req) -> Fut,
    Fut: Future<Output = Result<Resp, ApiError>>,
{
    match business_fn(ctx, typed).await {
        Ok(resp) => envelope::write_success(&resp),
        // Status 0 on the wire means "derive from the error"; here that is
        // the absence of an override.
        Err(err) => envelope::write_error(None, &err),
    }
}
