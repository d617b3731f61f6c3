//! Request Pipeline
//!
//! Layers wrapped around every inbound request, outermost first:
//!
//! 1. [`assign_request_id`] - fresh id in extensions and `X-Request-ID`
//! 2. [`trace_layer`] - span with method/path/origin/id, start and completion events
//! 3. [`cors_layer`] - cross-origin policy
//!
//! Handlers and middleware read the per-request data through the typed
//! [`RequestContext`] extractor.

use std::convert::Infallible;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{ConnectInfo, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Response, header};
use axum::middleware::Next;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultOnBodyChunk, DefaultOnEos, MakeSpan, OnRequest, OnResponse, TraceLayer};
use tracing::Span;
use uuid::Uuid;

use crate::client::extract_client_ip;

/// Response header carrying the request id
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

// ============================================================================
// Request Context
// ============================================================================

/// Per-request unique identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ephemeral per-request data owned by the pipeline
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub remote_addr: Option<IpAddr>,
}

impl RequestContext {
    /// Read the context from request parts
    ///
    /// A request that bypassed [`assign_request_id`] still gets an id, it is
    /// just not echoed in the response.
    pub fn from_parts(extensions: &axum::http::Extensions, headers: &HeaderMap) -> Self {
        let request_id = extensions.get::<RequestId>().copied().unwrap_or_default();
        let direct_ip = extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Self {
            request_id,
            remote_addr: extract_client_ip(headers, direct_ip),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(&parts.extensions, &parts.headers))
    }
}

// ============================================================================
// Request ID
// ============================================================================

/// Assign a fresh request id
///
/// Any client-supplied `X-Request-ID` is ignored; ids are always generated
/// here so they are unique per request.
pub async fn assign_request_id(mut req: Request<Body>, next: Next) -> axum::response::Response {
    let request_id = RequestId::new();
    req.extensions_mut().insert(request_id);

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

// ============================================================================
// Request Logging
// ============================================================================

/// Span carrying method, path, remote origin and request id
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let context = RequestContext::from_parts(request.extensions(), request.headers());
        let remote_addr = context
            .remote_addr
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "-".to_string());

        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            remote_addr = %remote_addr,
            request_id = %context.request_id,
        )
    }
}

/// "started" event
#[derive(Debug, Clone, Copy, Default)]
pub struct LogStart;

impl<B> OnRequest<B> for LogStart {
    fn on_request(&mut self, request: &axum::http::Request<B>, _span: &Span) {
        tracing::info!(method = %request.method(), path = %request.uri().path(), "started");
    }
}

/// Completion event, severity escalating with status
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCompletion;

impl<B> OnResponse<B> for LogCompletion {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status();
        let code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("");
        let latency_ms = latency.as_millis() as u64;

        if status.is_server_error() {
            tracing::error!(status = code, reason, latency_ms, "completed");
        } else if status.is_client_error() {
            tracing::warn!(status = code, reason, latency_ms, "completed");
        } else {
            tracing::info!(status = code, reason, latency_ms, "completed");
        }
    }
}

/// Trace layer type produced by [`trace_layer`]
pub type RequestTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    LogStart,
    LogCompletion,
    DefaultOnBodyChunk,
    DefaultOnEos,
    (),
>;

/// Request logging layer
///
/// Failure logging is disabled; the completion event already reports 5xx at
/// error level.
pub fn trace_layer() -> RequestTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_request(LogStart)
        .on_response(LogCompletion)
        .on_failure(())
}

// ============================================================================
// CORS
// ============================================================================

/// Cross-origin policy
///
/// Without an allow-list every origin is accepted. With one, only the listed
/// origins are, and credentials (the session cookie) are allowed.
pub fn cors_layer(allowed_origins: Option<Vec<HeaderValue>>) -> CorsLayer {
    let methods = AllowMethods::list([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS]);

    match allowed_origins {
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
            .expose_headers([REQUEST_ID_HEADER]),
        Some(origins) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(methods)
            .allow_headers(AllowHeaders::list([
                header::CONTENT_TYPE,
                header::ACCEPT,
                header::COOKIE,
            ]))
            .expose_headers([REQUEST_ID_HEADER])
            .allow_credentials(true),
    }
}

/// Parse a comma-separated origin list, skipping empty or invalid entries
pub fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect()
}
