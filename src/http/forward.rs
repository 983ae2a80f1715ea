//! API request forwarding.
//!
//! # Responsibilities
//! - Detect API requests by path marker
//! - Pass everything else through to the rest of the pipeline unchanged
//! - Rewrite matching requests to target the upstream origin and replay them
//! - Relay the upstream reply verbatim (status, headers, body)
//! - Convert transport-level failures into the fixed 502 contract
//!
//! # Design Decisions
//! - Bodies are fully buffered, never streamed; request/response pairs are
//!   transient and nothing persists between invocations
//! - No retries and no forwarder-level timeouts; a connectivity failure is
//!   binary (relay or 502)
//! - GET/HEAD requests are forwarded with an empty body even if the caller
//!   attached one

use std::time::Instant;

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Request, State},
    http::{header, Method, Uri},
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::http::request::X_REQUEST_ID;
use crate::http::response::upstream_unreachable;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Path substring marking a request as destined for the backend API.
pub const API_PATH_MARKER: &str = "/api/";

/// Failures encountered while relaying a request upstream.
///
/// All variants are caught at the middleware boundary and collapse into the
/// single externally visible error kind: upstream unreachable.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("failed to buffer body: {0}")]
    BodyRead(#[from] axum::Error),

    #[error("invalid upstream target: {0}")]
    InvalidTarget(#[from] axum::http::uri::InvalidUri),

    #[error("failed to build upstream request: {0}")]
    BuildRequest(#[from] axum::http::Error),
}

/// Middleware entry point: forward API requests, pass everything else on.
pub async fn forward_api(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !is_api_request(request.uri()) {
        return next.run(request).await;
    }

    let start = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        upstream = %state.upstream,
        "Forwarding API request"
    );

    match relay(&state, request).await {
        Ok(response) => {
            metrics::record_forward(&method, response.status().as_u16(), start);
            response
        }
        Err(err) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                error = %err,
                "Failed to reach upstream API server"
            );
            metrics::record_forward(&method, 502, start);
            upstream_unreachable()
        }
    }
}

/// True when the request targets the backend API.
fn is_api_request(uri: &Uri) -> bool {
    uri.path().contains(API_PATH_MARKER)
}

/// Join the upstream origin with the request's path and query string.
fn upstream_target(origin: &str, uri: &Uri) -> Result<Uri, axum::http::uri::InvalidUri> {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("{origin}{path_and_query}").parse()
}

/// Replay the request against the upstream origin and buffer the reply.
///
/// The request reaching the upstream differs from the inbound one only in
/// its destination; method and headers are copied verbatim.
async fn relay(state: &AppState, request: Request) -> Result<Response, ForwardError> {
    let (parts, body) = request.into_parts();
    let target = upstream_target(&state.upstream, &parts.uri)?;

    let bodyless = parts.method == Method::GET || parts.method == Method::HEAD;
    let outbound_body = if bodyless {
        Bytes::new()
    } else {
        to_bytes(body, usize::MAX).await?
    };

    let mut builder = axum::http::Request::builder()
        .method(parts.method.clone())
        .uri(target);
    if let Some(headers) = builder.headers_mut() {
        for (name, value) in parts.headers.iter() {
            headers.append(name.clone(), value.clone());
        }
        if bodyless {
            // The inbound body was discarded; stale framing headers would
            // desynchronize the upstream connection.
            headers.remove(header::CONTENT_LENGTH);
            headers.remove(header::TRANSFER_ENCODING);
        }
    }
    let outbound = builder.body(Body::from(outbound_body))?;

    let upstream_response = state.client.request(outbound).await?;
    let (response_parts, response_body) = upstream_response.into_parts();
    let body_bytes = to_bytes(Body::new(response_body), usize::MAX).await?;

    Ok(Response::from_parts(response_parts, Body::from(body_bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_detection() {
        assert!(is_api_request(&"/api/games".parse().unwrap()));
        assert!(is_api_request(&"/api/games/1".parse().unwrap()));
        assert!(is_api_request(&"/v2/api/games".parse().unwrap()));
        assert!(!is_api_request(&"/".parse().unwrap()));
        assert!(!is_api_request(&"/about".parse().unwrap()));
        assert!(!is_api_request(&"/game/1".parse().unwrap()));
        // Marker is the path segment with both slashes, not the bare word.
        assert!(!is_api_request(&"/apidocs".parse().unwrap()));
    }

    #[test]
    fn target_preserves_path_and_query() {
        let uri: Uri = "/api/games?sort=title&page=2".parse().unwrap();
        let target = upstream_target("http://localhost:5100", &uri).unwrap();
        assert_eq!(
            target.to_string(),
            "http://localhost:5100/api/games?sort=title&page=2"
        );
    }

    #[test]
    fn target_without_query() {
        let uri: Uri = "/api/games/7".parse().unwrap();
        let target = upstream_target("http://api.internal:8000", &uri).unwrap();
        assert_eq!(target.to_string(), "http://api.internal:8000/api/games/7");
    }
}
