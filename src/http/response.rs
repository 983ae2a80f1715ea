//! Gateway error responses.
//!
//! The only error the gateway manufactures itself is the 502 returned when
//! the upstream origin cannot be reached. Upstream 4xx/5xx replies are data,
//! not errors, and are relayed untouched by forward.rs.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Fixed response for a transport-level failure contacting the upstream.
///
/// Body and content type are part of the gateway's external contract.
pub fn upstream_unreachable() -> Response {
    let body = serde_json::json!({"error": "Failed to reach API server"}).to_string();
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
