//! HTTP error mapping for gateway handlers
//!
//! Upstream failures are relayed, not masked: the raw upstream status and
//! body are surfaced in a 502/504 response so the caller sees exactly what
//! the catalog service said.

use ampm_common::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// Wrapper giving `ampm_common::Error` an HTTP response shape
#[derive(Debug)]
pub struct GatewayError(pub Error);

impl From<Error> for GatewayError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            Error::Upstream { status, body } => {
                // Relay the upstream error body verbatim; parse it as JSON
                // when possible so callers get structure, not a quoted blob
                let upstream_body =
                    serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "upstream request failed",
                        "upstream_status": status,
                        "upstream_body": upstream_body,
                    }),
                )
            }
            Error::UpstreamShape(msg) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": format!("unexpected upstream response: {msg}") }),
            ),
            Error::Timeout(msg) => (
                StatusCode::GATEWAY_TIMEOUT,
                json!({ "error": format!("upstream timeout: {msg}") }),
            ),
            Error::Network(msg) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": format!("upstream unreachable: {msg}") }),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": other.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
