//! Response formatting for `json.indented`.
//!
//! Handlers serialize compactly with `axum::Json`; this middleware re-renders every
//! `application/json` response body with indentation. Key order is preserved.

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Largest body the middleware buffers for re-indentation.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

pub async fn indent_json(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if !is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Could not buffer JSON response");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let indented = serde_json::from_slice::<serde_json::Value>(&bytes)
        .and_then(|value| serde_json::to_vec_pretty(&value));
    let body = match indented {
        Ok(indented) => {
            parts.headers.remove(CONTENT_LENGTH);
            Body::from(indented)
        }
        // Not valid JSON after all; pass it through untouched.
        Err(_) => Body::from(bytes),
    };
    Response::from_parts(parts, body)
}
