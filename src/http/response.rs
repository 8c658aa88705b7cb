//! Response construction.
//!
//! # Responsibilities
//! - Build plain-text error responses with fixed, client-safe bodies
//! - Build JSON responses from pre-encoded bytes
//!
//! # Design Decisions
//! - Error bodies are static strings; upstream detail stays in the server log
//! - JSON bodies end with a newline

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

const TEXT_PLAIN: HeaderValue = HeaderValue::from_static("text/plain; charset=utf-8");
const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");
const NOSNIFF: HeaderValue = HeaderValue::from_static("nosniff");

/// Plain-text error response.
pub fn plain_error(status: StatusCode, body: &'static str) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, TEXT_PLAIN),
            (header::X_CONTENT_TYPE_OPTIONS, NOSNIFF),
        ],
        body,
    )
        .into_response()
}

/// 405 response advertising the permitted methods.
pub fn method_not_allowed(allow: &'static str, body: &'static str) -> Response {
    let mut response = plain_error(StatusCode::METHOD_NOT_ALLOWED, body);
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    response
}

/// Serialize `value` as a newline-terminated JSON document.
pub fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut body = serde_json::to_vec(value)?;
    body.push(b'\n');
    Ok(body)
}

/// 200 response with an already-encoded JSON body.
pub fn json_ok(body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, APPLICATION_JSON)],
        body,
    )
        .into_response()
}
