//! Route handlers.

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::Response,
};

use crate::http::request::request_id;
use crate::http::response::{encode_json, json_ok, method_not_allowed, plain_error};
use crate::http::server::AppState;

pub const GREETING: &str = "Welcome to Fetch API Server 🌍\n";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed\n";
pub const UPSTREAM_FAILURE: &str = "Failed to fetch users from upstream\n";
pub const ENCODE_FAILURE: &str = "Failed to encode users\n";

/// Greeting for `/` and every unrouted path, whatever the method.
pub async fn root() -> &'static str {
    GREETING
}

/// Republish the upstream user collection. GET only.
pub async fn users(State(state): State<AppState>, method: Method, headers: HeaderMap) -> Response {
    let request_id = request_id(&headers);

    if method != Method::GET {
        tracing::debug!(request_id = %request_id, method = %method, "Rejected method on /users");
        return method_not_allowed("GET", METHOD_NOT_ALLOWED);
    }

    let users = match state.fetcher.fetch().await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                kind = e.kind(),
                error = %e.chain(),
                "Failed to fetch users from upstream"
            );
            return plain_error(StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE);
        }
    };

    match encode_json(&users) {
        Ok(body) => json_ok(body),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to encode users");
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, ENCODE_FAILURE)
        }
    }
}
