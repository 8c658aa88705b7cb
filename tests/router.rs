//! In-process router tests; no upstream is contacted.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use fetch_relay::config::RelayConfig;
use fetch_relay::http::handlers::{GREETING, METHOD_NOT_ALLOWED};
use fetch_relay::HttpServer;
use tower::ServiceExt;

fn router() -> axum::Router {
    let mut config = RelayConfig::default();
    config.upstream.url = "http://127.0.0.1:9/users".into();
    HttpServer::new(config).unwrap().router()
}

async fn body_string(body: Body) -> String {
    let bytes = to_bytes(body, 64 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_root_is_method_agnostic() {
    for method in [Method::GET, Method::POST, Method::PATCH, Method::HEAD] {
        let response = router()
            .oneshot(Request::builder().method(method.clone()).uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "method {method}");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        if method != Method::HEAD {
            assert_eq!(body_string(response.into_body()).await, GREETING);
        }
    }
}

#[tokio::test]
async fn test_users_method_check_happens_before_fetch() {
    let response = router()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/users")
                .body(Body::from("ignored"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ALLOW], "GET");
    assert_eq!(body_string(response.into_body()).await, METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let response = router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let id = response.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[test]
fn test_invalid_upstream_url_fails_construction() {
    let mut config = RelayConfig::default();
    config.upstream.url = "not a url".into();

    assert!(HttpServer::new(config).is_err());
}
