//! Health check and routing fallback tests

mod common;

use axum::http::{header, Method, Request, StatusCode};
use axum::body::Body;
use common::{body_json, get, TestApp};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.send(get("/api/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "Service is running smoothly.");
    assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let response = app.send(get("/api/v1/nope", None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn test_cors_preflight_allows_credentials() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/authentication/login")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .header(header::ORIGIN, "http://evil.test")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
