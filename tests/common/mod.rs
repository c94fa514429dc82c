//! Common test utilities and helpers
//!
//! - An app backed by a fresh in-memory database
//! - Request builders for form and JSON bodies
//! - Helpers to read JSON bodies and `Set-Cookie` headers

#![allow(dead_code)]

#[macro_use]
pub mod assertions;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use cookie_auth::backend::db::Database;
use cookie_auth::backend::server::{build_state, create_app, ServerConfig};
use tower::ServiceExt;

/// App under test plus a handle on its database
pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

impl TestApp {
    /// Secure, SameSite=None cookies; cheapest bcrypt cost
    pub async fn new() -> Self {
        Self::with_config(
            ServerConfig::builder()
                .database_url("sqlite::memory:")
                .bcrypt_cost(4)
                .hash_workers(2)
                .build()
                .unwrap(),
        )
        .await
    }

    pub async fn with_config(config: ServerConfig) -> Self {
        let state = build_state(&config).await.unwrap();
        let db = state.db.clone();
        let router = create_app(state, &config).unwrap();
        Self { router, db }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Register and return the session token from the response cookie
    pub async fn register(&self, mail: &str, name: &str, password: &str) -> String {
        let body = format!(
            "mail={}&name={}&password={}",
            encode(mail),
            encode(name),
            encode(password)
        );
        let response = self
            .send(form_post("/api/v1/authentication/register", &body, None))
            .await;
        assert_eq!(response.status(), 200, "registration of {name} failed");
        session_token(&response).unwrap()
    }

    pub async fn count(&self, sql: &str) -> i64 {
        sqlx::query_scalar(sql).fetch_one(self.db.pool()).await.unwrap()
    }
}

/// Percent-encode the characters the tests put in form values
pub fn encode(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('@', "%40")
        .replace('&', "%26")
        .replace('=', "%3D")
        .replace('+', "%2B")
        .replace(' ', "+")
}

pub fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn json_request(
    method: Method,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Every `Set-Cookie` header on the response
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// The `Set-Cookie` header for `name`, if any
pub fn set_cookie_for(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&prefix))
}

/// Value of the `session` cookie the response set
pub fn session_token(response: &Response<Body>) -> Option<String> {
    let header = set_cookie_for(response, "session")?;
    let pair = header.split(';').next()?;
    pair.split_once('=').map(|(_, v)| v.to_string())
}
