#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::util::ServiceExt;

use campus_api::auth::{generate_jwt, Claims, Role};
use campus_api::Stores;

/// Fresh application wired to empty in-memory stores.
pub fn app() -> Router {
    campus_api::app(Stores::in_memory())
}

pub fn token(sub: &str, roles: &[Role]) -> String {
    generate_jwt(Claims::new(sub.to_string(), roles.to_vec())).expect("failed to mint test token")
}

/// A caller holding only USER.
pub fn user_token() -> String {
    token("cgaucho", &[Role::User])
}

/// A caller holding USER and ADMIN, like a real admin session.
pub fn admin_token() -> String {
    token("phtcon", &[Role::User, Role::Admin])
}

/// A caller holding only ADMIN (the tiers are independent).
pub fn admin_only_token() -> String {
    token("batch-admin", &[Role::Admin])
}

/// Drive one request through the router and decode the JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, "GET", uri, token, None).await
}

pub async fn post(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, "POST", uri, token, None).await
}

pub async fn put(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, "PUT", uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, "DELETE", uri, token, None).await
}
