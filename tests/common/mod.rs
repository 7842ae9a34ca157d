//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use item_api::{App, AppFactory, Settings};

/// Settings for an isolated test application: testing env, in-memory store.
pub fn test_settings() -> Settings {
    Settings {
        flask_env: "testing".into(),
        database_url: "sqlite::memory:".into(),
        ..Settings::default()
    }
}

/// Build a test application with the given settings.
pub fn build_app(settings: Settings) -> App {
    AppFactory::new()
        .settings(settings)
        .build()
        .expect("test app builds")
}

pub fn test_app() -> App {
    build_app(test_settings())
}

/// Send one request through the application without a socket.
pub async fn send(app: &App, request: Request<Body>) -> Response {
    app.router().oneshot(request).await.unwrap()
}

pub async fn get(app: &App, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &App, uri: &str, body: &str) -> Response {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(app, request).await
}

/// Status and decoded JSON body.
pub async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub async fn get_json(app: &App, uri: &str) -> (StatusCode, Value) {
    json_body(get(app, uri).await).await
}
