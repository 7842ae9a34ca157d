//! Liveness, readiness and root probes.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_health_check() {
    let app = common::test_app();
    let (status, body) = common::get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "service": "flask-api"}));
}

#[tokio::test]
async fn test_health_check_ignores_database_state() {
    let app = common::test_app();
    app.database().close().await;

    let (status, body) = common::get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_check() {
    let app = common::test_app();
    let (status, body) = common::get_json(&app, "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ready", "database": "connected"}));
}

#[tokio::test]
async fn test_readiness_check_database_down() {
    let app = common::test_app();
    app.database().close().await;

    let (status, body) = common::get_json(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"status": "not_ready", "database": "disconnected"}));
}

#[tokio::test]
async fn test_readiness_unreachable_file_database() {
    let settings = item_api::Settings {
        database_url: "sqlite:///definitely/not/here/app.db?mode=ro".into(),
        ..common::test_settings()
    };
    let app = common::build_app(settings);

    let (status, body) = common::get_json(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = common::test_app();
    let (status, body) = common::get_json(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Flask RESTful API is running");
}

#[tokio::test]
async fn test_root_uses_configured_title() {
    let settings = item_api::Settings {
        api_title: "Inventory".into(),
        ..common::test_settings()
    };
    let app = common::build_app(settings);

    let (_, body) = common::get_json(&app, "/").await;
    assert_eq!(body["message"], "Inventory is running");
}
