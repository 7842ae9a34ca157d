//! Application factory behavior.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tokio::net::TcpListener;

use item_api::docs::DocsTooling;
use item_api::{create_app, AppFactory, Settings, Shutdown, StartupError};

mod common;

#[tokio::test]
async fn test_create_app_with_settings() {
    let app = create_app(Some(common::test_settings())).unwrap();

    assert!(app.is_testing());
    assert!(!app.debug());
    assert_eq!(app.settings().flask_env, "testing");
    assert!(app.database().is_in_memory());
}

#[tokio::test]
async fn test_create_app_custom_settings() {
    let settings = Settings {
        flask_debug: true,
        secret_key: "custom-secret".into(),
        port: 8081,
        host: "127.0.0.1".into(),
        ..common::test_settings()
    };
    let app = create_app(Some(settings)).unwrap();

    assert!(app.debug());
    assert_eq!(app.secret_key(), "custom-secret");
    assert_eq!(app.bind_address(), "127.0.0.1:8081");
}

#[tokio::test]
async fn test_route_groups_registered() {
    let app = common::test_app();
    assert_eq!(app.route_groups(), &["health", "api_v1"]);
}

#[tokio::test]
async fn test_independent_apps() {
    let first = common::test_app();
    let second = common::test_app();

    first.database().close().await;

    let (status, _) = common::get_json(&second, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = common::get_json(&first, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_malformed_database_url_is_fatal() {
    let settings = Settings {
        database_url: "sqlite://app.db?mode=sideways".into(),
        ..common::test_settings()
    };
    let err = create_app(Some(settings)).unwrap_err();
    assert!(matches!(err, StartupError::Database(_)));
}

#[tokio::test]
async fn test_invalid_cors_origin_is_fatal() {
    let settings = Settings {
        cors_origins: Some("bad\norigin".into()),
        ..common::test_settings()
    };
    let err = create_app(Some(settings)).unwrap_err();
    assert!(matches!(err, StartupError::Cors(_)));
}

#[tokio::test]
async fn test_docs_served_when_present() {
    let app = AppFactory::new()
        .settings(common::test_settings())
        .docs(DocsTooling::Present)
        .build()
        .unwrap();
    assert!(app.docs_enabled());

    let (status, doc) = common::get_json(&app, "/apispec.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Flask RESTful API");
    assert!(doc["paths"]["/health"]["get"].is_object());
    assert!(doc["paths"]["/api/v1/items"]["post"].is_object());
    assert!(doc["paths"]["/api/v1/items/{id}"]["get"].is_object());

    let response = common::get(&app, "/apidocs").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_docs_skipped_when_absent() {
    let app = AppFactory::new()
        .settings(common::test_settings())
        .docs(DocsTooling::Absent)
        .build()
        .unwrap();
    assert!(!app.docs_enabled());

    let (status, _) = common::get_json(&app, "/apispec.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Everything else still works.
    let (status, _) = common::get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cors_headers() {
    let settings = Settings {
        cors_origins: Some("http://localhost:3000".into()),
        ..common::test_settings()
    };
    let app = common::build_app(settings);

    let request = Request::get("/health")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = common::send(&app, request).await;

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_no_cors_headers_by_default() {
    let app = common::test_app();

    let request = Request::get("/health")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = common::send(&app, request).await;

    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_serve_until_shutdown() {
    let app = common::test_app();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = tokio::spawn(app.serve(listener, shutdown.subscribe()));

    let body: serde_json::Value = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "healthy");

    shutdown.trigger();
    server.await.unwrap().unwrap();
}
