//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Hold the state injected into handlers
//! - Wire up middleware (request ID, tracing, JSON errors, body limit, timeout, CORS)
//! - Bind the router to a listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::db::Database;
use crate::http::request::{make_request_span, MakeRequestUuidV4};
use crate::http::response::json_error_body;

/// Total time allowed for one request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum accepted request body.
pub const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: Database,
}

/// Invalid CORS origin in settings.
#[derive(Debug, thiserror::Error)]
#[error("invalid CORS origin {origin:?}")]
pub struct InvalidOrigin {
    pub origin: String,
}

/// Wrap `router` in the standard middleware stack.
#[allow(deprecated)]
pub fn apply_middleware(router: Router, settings: &Settings) -> Result<Router, InvalidOrigin> {
    let router = router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(middleware::map_response(json_error_body))
            .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
    );

    match cors_layer(settings)? {
        Some(cors) => Ok(router.layer(cors)),
        None => Ok(router),
    }
}

/// CORS layer for the configured origins, if any.
fn cors_layer(settings: &Settings) -> Result<Option<CorsLayer>, InvalidOrigin> {
    let origins = settings.cors_origin_list();
    if origins.is_empty() {
        return Ok(None);
    }

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values = origins
            .into_iter()
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|_| InvalidOrigin { origin })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(values)
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any),
    ))
}

/// HTTP server for a composed application.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
