//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve settings (supplied, or the process-wide cache)
//! - Configure logging before anything else logs
//! - Bind the database handle
//! - Register the route groups, root route and JSON fallback
//! - Attach API documentation when the tooling is present
//!
//! # Design Decisions
//! - Fail fast: every startup error is fatal except missing documentation
//!   tooling, which only logs a warning
//! - Steps run in order, not concurrently, and are never retried
//! - Each build yields an independent App; only logging and the settings
//!   cache are shared across builds

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::api;
use crate::config::{cached_load, Settings};
use crate::db::Database;
use crate::docs::{self, DocsTooling, RouteDoc};
use crate::health;
use crate::http::response::not_found;
use crate::http::server::{apply_middleware, InvalidOrigin};
use crate::http::{AppState, HttpServer};
use crate::observability::logging;

/// Fatal application construction failure.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database configuration rejected: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Cors(#[from] InvalidOrigin),
}

const ROOT_ROUTE: RouteDoc = RouteDoc {
    method: "get",
    path: "/",
    summary: "Service banner",
    tag: "root",
    responses: &[(200, "Service is running")],
};

/// A fully composed, request-ready application.
#[derive(Debug)]
pub struct App {
    settings: Arc<Settings>,
    database: Database,
    router: Router,
    route_groups: Vec<&'static str>,
    docs: DocsTooling,
}

impl App {
    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// A handle to the routing table with all middleware applied.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Names of the registered route groups, in registration order.
    pub fn route_groups(&self) -> &[&'static str] {
        &self.route_groups
    }

    pub fn docs_enabled(&self) -> bool {
        self.docs.is_present()
    }

    pub fn is_testing(&self) -> bool {
        self.settings.is_testing()
    }

    pub fn debug(&self) -> bool {
        self.settings.flask_debug
    }

    pub fn secret_key(&self) -> &str {
        &self.settings.secret_key
    }

    pub fn bind_address(&self) -> String {
        self.settings.bind_address()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        HttpServer::new(self.router).run(listener, shutdown).await
    }
}

/// Builder for [`App`].
#[derive(Debug, Default)]
pub struct AppFactory {
    settings: Option<Arc<Settings>>,
    docs: Option<DocsTooling>,
}

impl AppFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use explicit settings instead of the process-wide cache.
    pub fn settings(mut self, settings: impl Into<Arc<Settings>>) -> Self {
        self.settings = Some(settings.into());
        self
    }

    /// Override the documentation tooling probe.
    pub fn docs(mut self, docs: DocsTooling) -> Self {
        self.docs = Some(docs);
        self
    }

    /// Compose the application.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(self) -> Result<App, StartupError> {
        let settings = self.settings.unwrap_or_else(cached_load);

        logging::configure(settings.log_level);

        let database = Database::bind(&settings.derived_database_config())?;

        let state = AppState {
            settings: settings.clone(),
            db: database.clone(),
        };

        let mut route_docs = vec![ROOT_ROUTE];
        let mut route_groups = Vec::new();

        let mut router = Router::new()
            .route("/", get(root))
            .with_state(state.clone());

        router = router.merge(health::setup_health_router(state.clone()));
        route_groups.push(health::GROUP);
        route_docs.extend_from_slice(health::ROUTES);

        router = router.merge(api::setup_api_router(state));
        route_groups.push(api::GROUP);
        route_docs.extend_from_slice(api::ROUTES);

        let docs = self.docs.unwrap_or_else(DocsTooling::probe);
        match docs {
            DocsTooling::Present => {
                router = router.merge(docs::setup_docs_router(&settings, &route_docs));
                tracing::info!(spec = docs::SPEC_ROUTE, ui = docs::UI_ROUTE, "OpenAPI documentation initialized");
            }
            DocsTooling::Absent => {
                tracing::warn!("Documentation tooling not available, skipping OpenAPI setup");
            }
        }

        let router = apply_middleware(router.fallback(not_found), &settings)?;

        tracing::info!(env = %settings.flask_env, "Application created");

        Ok(App {
            settings,
            database,
            router,
            route_groups,
            docs,
        })
    }
}

/// Build an application from `settings`, or from the cached process settings.
pub fn create_app(settings: Option<Settings>) -> Result<App, StartupError> {
    match settings {
        Some(settings) => AppFactory::new().settings(settings).build(),
        None => AppFactory::new().build(),
    }
}

/// `GET /`
async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": format!("{} is running", state.settings.api_title),
    }))
}
