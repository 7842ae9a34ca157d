//! Probe handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::AppState;

/// Service name reported by the liveness probe.
pub const SERVICE_NAME: &str = "flask-api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liveness {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    pub status: String,
    pub database: String,
}

impl Readiness {
    pub fn ready() -> Self {
        Self {
            status: "ready".into(),
            database: "connected".into(),
        }
    }

    pub fn not_ready() -> Self {
        Self {
            status: "not_ready".into(),
            database: "disconnected".into(),
        }
    }
}

/// `GET /health`: the process is scheduled and answering.
pub async fn health_check() -> Json<Liveness> {
    tracing::debug!("Health check requested");
    Json(Liveness {
        status: "healthy".into(),
        service: SERVICE_NAME.into(),
    })
}

/// `GET /ready`: the database answers a trivial query.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(Readiness::ready())),
        Err(e) => {
            tracing::error!(error = %e, "Database connection failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Readiness::not_ready()))
        }
    }
}
