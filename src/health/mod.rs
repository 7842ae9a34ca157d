//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Liveness (GET /health):
//!     → fixed payload, no dependency checks
//!
//! Readiness (GET /ready):
//!     → one SELECT 1 round-trip through the database handle
//!     → ok: 200 ready/connected
//!     → any error: logged, 503 not_ready/disconnected
//! ```
//!
//! # Design Decisions
//! - Liveness never touches dependencies, so a database outage does not get
//!   the process restarted
//! - Readiness errors are logged, never echoed in the response body
//! - The round-trip is bounded by the pool acquire timeout

pub mod probes;

use axum::{routing::get, Router};

use crate::docs::RouteDoc;
use crate::http::AppState;
use self::probes::{health_check, readiness_check};

/// Route group name.
pub const GROUP: &str = "health";

/// Routes registered by this group.
pub const ROUTES: &[RouteDoc] = &[
    RouteDoc {
        method: "get",
        path: "/health",
        summary: "Liveness probe",
        tag: GROUP,
        responses: &[(200, "Process is answering")],
    },
    RouteDoc {
        method: "get",
        path: "/ready",
        summary: "Readiness probe including database connectivity",
        tag: GROUP,
        responses: &[(200, "Ready to serve"), (503, "Database unavailable")],
    },
];

pub fn setup_health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .with_state(state)
}
