//! Version 1 API routes.

pub mod items;

use axum::{
    routing::get,
    Router,
};

use crate::docs::RouteDoc;
use crate::http::AppState;
use self::items::*;

/// Route group name.
pub const GROUP: &str = "api_v1";

pub const PREFIX: &str = "/api/v1";

/// Routes registered by this group.
pub const ROUTES: &[RouteDoc] = &[
    RouteDoc {
        method: "get",
        path: "/api/v1/",
        summary: "API version and endpoint list",
        tag: GROUP,
        responses: &[(200, "API metadata")],
    },
    RouteDoc {
        method: "get",
        path: "/api/v1/items",
        summary: "List items (page, per_page)",
        tag: GROUP,
        responses: &[(200, "Page of items")],
    },
    RouteDoc {
        method: "post",
        path: "/api/v1/items",
        summary: "Create an item",
        tag: GROUP,
        responses: &[(201, "Item created"), (400, "Name is required")],
    },
    RouteDoc {
        method: "get",
        path: "/api/v1/items/{id}",
        summary: "Fetch an item by id",
        tag: GROUP,
        responses: &[(200, "Item"), (404, "Not an integer id")],
    },
];

pub fn setup_api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1", get(api_info))
        .route("/api/v1/", get(api_info))
        .route("/api/v1/items", get(list_items).post(create_item))
        .route("/api/v1/items/{id}", get(get_item))
        .with_state(state)
}
