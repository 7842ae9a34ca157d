//! Optional API documentation.
//!
//! # Data Flow
//! ```text
//! DocsTooling::probe() (compiled with the `docs` feature?)
//!     → Present: route metadata → /apispec.json (Swagger 2.0) + /apidocs (UI page)
//!     → Absent: factory logs a warning and skips it
//! ```
//!
//! # Design Decisions
//! - Availability is an explicit startup probe, not a caught failure
//! - The document is built once from the static route tables of each group

use axum::{response::Html, routing::get, Json, Router};
use serde_json::{json, Map, Value};

use crate::config::Settings;

pub const SPEC_ROUTE: &str = "/apispec.json";
pub const UI_ROUTE: &str = "/apidocs";

/// Documentation entry for one registered route.
#[derive(Debug, Clone, Copy)]
pub struct RouteDoc {
    /// Lowercase HTTP method.
    pub method: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
    pub tag: &'static str,
    pub responses: &'static [(u16, &'static str)],
}

/// Whether the documentation tooling is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocsTooling {
    Present,
    Absent,
}

impl DocsTooling {
    /// Probe the build for documentation support.
    pub fn probe() -> Self {
        if cfg!(feature = "docs") {
            DocsTooling::Present
        } else {
            DocsTooling::Absent
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, DocsTooling::Present)
    }
}

/// Build the Swagger 2.0 document for `routes`.
pub fn openapi_document(settings: &Settings, routes: &[RouteDoc]) -> Value {
    let mut paths = Map::new();
    for route in routes {
        let responses: Map<String, Value> = route
            .responses
            .iter()
            .map(|(status, description)| (status.to_string(), json!({ "description": description })))
            .collect();

        let mut operation = json!({
            "summary": route.summary,
            "tags": [route.tag],
            "produces": ["application/json"],
            "responses": responses,
        });
        if let Some(parameters) = path_parameters(route.path) {
            operation["parameters"] = parameters;
        }

        let entry = paths
            .entry(route.path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(methods) = entry {
            methods.insert(route.method.to_string(), operation);
        }
    }

    json!({
        "swagger": "2.0",
        "info": {
            "title": settings.api_title,
            "description": "Production-ready RESTful API",
            "version": settings.api_version,
        },
        "basePath": "/",
        "schemes": ["http", "https"],
        "paths": paths,
    })
}

/// `{name}` segments as integer path parameters.
fn path_parameters(path: &str) -> Option<Value> {
    let params: Vec<Value> = path
        .split('/')
        .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
        .map(|name| {
            json!({
                "name": name,
                "in": "path",
                "required": true,
                "type": "integer",
            })
        })
        .collect();

    if params.is_empty() {
        None
    } else {
        Some(Value::Array(params))
    }
}

fn ui_page(title: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
<head>
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>SwaggerUIBundle({{ url: "{spec}", dom_id: "#swagger-ui" }});</script>
</body>
</html>
"##,
        title = title,
        spec = SPEC_ROUTE,
    )
}

/// Routes serving the document and the UI page.
pub fn setup_docs_router(settings: &Settings, routes: &[RouteDoc]) -> Router {
    let document = openapi_document(settings, routes);
    let page = ui_page(&settings.api_title);

    Router::new()
        .route(SPEC_ROUTE, get(move || async move { Json(document) }))
        .route(UI_ROUTE, get(move || async move { Html(page) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES: &[RouteDoc] = &[
        RouteDoc {
            method: "get",
            path: "/things/{id}",
            summary: "One thing",
            tag: "things",
            responses: &[(200, "ok"), (404, "missing")],
        },
        RouteDoc {
            method: "post",
            path: "/things/{id}",
            summary: "Replace a thing",
            tag: "things",
            responses: &[(201, "created")],
        },
    ];

    #[test]
    fn test_document_shape() {
        let settings = Settings::default();
        let doc = openapi_document(&settings, ROUTES);

        assert_eq!(doc["swagger"], "2.0");
        assert_eq!(doc["basePath"], "/");
        assert_eq!(doc["info"]["title"], settings.api_title.as_str());
        assert_eq!(doc["info"]["version"], "1.0.0");

        let path = &doc["paths"]["/things/{id}"];
        assert_eq!(path["get"]["responses"]["404"]["description"], "missing");
        assert_eq!(path["post"]["summary"], "Replace a thing");
        assert_eq!(path["get"]["parameters"][0]["name"], "id");
    }

    #[test]
    fn test_path_parameters() {
        assert!(path_parameters("/health").is_none());
        let params = path_parameters("/a/{x}/b/{y}").unwrap();
        assert_eq!(params.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_ui_page_points_at_document() {
        assert!(ui_page("Title").contains(SPEC_ROUTE));
    }
}
