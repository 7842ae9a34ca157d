//! Item resource handlers.
//!
//! Placeholders: no store is consulted or written.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::{ApiError, AppState};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Endpoint paths advertised by the info route.
pub const ENDPOINTS: &[&str] = &["/api/v1/", "/api/v1/items", "/api/v1/items/{id}"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub version: String,
    pub endpoints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPage {
    pub items: Vec<Value>,
    pub total: u64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedItem {
    pub id: i64,
    pub name: Value,
    pub message: String,
}

/// `GET /api/v1/`
pub async fn api_info(State(state): State<AppState>) -> Json<ApiInfo> {
    tracing::info!("API info requested");
    Json(ApiInfo {
        version: state.settings.api_version.clone(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

/// `GET /api/v1/items?page&per_page`
///
/// Unparseable values fall back to the defaults; anything else is echoed as is.
pub async fn list_items(Query(params): Query<HashMap<String, String>>) -> Json<ItemPage> {
    let page = int_param(&params, "page", DEFAULT_PAGE);
    let per_page = int_param(&params, "per_page", DEFAULT_PER_PAGE);

    tracing::info!(page, per_page, "Items requested");

    Json(ItemPage {
        items: Vec::new(),
        total: 0,
        page,
        per_page,
    })
}

/// `GET /api/v1/items/{id}`
pub async fn get_item(Path(raw_id): Path<String>) -> Result<Json<ItemSummary>, ApiError> {
    let id = parse_item_id(&raw_id).ok_or_else(|| ApiError::NotFound("Not Found".into()))?;

    tracing::info!(item_id = id, "Item requested");

    Ok(Json(ItemSummary {
        id,
        name: "Sample Item".into(),
    }))
}

/// `POST /api/v1/items`
pub async fn create_item(body: Bytes) -> Result<(StatusCode, Json<CreatedItem>), ApiError> {
    let name = parse_object(&body)
        .and_then(|mut object| object.remove("name"))
        .ok_or_else(|| ApiError::BadRequest("Name is required".into()))?;

    tracing::info!(name = %name, "Item creation requested");

    Ok((
        StatusCode::CREATED,
        Json(CreatedItem {
            id: 1,
            name,
            message: "Item created successfully".into(),
        }),
    ))
}

/// Unsigned decimal ids only; signs and whitespace do not match the route.
fn parse_item_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn int_param(params: &HashMap<String, String>, key: &str, default: i64) -> i64 {
    params
        .get(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_object(body: &[u8]) -> Option<Map<String, Value>> {
    serde_json::from_slice(body).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_int_param_defaults_and_echo() {
        let empty = params(&[]);
        assert_eq!(int_param(&empty, "page", DEFAULT_PAGE), 1);
        assert_eq!(int_param(&empty, "per_page", DEFAULT_PER_PAGE), 10);

        let given = params(&[("page", "-3"), ("per_page", "0")]);
        assert_eq!(int_param(&given, "page", DEFAULT_PAGE), -3);
        assert_eq!(int_param(&given, "per_page", DEFAULT_PER_PAGE), 0);

        let junk = params(&[("page", "two")]);
        assert_eq!(int_param(&junk, "page", DEFAULT_PAGE), 1);
    }

    #[test]
    fn test_parse_item_id() {
        assert_eq!(parse_item_id("1"), Some(1));
        assert_eq!(parse_item_id("007"), Some(7));
        assert_eq!(parse_item_id("-5"), None);
        assert_eq!(parse_item_id("+5"), None);
        assert_eq!(parse_item_id(" 5"), None);
        assert_eq!(parse_item_id(""), None);
        assert_eq!(parse_item_id("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_object() {
        assert!(parse_object(br#"{"name": "x"}"#).is_some());
        assert!(parse_object(br#"["name"]"#).is_none());
        assert!(parse_object(b"not json").is_none());
        assert!(parse_object(b"").is_none());
    }

    #[tokio::test]
    async fn test_create_item_handler() {
        let (status, Json(created)) = create_item(Bytes::from_static(br#"{"name": "Widget"}"#))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.name, Value::from("Widget"));
        assert_eq!(created.id, 1);

        let err = create_item(Bytes::from_static(br#"{"description": "x"}"#))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::BadRequest("Name is required".into()));
    }

    #[tokio::test]
    async fn test_get_item_rejects_non_integer() {
        let Json(item) = get_item(Path("7".to_string())).await.unwrap();
        assert_eq!(item.id, 7);

        let err = get_item(Path("seven".to_string())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
