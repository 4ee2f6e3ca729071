use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::error::ApiError;
use crate::models::{CreateUrlRequest, ShortenResponse, UrlInfoResponse};
use crate::registry::LinkRegistry;
use crate::stats::GlobalStats;

pub struct AppState {
    pub registry: Arc<LinkRegistry>,
    pub public_base_url: Option<String>,
}

impl AppState {
    /// Base for `short_url`: the configured public URL, else the Host header
    fn short_url_base(&self, headers: &HeaderMap) -> String {
        if let Some(base) = &self.public_base_url {
            return base.clone();
        }

        headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .map(|host| format!("http://{host}"))
            .unwrap_or_default()
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Create a new shortened URL
pub async fn create_url(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, ApiError> {
    let Json(payload) = payload?;

    let original_url = payload.url.as_deref().unwrap_or_default();
    let record = state
        .registry
        .create(original_url, payload.requested_code())
        .await?;

    let short_url = format!("{}/{}", state.short_url_base(&headers), record.short_code);

    Ok(Json(ShortenResponse {
        short_code: record.short_code,
        short_url,
        original_url: record.original_url,
        created_at: record.created_at,
        clicks: record.clicks,
    }))
}

/// Get service statistics
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<GlobalStats> {
    Json(state.registry.stats().snapshot())
}

/// Get a shortened URL by code without counting a click
pub async fn get_url(
    State(state): State<Arc<AppState>>,
    Path(short_code): Path<String>,
) -> Result<Json<UrlInfoResponse>, ApiError> {
    let record = state.registry.lookup(&short_code).await?;
    Ok(Json(record.into()))
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}
