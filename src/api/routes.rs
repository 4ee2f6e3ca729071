use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::registry::LinkRegistry;

use super::handlers::{create_url, get_stats, get_url, health_check, AppState};

/// Routes mounted under `/api`
pub fn create_api_router(registry: Arc<LinkRegistry>, public_base_url: Option<String>) -> Router {
    let state = Arc::new(AppState {
        registry,
        public_base_url,
    });

    Router::new()
        .route("/health", get(health_check))
        .route("/shorten", post(create_url))
        .route("/stats", get(get_stats))
        .route("/url/{short_code}", get(get_url))
        .with_state(state)
}
