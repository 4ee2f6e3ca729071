use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::health_check;
use crate::registry::LinkRegistry;

use super::handlers::{redirect_url, RedirectState};

pub fn create_redirect_router(registry: Arc<LinkRegistry>) -> Router {
    let state = Arc::new(RedirectState { registry });

    Router::new()
        .route("/", get(health_check))
        .route("/{code}", get(redirect_url))
        .with_state(state)
}
