use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::create_api_router;
use crate::redirect::create_redirect_router;
use crate::registry::LinkRegistry;

/// Full HTTP surface: the JSON API under `/api` and redirects at `/{code}`
pub fn create_app(registry: Arc<LinkRegistry>, public_base_url: Option<String>) -> Router {
    Router::new()
        .nest(
            "/api",
            create_api_router(Arc::clone(&registry), public_base_url),
        )
        .merge(create_redirect_router(registry))
        .layer(TraceLayer::new_for_http())
}
