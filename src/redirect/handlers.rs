use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use url::Url;

use crate::api::ApiError;
use crate::registry::LinkRegistry;

pub struct RedirectState {
    pub registry: Arc<LinkRegistry>,
}

/// Redirect to original URL
pub async fn redirect_url(
    State(state): State<Arc<RedirectState>>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    let record = state.registry.resolve(&code).await?;

    let location = location_header(&record.original_url).ok_or_else(|| {
        tracing::error!(short_code = %code, "stored URL cannot be used as a Location header");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}

/// The stored URL verbatim when it is header-safe, otherwise its
/// percent-encoded serialization
fn location_header(original_url: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(original_url).ok().or_else(|| {
        Url::parse(original_url)
            .ok()
            .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
    })
}
