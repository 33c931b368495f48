//! Public summary views over the cache.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use pulse_core::error::PulseError;
use std::sync::Arc;
use tracing::error;

use crate::error::ApiError;
use crate::state::AppState;
use crate::summary::render_llms_txt;

const PUBLIC_CACHE: &str = "public, max-age=300";
const MARKDOWN: &str = "text/markdown; charset=utf-8";

/// Pretty-printed JSON summary of both caches.
pub async fn site_summary(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let summary = state.site_summary().await?;
    let body = serde_json::to_string_pretty(&summary).map_err(PulseError::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8"),
            (header::CACHE_CONTROL, PUBLIC_CACHE),
        ],
        body,
    )
        .into_response())
}

/// The same summary as an llms.txt markdown document.
pub async fn llms_txt(State(state): State<Arc<AppState>>) -> Response {
    match state.site_summary().await {
        Ok(summary) => (
            [
                (header::CONTENT_TYPE, MARKDOWN),
                (header::CACHE_CONTROL, PUBLIC_CACHE),
            ],
            render_llms_txt(&summary, &state.site.api_base_url),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render llms.txt");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, MARKDOWN)],
                "# Error\n\nUnable to generate llms.txt at this time.",
            )
                .into_response()
        }
    }
}
