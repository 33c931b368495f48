//! News digest endpoint.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use super::cache_header;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn etf_news(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let cached = state.news_digest().await?;
    Ok(([cache_header(cached.status)], Json(cached.payload)).into_response())
}
