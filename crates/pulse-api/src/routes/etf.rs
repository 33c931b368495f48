//! ETF snapshot endpoint.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use super::cache_header;
use crate::error::ApiError;
use crate::state::AppState;

/// Cached indicator snapshot for every configured symbol.
pub async fn etf_data(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let cached = state.etf_snapshot().await?;
    Ok(([cache_header(cached.status)], Json(cached.payload)).into_response())
}
