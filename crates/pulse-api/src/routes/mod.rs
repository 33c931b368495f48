//! Route handlers.

pub mod etf;
pub mod health;
pub mod news;
pub mod site;

use axum::http::{HeaderName, HeaderValue};
use pulse_core::types::CacheStatus;

/// Response header reporting whether the payload came from the cache.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

pub(crate) fn cache_header(status: CacheStatus) -> (HeaderName, HeaderValue) {
    (X_CACHE, HeaderValue::from_static(status.as_str()))
}
