//! Credential presence gate.

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use pulse_core::error::PulseError;

use crate::error::ApiError;

/// Headers that count as credentials. Only presence is checked.
const CREDENTIAL_HEADERS: [&str; 2] = ["authorization", "apikey"];

fn has_credentials(headers: &HeaderMap) -> bool {
    CREDENTIAL_HEADERS.iter().any(|name| {
        headers
            .get(*name)
            .is_some_and(|value| !value.as_bytes().is_empty())
    })
}

/// Reject requests that carry neither credential header.
pub async fn require_credentials(request: Request, next: Next) -> Response {
    if has_credentials(request.headers()) {
        next.run(request).await
    } else {
        ApiError(PulseError::Unauthorized).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_has_credentials() {
        let mut headers = HeaderMap::new();
        assert!(!has_credentials(&headers));

        headers.insert("apikey", HeaderValue::from_static(""));
        assert!(!has_credentials(&headers));

        headers.insert("apikey", HeaderValue::from_static("anon"));
        assert!(has_credentials(&headers));

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer x"));
        assert!(has_credentials(&headers));
    }
}
