//! HTTP API for ETF snapshots, news digests and site summaries.
//!
//! `POST /etf-data` and `POST /etf-news` serve the cached payloads and need
//! an `authorization` or `apikey` header. `/site-summary`, `/llms.txt` and
//! `/health` are public and never trigger a refresh.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;
pub mod summary;

pub use error::{ApiError, ErrorBody};
pub use state::AppState;
pub use summary::{build_summary, render_llms_txt, SiteSummary, SummaryRow};

use axum::http::{HeaderName, Method, StatusCode};
use axum::routing::get;
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::require_credentials;
use crate::routes::{etf, health, news, site};

/// Headers browsers may send on cross-origin requests.
const ALLOWED_HEADERS: [&str; 8] = [
    "authorization",
    "x-client-info",
    "apikey",
    "content-type",
    "x-supabase-client-platform",
    "x-supabase-client-platform-version",
    "x-supabase-client-runtime",
    "x-supabase-client-runtime-version",
];

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
        .max_age(Duration::from_secs(3600))
}

/// Build the full router.
pub fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    let protected = Router::new()
        .route("/etf-data", get(etf::etf_data).post(etf::etf_data))
        .route("/etf-news", get(news::etf_news).post(news::etf_news))
        .route_layer(middleware::from_fn(require_credentials));

    let public = Router::new()
        .route("/site-summary", get(site::site_summary))
        .route("/llms.txt", get(site::llms_txt))
        .route("/health", get(health::health));

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors_layer())
}

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(router: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
}
