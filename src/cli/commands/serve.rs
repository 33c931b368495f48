//! Serve command implementation.

use anyhow::{Context, Result};
use pulse_api::{create_router, AppState};
use pulse_config::AppConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::cli::ServeArgs;

pub async fn run(args: ServeArgs, config: AppConfig) -> Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    let state = AppState::from_config(&config)
        .await
        .context("Failed to initialize application state")?;

    info!(
        app = %config.app.name,
        environment = %config.app.environment,
        "Starting API server"
    );

    let router = create_router(Arc::new(state), config.server.request_timeout());
    pulse_api::serve(router, addr)
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}
