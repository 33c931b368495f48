//! Validate configuration command.

use anyhow::Result;
use pulse_config::{load_config, CacheBackendKind};
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!("Symbols: {}", config.symbols.len());
    match config.cache.backend {
        CacheBackendKind::Memory => println!("Cache: memory"),
        CacheBackendKind::Postgres => println!(
            "Cache: postgres (${}{})",
            config.cache.database_url_env,
            if config.cache.database_url().is_some() { "" } else { ", not set" }
        ),
    }
    println!(
        "ETF TTL: {}s ({})",
        config.cache.etf_ttl_secs, config.cache.etf_key
    );
    println!(
        "News TTL: {}s ({})",
        config.cache.news_ttl_secs, config.cache.news_key
    );
    println!(
        "News model: {}{}",
        config.news.model,
        if config.news.client_config().api_key.is_some() {
            ""
        } else {
            " (API key not set)"
        }
    );

    Ok(())
}
