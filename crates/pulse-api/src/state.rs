//! Shared application state.

use chrono::Utc;
use pulse_config::{AppConfig, CacheBackendKind, SiteSettings};
use pulse_core::error::{PulseError, PulseResult};
use pulse_core::traits::CacheBackend;
use pulse_core::types::{EtfSnapshot, NewsDigest};
use pulse_data::{
    BatchAggregator, CacheAside, CachePolicy, Cached, MemoryCacheStore, PgCacheStore,
    YahooChartSource,
};
use pulse_news::{ChatCompletionClient, NewsDigestBuilder};
use std::sync::Arc;
use tracing::{info, warn};

use crate::summary::{build_summary, SiteSummary};

/// Everything a request handler needs.
pub struct AppState {
    pub aggregator: BatchAggregator,
    pub news: NewsDigestBuilder,
    pub cache: CacheAside,
    pub etf_policy: CachePolicy,
    pub news_policy: CachePolicy,
    pub site: SiteSettings,
}

impl AppState {
    /// Wire the production collaborators from configuration.
    pub async fn from_config(config: &AppConfig) -> PulseResult<Self> {
        let source = YahooChartSource::new(config.source.yahoo_config())?;
        let aggregator = BatchAggregator::new(
            Arc::new(source),
            config.symbols.clone(),
            config.source.fetch_timeout(),
        );

        let client_config = config.news.client_config();
        if client_config.api_key.is_none() {
            warn!(
                env_var = %config.news.api_key_env,
                "News API key not set, news refreshes will fail"
            );
        }
        let news = NewsDigestBuilder::new(
            Arc::new(ChatCompletionClient::new(client_config)?),
            config.news.prompt_config(),
        );

        let backend: Arc<dyn CacheBackend> = match config.cache.backend {
            CacheBackendKind::Memory => Arc::new(MemoryCacheStore::new()),
            CacheBackendKind::Postgres => {
                let url = config.cache.database_url().ok_or_else(|| {
                    PulseError::Config(format!(
                        "cache backend is postgres but {} is not set",
                        config.cache.database_url_env
                    ))
                })?;
                let store = PgCacheStore::connect(&url, config.cache.max_connections).await?;
                store.ensure_schema().await?;
                Arc::new(store)
            }
        };

        info!(
            symbols = config.symbols.len(),
            cache = backend.name(),
            "Application state ready"
        );

        Ok(Self {
            aggregator,
            news,
            cache: CacheAside::new(backend),
            etf_policy: config.cache.etf_policy(),
            news_policy: config.cache.news_policy(),
            site: config.site.clone(),
        })
    }

    /// Cached ETF snapshot, refreshed when stale.
    pub async fn etf_snapshot(&self) -> PulseResult<Cached<EtfSnapshot>> {
        let aggregator = &self.aggregator;
        self.cache
            .get_or_refresh(&self.etf_policy, || aggregator.snapshot())
            .await
    }

    /// Cached news digest, refreshed when stale.
    pub async fn news_digest(&self) -> PulseResult<Cached<NewsDigest>> {
        let news = &self.news;
        self.cache
            .get_or_refresh(&self.news_policy, || news.build())
            .await
    }

    /// Summary of whatever is cached, without refreshing anything.
    pub async fn site_summary(&self) -> PulseResult<SiteSummary> {
        let (etf, news) = tokio::try_join!(
            self.cache.peek(&self.etf_policy.key),
            self.cache.peek(&self.news_policy.key),
        )?;
        Ok(build_summary(&self.site, etf, news, Utc::now()))
    }
}
