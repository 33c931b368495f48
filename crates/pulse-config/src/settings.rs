//! Configuration structures.

use pulse_core::error::PulseError;
use pulse_core::types::SymbolMeta;
use pulse_data::{CachePolicy, YahooConfig};
use pulse_news::{
    ChatClientConfig, PromptConfig, DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT, DIGEST_SIZE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub news: NewsSettings,
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default = "default_symbols")]
    pub symbols: Vec<SymbolMeta>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            logging: LoggingConfig::default(),
            server: ServerSettings::default(),
            source: SourceSettings::default(),
            cache: CacheSettings::default(),
            news: NewsSettings::default(),
            site: SiteSettings::default(),
            symbols: default_symbols(),
        }
    }
}

impl AppConfig {
    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), PulseError> {
        if self.symbols.is_empty() {
            return Err(PulseError::Config("symbols must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for meta in &self.symbols {
            if meta.ticker.trim().is_empty() {
                return Err(PulseError::Config("symbol ticker must not be blank".to_string()));
            }
            if !seen.insert(meta.ticker.to_ascii_uppercase()) {
                return Err(PulseError::Config(format!(
                    "duplicate symbol: {}",
                    meta.ticker
                )));
            }
        }

        if self.cache.etf_ttl_secs == 0 || self.cache.news_ttl_secs == 0 {
            return Err(PulseError::Config("cache TTLs must be positive".to_string()));
        }
        if self.cache.etf_key == self.cache.news_key {
            return Err(PulseError::Config(
                "cache keys for ETF data and news must differ".to_string(),
            ));
        }
        if self.news.digest_size == 0 {
            return Err(PulseError::Config("news.digest_size must be positive".to_string()));
        }
        if self.source.fetch_timeout_secs == 0 {
            return Err(PulseError::Config(
                "source.fetch_timeout_secs must be positive".to_string(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(PulseError::Config(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }

        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "market-pulse".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Upstream price source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub base_url: String,
    pub range: String,
    pub interval: String,
    pub user_agent: String,
    /// HTTP client timeout per request
    pub request_timeout_secs: u64,
    /// Deadline per symbol inside a batch
    pub fetch_timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            range: "1y".to_string(),
            interval: "1d".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            request_timeout_secs: 10,
            fetch_timeout_secs: 15,
        }
    }
}

impl SourceSettings {
    pub fn yahoo_config(&self) -> YahooConfig {
        YahooConfig {
            base_url: self.base_url.clone(),
            range: self.range.clone(),
            interval: self.interval.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Where cache entries are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    Memory,
    Postgres,
}

/// Cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub backend: CacheBackendKind,
    /// Environment variable holding the Postgres URL
    pub database_url_env: String,
    pub max_connections: u32,
    pub etf_key: String,
    pub etf_ttl_secs: u64,
    pub news_key: String,
    pub news_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::Memory,
            database_url_env: "DATABASE_URL".to_string(),
            max_connections: 5,
            etf_key: "etf-data".to_string(),
            etf_ttl_secs: 30 * 60,
            news_key: "etf-news".to_string(),
            news_ttl_secs: 15 * 60,
        }
    }
}

impl CacheSettings {
    pub fn etf_policy(&self) -> CachePolicy {
        CachePolicy::new(&self.etf_key, secs(self.etf_ttl_secs))
    }

    pub fn news_policy(&self) -> CachePolicy {
        CachePolicy::new(&self.news_key, secs(self.news_ttl_secs))
    }

    /// Read the database URL from the configured environment variable.
    pub fn database_url(&self) -> Option<String> {
        non_empty_env(&self.database_url_env)
    }
}

fn secs(value: u64) -> chrono::Duration {
    chrono::Duration::seconds(value.min(i32::MAX as u64) as i64)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// News model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    /// Empty disables the filter
    pub search_recency_filter: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub digest_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.perplexity.ai".to_string(),
            api_key_env: "PERPLEXITY_API_KEY".to_string(),
            model: "sonar-pro".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_prompt: DEFAULT_USER_PROMPT.to_string(),
            search_recency_filter: Some("day".to_string()),
            temperature: 0.1,
            max_tokens: 3000,
            digest_size: DIGEST_SIZE,
            request_timeout_secs: 60,
        }
    }
}

impl NewsSettings {
    pub fn prompt_config(&self) -> PromptConfig {
        PromptConfig {
            model: self.model.clone(),
            system_prompt: self.system_prompt.clone(),
            user_prompt: self.user_prompt.clone(),
            search_recency_filter: self
                .search_recency_filter
                .clone()
                .filter(|f| !f.is_empty()),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            digest_size: self.digest_size,
        }
    }

    /// Client settings with the key read from `api_key_env`.
    pub fn client_config(&self) -> ChatClientConfig {
        ChatClientConfig {
            base_url: self.base_url.clone(),
            api_key: non_empty_env(&self.api_key_env),
            api_key_env: self.api_key_env.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Public site description used by the summary views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub name: String,
    pub description: String,
    pub url: String,
    /// Public root of this service, used for links in llms.txt
    pub api_base_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "ClarionGTM Sector ETF Dashboard".to_string(),
            description:
                "Real-time sector ETF performance tracking, technical analysis, and market news."
                    .to_string(),
            url: "https://clariongtm-sector-etf.lovable.app".to_string(),
            api_base_url: String::new(),
        }
    }
}

/// SPY plus the eleven Select Sector SPDRs.
pub fn default_symbols() -> Vec<SymbolMeta> {
    [
        ("SPY", "S&P 500", "Benchmark"),
        ("XLB", "Materials Select Sector", "Materials"),
        ("XLC", "Communication Services", "Communication"),
        ("XLE", "Energy Select Sector", "Energy"),
        ("XLF", "Financial Select Sector", "Financials"),
        ("XLI", "Industrial Select Sector", "Industrials"),
        ("XLK", "Technology Select Sector", "Technology"),
        ("XLP", "Consumer Staples", "Staples"),
        ("XLRE", "Real Estate Select Sector", "Real Estate"),
        ("XLU", "Utilities Select Sector", "Utilities"),
        ("XLV", "Health Care Select Sector", "Healthcare"),
        ("XLY", "Consumer Discretionary", "Discretionary"),
    ]
    .into_iter()
    .map(|(ticker, name, sector)| SymbolMeta::new(ticker, name, sector))
    .collect()
}
