//! Error types for the market pulse service.

use thiserror::Error;

/// Top-level service error.
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to fetch data for all tickers ({attempted} attempted)")]
    BatchEmpty { attempted: usize },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("News error: {0}")]
    News(#[from] NewsError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Cache store error: {0}")]
    CacheStore(#[from] CacheStoreError),

    #[error("Missing authorization")]
    Unauthorized,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Upstream price source errors, isolated per symbol.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Upstream API error for {symbol}: {status}")]
    Status { symbol: String, status: u16 },

    #[error("No chart data for {symbol}")]
    NoData { symbol: String },

    #[error("Network error for {symbol}: {message}")]
    Network { symbol: String, message: String },

    #[error("Fetch for {symbol} timed out after {timeout_ms} ms")]
    Timeout { symbol: String, timeout_ms: u64 },

    #[error("Could not decode response for {symbol}: {message}")]
    Decode { symbol: String, message: String },
}

impl SourceError {
    /// Symbol the failure belongs to.
    pub fn symbol(&self) -> &str {
        match self {
            SourceError::Status { symbol, .. }
            | SourceError::NoData { symbol }
            | SourceError::Network { symbol, .. }
            | SourceError::Timeout { symbol, .. }
            | SourceError::Decode { symbol, .. } => symbol,
        }
    }
}

/// Failures while recovering news items from generated text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No JSON array found in response")]
    NoArray,

    #[error("Malformed news JSON: {0}")]
    Malformed(String),

    #[error("Parsed zero news items from response")]
    Empty,
}

/// Generative text API errors.
#[derive(Error, Debug)]
pub enum NewsError {
    #[error("API key is not configured ({env_var})")]
    MissingApiKey { env_var: String },

    #[error("Completion API error [{status}]: {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not decode completion response: {0}")]
    Decode(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },
}

/// Cache backing store errors.
#[derive(Error, Debug)]
pub enum CacheStoreError {
    #[error("Failed to read cache entry '{key}': {message}")]
    Read { key: String, message: String },

    #[error("Failed to write cache entry '{key}': {message}")]
    Write { key: String, message: String },

    #[error("Cache store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for service operations.
pub type PulseResult<T> = Result<T, PulseError>;
