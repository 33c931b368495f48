//! Indicator snapshot types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display metadata for a tracked symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMeta {
    /// Ticker symbol as understood by the price source
    pub ticker: String,
    /// Human-readable fund name
    pub name: String,
    /// Sector or category tag
    pub sector: String,
}

impl SymbolMeta {
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            sector: sector.into(),
        }
    }
}

/// Five-bucket sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FearGreedLabel {
    #[serde(rename = "Extreme Fear")]
    ExtremeFear,
    #[serde(rename = "Fear")]
    Fear,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Greed")]
    Greed,
    #[serde(rename = "Extreme Greed")]
    ExtremeGreed,
}

impl FearGreedLabel {
    /// Map a score onto its bucket. Upper bounds are inclusive.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => FearGreedLabel::ExtremeFear,
            21..=40 => FearGreedLabel::Fear,
            41..=60 => FearGreedLabel::Neutral,
            61..=80 => FearGreedLabel::Greed,
            _ => FearGreedLabel::ExtremeGreed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FearGreedLabel::ExtremeFear => "Extreme Fear",
            FearGreedLabel::Fear => "Fear",
            FearGreedLabel::Neutral => "Neutral",
            FearGreedLabel::Greed => "Greed",
            FearGreedLabel::ExtremeGreed => "Extreme Greed",
        }
    }
}

impl fmt::Display for FearGreedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indicators derived from one symbol's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    /// Latest close
    pub price: f64,
    pub ma9: f64,
    pub ma50: f64,
    pub ma200: f64,
    /// Relative strength index, 0-100
    pub rsi: f64,
    /// Latest volume
    pub volume: u64,
    /// Trailing-50 mean volume, rounded
    pub avg_volume: u64,
    /// Composite sentiment score, 0-100
    pub fear_greed_score: u8,
    pub fear_greed_label: FearGreedLabel,
}

/// One row of the ETF snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfQuote {
    #[serde(flatten)]
    pub meta: SymbolMeta,
    #[serde(flatten)]
    pub indicators: IndicatorSet,
}

/// Indicators for every symbol that refreshed successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtfSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub items: Vec<EtfQuote>,
}

impl EtfSnapshot {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a row by ticker.
    pub fn get(&self, ticker: &str) -> Option<&EtfQuote> {
        self.items.iter().find(|q| q.meta.ticker == ticker)
    }
}
