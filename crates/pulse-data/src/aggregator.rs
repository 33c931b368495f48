//! Concurrent per-symbol refresh into one snapshot.

use chrono::Utc;
use futures::future::join_all;
use pulse_core::error::{PulseError, PulseResult, SourceError};
use pulse_core::traits::PriceSource;
use pulse_core::types::{EtfQuote, EtfSnapshot, SymbolMeta};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Fetches every configured symbol and derives its indicator row.
///
/// Symbols are fetched concurrently, each under its own deadline. A symbol
/// that fails is logged and left out. The batch fails only when no symbol
/// produced a row.
#[derive(Clone)]
pub struct BatchAggregator {
    source: Arc<dyn PriceSource>,
    symbols: Vec<SymbolMeta>,
    fetch_timeout: Duration,
}

impl BatchAggregator {
    pub fn new(source: Arc<dyn PriceSource>, symbols: Vec<SymbolMeta>, fetch_timeout: Duration) -> Self {
        Self {
            source,
            symbols,
            fetch_timeout,
        }
    }

    /// Restrict the batch to the given tickers, keeping configured order.
    pub fn only(&self, tickers: &[String]) -> Self {
        let symbols = self
            .symbols
            .iter()
            .filter(|m| tickers.iter().any(|t| t.eq_ignore_ascii_case(&m.ticker)))
            .cloned()
            .collect();
        Self {
            source: Arc::clone(&self.source),
            symbols,
            fetch_timeout: self.fetch_timeout,
        }
    }

    pub fn symbols(&self) -> &[SymbolMeta] {
        &self.symbols
    }

    /// Build a snapshot from the symbols that could be refreshed.
    pub async fn snapshot(&self) -> PulseResult<EtfSnapshot> {
        let attempted = self.symbols.len();
        let results = join_all(self.symbols.iter().map(|meta| self.fetch_one(meta))).await;

        let mut items = Vec::with_capacity(attempted);
        for (meta, result) in self.symbols.iter().zip(results) {
            match result {
                Ok(quote) => items.push(quote),
                Err(e) => warn!(symbol = %meta.ticker, error = %e, "Skipping symbol"),
            }
        }

        if items.is_empty() {
            return Err(PulseError::BatchEmpty { attempted });
        }

        info!(
            source = self.source.name(),
            attempted,
            succeeded = items.len(),
            "Snapshot assembled"
        );

        Ok(EtfSnapshot {
            fetched_at: Utc::now(),
            items,
        })
    }

    async fn fetch_one(&self, meta: &SymbolMeta) -> PulseResult<EtfQuote> {
        let series = tokio::time::timeout(self.fetch_timeout, self.source.fetch_series(&meta.ticker))
            .await
            .map_err(|_| SourceError::Timeout {
                symbol: meta.ticker.clone(),
                timeout_ms: self.fetch_timeout.as_millis() as u64,
            })??;

        let indicators = pulse_indicators::derive(&series)?;
        Ok(EtfQuote {
            meta: meta.clone(),
            indicators,
        })
    }
}
