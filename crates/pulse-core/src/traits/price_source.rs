//! Price source trait definitions.

use crate::error::SourceError;
use crate::types::PriceSeries;
use async_trait::async_trait;

/// Trait for upstream historical price sources.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the trailing daily series for one symbol.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    ///
    /// # Returns
    /// A series with null samples removed, oldest first. An upstream
    /// response without a single usable close is an error.
    async fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, SourceError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
