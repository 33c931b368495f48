//! Core data types for the market pulse service.

mod cache;
mod news;
mod series;
mod snapshot;

pub use cache::{CacheEntry, CacheStatus};
pub use news::{NewsDigest, NewsItem};
pub use series::PriceSeries;
pub use snapshot::{EtfQuote, EtfSnapshot, FearGreedLabel, IndicatorSet, SymbolMeta};
