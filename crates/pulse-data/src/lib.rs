//! Price sources, batch refresh and the cache-aside store.

mod aggregator;
mod cache;
mod postgres;
mod source;

pub use aggregator::BatchAggregator;
pub use cache::{CacheAside, CachePolicy, Cached, MemoryCacheStore};
pub use postgres::PgCacheStore;
pub use source::{YahooChartSource, YahooConfig};
