//! Collaborator traits for the market pulse service.

mod cache_backend;
mod completion;
mod indicator;
mod price_source;

pub use cache_backend::CacheBackend;
pub use completion::{ChatMessage, Completion, CompletionRequest, CompletionSource};
pub use indicator::Indicator;
pub use price_source::PriceSource;
