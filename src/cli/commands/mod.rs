//! CLI command implementations.

pub mod news;
pub mod serve;
pub mod snapshot;
pub mod validate;
