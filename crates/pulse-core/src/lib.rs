//! Core types and traits for the market pulse service.
//!
//! This crate provides the foundational building blocks including:
//! - Series and snapshot types (PriceSeries, IndicatorSet, EtfSnapshot)
//! - News digest types
//! - Cache entries
//! - Collaborator traits for price sources, cache backends and text generators

pub mod types;
pub mod traits;
pub mod error;

pub use error::{PulseError, PulseResult};
pub use types::*;
pub use traits::*;
