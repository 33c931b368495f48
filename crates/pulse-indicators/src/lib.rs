//! Technical indicators and the composite sentiment score.
//!
//! This crate provides the pure computations behind each snapshot row:
//! - Simple moving averages with a last-close fallback for short histories
//! - RSI over the trailing window, neutral on cold start
//! - Trailing average volume
//! - The weighted fear/greed blend and its label
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod derive;
pub mod labels;
pub mod momentum;
pub mod moving_average;
pub mod sentiment;
pub mod volume;

pub use derive::{derive, MA_PERIODS};
pub use labels::{daily_change_pct, round2, RsiZone, TrendPosition};
pub use momentum::{rsi, Rsi, NEUTRAL_RSI, RSI_PERIOD};
pub use moving_average::{moving_average, Sma};
pub use sentiment::{composite_score, fear_greed};
pub use volume::{average_volume, VOLUME_WINDOW};
