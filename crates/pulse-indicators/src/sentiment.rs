//! Composite fear/greed sentiment score.
//!
//! Five sub-scores, each clamped to [0, 100] on its own, are blended with
//! fixed weights:
//!
//! | Component            | Shape                                  | Weight |
//! |----------------------|----------------------------------------|--------|
//! | Price vs 200-day MA  | `50 + (price - ma200) / ma200 * 200`   | 30%    |
//! | Price vs 50-day MA   | `50 + (price - ma50) / ma50 * 300`     | 20%    |
//! | 9/50 MA crossover    | `50 + (ma9 - ma50) / ma50 * 500`       | 15%    |
//! | RSI                  | `rsi`                                  | 25%    |
//! | Volume trend         | `volume / avg_volume * 50`, else 50    | 10%    |
//!
//! The multipliers dampen long-horizon deviation and amplify the crossover.

use pulse_core::types::FearGreedLabel;

const LONG_TREND_WEIGHT: f64 = 0.30;
const MEDIUM_TREND_WEIGHT: f64 = 0.20;
const CROSSOVER_WEIGHT: f64 = 0.15;
const RSI_WEIGHT: f64 = 0.25;
const VOLUME_WEIGHT: f64 = 0.10;

const LONG_TREND_SENSITIVITY: f64 = 200.0;
const MEDIUM_TREND_SENSITIVITY: f64 = 300.0;
const CROSSOVER_SENSITIVITY: f64 = 500.0;

const NEUTRAL: f64 = 50.0;

/// Clamp a sub-score to [0, 100]. Infinities clamp to an end, NaN reads as neutral.
#[inline]
fn bounded(value: f64) -> f64 {
    if value.is_nan() {
        NEUTRAL
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[inline]
fn deviation_score(value: f64, reference: f64, sensitivity: f64) -> f64 {
    bounded(NEUTRAL + ((value - reference) / reference) * sensitivity)
}

#[inline]
fn volume_score(volume: f64, avg_volume: f64) -> f64 {
    if avg_volume > 0.0 {
        bounded((volume / avg_volume) * NEUTRAL)
    } else {
        NEUTRAL
    }
}

/// Blend trend, crossover, oscillator and volume into a 0-100 score.
pub fn composite_score(
    price: f64,
    ma200: f64,
    ma50: f64,
    ma9: f64,
    rsi: f64,
    volume: f64,
    avg_volume: f64,
) -> u8 {
    let blended = deviation_score(price, ma200, LONG_TREND_SENSITIVITY) * LONG_TREND_WEIGHT
        + deviation_score(price, ma50, MEDIUM_TREND_SENSITIVITY) * MEDIUM_TREND_WEIGHT
        + deviation_score(ma9, ma50, CROSSOVER_SENSITIVITY) * CROSSOVER_WEIGHT
        + bounded(rsi) * RSI_WEIGHT
        + volume_score(volume, avg_volume) * VOLUME_WEIGHT;

    blended.round().clamp(0.0, 100.0) as u8
}

/// Score and label in one call.
pub fn fear_greed(
    price: f64,
    ma200: f64,
    ma50: f64,
    ma9: f64,
    rsi: f64,
    volume: f64,
    avg_volume: f64,
) -> (u8, FearGreedLabel) {
    let score = composite_score(price, ma200, ma50, ma9, rsi, volume, avg_volume);
    (score, FearGreedLabel::from_score(score))
}
