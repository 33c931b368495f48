//! Qualitative labels used by the summary views.

use serde::{Deserialize, Serialize};

/// RSI at or above this reads as overbought.
pub const OVERBOUGHT: f64 = 70.0;
/// RSI at or below this reads as oversold.
pub const OVERSOLD: f64 = 30.0;
/// Half-width of the band around a moving average that counts as "at".
pub const TREND_BAND: f64 = 0.005;

/// RSI zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    pub fn from_rsi(rsi: f64) -> Self {
        if rsi >= OVERBOUGHT {
            RsiZone::Overbought
        } else if rsi <= OVERSOLD {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RsiZone::Overbought => "Overbought",
            RsiZone::Oversold => "Oversold",
            RsiZone::Neutral => "Neutral",
        }
    }
}

/// Price position relative to a moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendPosition {
    Above,
    Below,
    At,
}

impl TrendPosition {
    pub fn of(price: f64, ma: f64) -> Self {
        if price > ma * (1.0 + TREND_BAND) {
            TrendPosition::Above
        } else if price < ma * (1.0 - TREND_BAND) {
            TrendPosition::Below
        } else {
            TrendPosition::At
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendPosition::Above => "Above",
            TrendPosition::Below => "Below",
            TrendPosition::At => "At",
        }
    }
}

/// Percent distance of price from the 9-day MA, to two decimals.
pub fn daily_change_pct(price: f64, ma9: f64) -> f64 {
    round2((price - ma9) / ma9 * 100.0)
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_zone_boundaries() {
        assert_eq!(RsiZone::from_rsi(70.0), RsiZone::Overbought);
        assert_eq!(RsiZone::from_rsi(69.99), RsiZone::Neutral);
        assert_eq!(RsiZone::from_rsi(30.0), RsiZone::Oversold);
        assert_eq!(RsiZone::from_rsi(30.01), RsiZone::Neutral);
    }

    #[test]
    fn test_trend_position_band() {
        assert_eq!(TrendPosition::of(101.0, 100.0), TrendPosition::Above);
        assert_eq!(TrendPosition::of(99.0, 100.0), TrendPosition::Below);
        assert_eq!(TrendPosition::of(100.4, 100.0), TrendPosition::At);
        assert_eq!(TrendPosition::of(99.6, 100.0), TrendPosition::At);
    }

    #[test]
    fn test_daily_change_pct() {
        assert_eq!(daily_change_pct(101.0, 100.0), 1.0);
        assert_eq!(daily_change_pct(99.0, 100.0), -1.0);
        assert_eq!(daily_change_pct(100.0, 300.0), -66.67);
    }
}
