//! Momentum indicators.

use pulse_core::traits::Indicator;

/// Default RSI lookback.
pub const RSI_PERIOD: usize = 14;

/// RSI reported when there is not enough history.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Relative Strength Index (RSI).
///
/// Each value compares the summed gains and losses over the `period`
/// price changes inside one window of `period + 1` closes.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn window_value(window: &[f64]) -> f64 {
        let mut gains = 0.0;
        let mut losses = 0.0;

        for pair in window.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        if losses == 0.0 {
            return 100.0;
        }

        let value = 100.0 - 100.0 / (1.0 + gains / losses);
        value.clamp(0.0, 100.0)
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(RSI_PERIOD)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        data.windows(self.period + 1).map(Self::window_value).collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// RSI of the most recent window, or [`NEUTRAL_RSI`] on short histories.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    let indicator = Rsi::new(period.max(1));
    if indicator.validate_data(closes).is_err() {
        return NEUTRAL_RSI;
    }

    let tail = &closes[closes.len() - indicator.period()..];
    indicator
        .calculate(tail)
        .last()
        .copied()
        .unwrap_or(NEUTRAL_RSI)
}
