//! Full indicator set for one price series.

use pulse_core::error::IndicatorError;
use pulse_core::types::{IndicatorSet, PriceSeries};

use crate::momentum::{rsi, RSI_PERIOD};
use crate::moving_average::moving_average;
use crate::sentiment::fear_greed;
use crate::volume::{average_volume, VOLUME_WINDOW};

/// Short, medium and long moving average periods.
pub const MA_PERIODS: [usize; 3] = [9, 50, 200];

/// Derive every indicator for `series`.
///
/// The score is computed from the rounded average volume, the same figure
/// that is reported in the set.
pub fn derive(series: &PriceSeries) -> Result<IndicatorSet, IndicatorError> {
    let closes = series.closes();
    let price = series
        .latest_close()
        .ok_or(IndicatorError::InsufficientData {
            required: 1,
            available: 0,
        })?;

    let [ma9, ma50, ma200] = MA_PERIODS.map(|p| moving_average(closes, p).unwrap_or(price));
    let rsi = rsi(closes, RSI_PERIOD);
    let volume = series.latest_volume();
    let avg_volume = average_volume(series.volumes(), VOLUME_WINDOW).round() as u64;

    let (fear_greed_score, fear_greed_label) = fear_greed(
        price,
        ma200,
        ma50,
        ma9,
        rsi,
        volume as f64,
        avg_volume as f64,
    );

    Ok(IndicatorSet {
        price,
        ma9,
        ma50,
        ma200,
        rsi,
        volume,
        avg_volume,
        fear_greed_score,
        fear_greed_label,
    })
}
