//! Price/volume series for one symbol.

use chrono::{DateTime, Utc};

/// Chronological close and volume samples for one symbol.
///
/// Closes and volumes are filtered for nulls independently, so the two
/// sequences may differ in length. Only the trailing ends line up.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    closes: Vec<f64>,
    volumes: Vec<u64>,
    as_of: Option<DateTime<Utc>>,
}

impl PriceSeries {
    /// Create a new series from already-filtered samples.
    pub fn new(symbol: impl Into<String>, closes: Vec<f64>, volumes: Vec<u64>) -> Self {
        Self {
            symbol: symbol.into(),
            closes,
            volumes,
            as_of: None,
        }
    }

    /// Build a series from raw upstream columns, dropping missing samples.
    pub fn from_optional(
        symbol: impl Into<String>,
        closes: &[Option<f64>],
        volumes: &[Option<u64>],
    ) -> Self {
        let closes = closes
            .iter()
            .flatten()
            .copied()
            .filter(|c| c.is_finite())
            .collect();
        let volumes = volumes.iter().flatten().copied().collect();
        Self::new(symbol, closes, volumes)
    }

    /// Attach the timestamp of the latest sample.
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn volumes(&self) -> &[u64] {
        &self.volumes
    }

    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.as_of
    }

    /// Latest close, if any sample survived filtering.
    pub fn latest_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// Latest volume, 0 when no volume sample survived filtering.
    pub fn latest_volume(&self) -> u64 {
        self.volumes.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}
