//! Volume indicators.

/// Default trailing window for average volume.
pub const VOLUME_WINDOW: usize = 50;

/// Arithmetic mean of up to the last `window` volume samples, 0 if none.
pub fn average_volume(volumes: &[u64], window: usize) -> f64 {
    let start = volumes.len().saturating_sub(window);
    let recent = &volumes[start..];
    if recent.is_empty() {
        return 0.0;
    }

    recent.iter().map(|&v| v as f64).sum::<f64>() / recent.len() as f64
}
