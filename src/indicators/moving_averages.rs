// =============================================================================
// Moving-average bundle reported alongside the oscillators
// =============================================================================

use super::ema::calculate_ema;
use super::rolling::{defined, rolling_mean};

/// Simple moving average, index-aligned; the first `period - 1` samples are
/// `None`.
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_mean(&defined(closes), period)
}

/// The four fixed averages: SMA 20/50 and EMA 12/26.
#[derive(Debug, Clone)]
pub struct MovingAverages {
    pub sma_20: Vec<Option<f64>>,
    pub sma_50: Vec<Option<f64>>,
    pub ema_12: Vec<Option<f64>>,
    pub ema_26: Vec<Option<f64>>,
}

pub fn calculate_moving_averages(closes: &[f64]) -> MovingAverages {
    MovingAverages {
        sma_20: calculate_sma(closes, 20),
        sma_50: calculate_sma(closes, 50),
        ema_12: calculate_ema(closes, 12),
        ema_26: calculate_ema(closes, 26),
    }
}
