// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the rolling *sample* standard
// deviation over the same window.

use super::rolling::{defined, rolling_mean, rolling_std};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_NUM_STD: f64 = 2.0;

/// Index-aligned band series.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// The first `period - 1` samples of every band are `None`.  A band is only
/// defined where both the SMA and σ are.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerSeries {
    let values = defined(closes);
    let middle = rolling_mean(&values, period);
    let std = rolling_std(&values, period);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(std.iter())
            .map(|(m, s)| Some((*m)? + sign * num_std * (*s)?))
            .collect()
    };

    let upper = band(1.0);
    let lower = band(-1.0);

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}

/// Where `price` sits relative to the bands.  Anything not strictly outside a
/// known band is "middle".
pub fn band_position(price: Option<f64>, upper: Option<f64>, lower: Option<f64>) -> &'static str {
    match (price, upper, lower) {
        (Some(p), Some(u), _) if p > u => "upper",
        (Some(p), _, Some(l)) if p < l => "lower",
        _ => "middle",
    }
}
