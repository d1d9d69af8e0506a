// =============================================================================
// Descriptive Statistics
// =============================================================================
//
// Percentiles use linear interpolation between the two closest ranks:
//   pos = q * (n - 1)
//   p   = sorted[floor(pos)] + (pos - floor(pos)) * (sorted[ceil(pos)] - sorted[floor(pos)])

use serde::Serialize;

use crate::indicators::rolling::{mean, sample_std};

/// Summary metrics over a full price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (divisor `n - 1`).
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
    pub range: f64,
    pub current: Option<f64>,
}

/// Compute descriptive statistics for `closes`.
///
/// Returns `None` for an empty slice.  A single sample has no sample deviation;
/// `std` is reported as 0.0 in that case.
pub fn describe(closes: &[f64]) -> Option<Statistics> {
    let mean = mean(closes)?;

    let mut sorted = closes.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    Some(Statistics {
        mean,
        median: percentile(&sorted, 0.5),
        std: sample_std(closes).unwrap_or(0.0),
        min,
        max,
        percentile_25: percentile(&sorted, 0.25),
        percentile_75: percentile(&sorted, 0.75),
        range: max - min,
        current: closes.last().copied(),
    })
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
