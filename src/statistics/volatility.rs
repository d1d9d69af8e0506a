// =============================================================================
// Annualised Volatility
// =============================================================================
//
//   r_t = (close_t - close_{t-1}) / close_{t-1}
//   vol = rolling_sample_std(r, window)[last] * sqrt(252) * 100
//
// The first return is undefined, so the latest rolling window is only full
// once the series holds `window + 1` closes.  A zero previous close makes
// that return undefined instead of infinite.

use tracing::trace;

use crate::indicators::latest;
use crate::indicators::rolling::rolling_std;

pub const DEFAULT_WINDOW: usize = 20;

/// Trading days per year used for annualisation.
const TRADING_DAYS: f64 = 252.0;

/// Simple percentage returns, index-aligned with `closes`.
pub fn pct_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut returns = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return returns;
    }
    returns.push(None);
    for w in closes.windows(2) {
        let r = if w[0] == 0.0 {
            None
        } else {
            Some((w[1] - w[0]) / w[0])
        };
        returns.push(r);
    }
    returns
}

/// Annualised volatility of returns, as a percentage.
///
/// Returns `None` when:
/// - Fewer than `window` closes are supplied.
/// - The latest rolling deviation is undefined (not enough returns in the tail).
pub fn calculate_volatility(closes: &[f64], window: usize) -> Option<f64> {
    if closes.len() < window {
        trace!(len = closes.len(), window, "volatility: insufficient data");
        return None;
    }

    let rolling = rolling_std(&pct_returns(closes), window);
    let latest = latest(&rolling)?;
    let annualised = latest * TRADING_DAYS.sqrt() * 100.0;

    annualised.is_finite().then_some(annualised)
}
