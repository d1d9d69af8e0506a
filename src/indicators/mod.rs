// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators that feed the
// analytics report.  Every series function returns one `Option<f64>` per input
// close, index-aligned with the input: leading samples that lack a full window
// are `None`, never zero or NaN.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod moving_averages;
pub mod rolling;
pub mod rsi;

/// Most recent value of an indicator series, if it is defined.
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}
