// =============================================================================
// Relative Strength Index (RSI): simple rolling averages
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1. Compute price changes (deltas) from consecutive closes.  The first
//         close has no delta.
// Step 2. gains  = max(delta, 0)
//         losses = max(-delta, 0)
// Step 3. Rolling arithmetic mean of gains and losses over `period` deltas.
// Step 4. RS  = avg_gain / avg_loss
//         RSI = 100 - 100 / (1 + RS)
//
// Zero average loss: RSI is pinned to 100.0, including a perfectly flat window
// where the average gain is zero as well.
//
// Thresholds:  RSI > 70 => overbought,  RSI < 30 => oversold.
// =============================================================================

use super::rolling::rolling_mean;

pub const DEFAULT_PERIOD: usize = 14;

pub const OVERBOUGHT: f64 = 70.0;
pub const OVERSOLD: f64 = 30.0;

/// Compute the RSI series for `closes`.
///
/// The output is index-aligned with the input; the first `period` samples are
/// `None` because `period` deltas are needed for the first average.
///
/// # Edge cases
/// - `period == 0` => every output is `None`
/// - `closes.len() <= period` => every output is `None`
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if closes.is_empty() {
        return Vec::new();
    }

    let mut gains: Vec<Option<f64>> = Vec::with_capacity(closes.len());
    let mut losses: Vec<Option<f64>> = Vec::with_capacity(closes.len());
    gains.push(None);
    losses.push(None);

    for w in closes.windows(2) {
        let delta = w[1] - w[0];
        gains.push(Some(if delta > 0.0 { delta } else { 0.0 }));
        losses.push(Some(if delta < 0.0 { -delta } else { 0.0 }));
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .iter()
        .zip(avg_loss.iter())
        .map(|(g, l)| rsi_from_averages((*g)?, (*l)?))
        .collect()
}

/// Label for an RSI reading.  A missing reading is neutral.
pub fn rsi_signal(value: Option<f64>) -> &'static str {
    match value {
        Some(v) if v > OVERBOUGHT => "overbought",
        Some(v) if v < OVERSOLD => "oversold",
        _ => "neutral",
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    let rsi = if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    if rsi.is_finite() {
        Some(rsi)
    } else {
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    // ---- calculate_rsi ---------------------------------------------------

    #[test]
    fn rsi_empty_input() {
        assert!(calculate_rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_period_zero() {
        assert!(calculate_rsi(&[1.0, 2.0, 3.0], 0).iter().all(Option::is_none));
    }

    #[test]
    fn rsi_insufficient_data() {
        // 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(calculate_rsi(&closes, 14).iter().all(Option::is_none));
    }

    #[test]
    fn rsi_leading_samples_are_none() {
        let closes: Vec<f64> = (1..=20).map(|x| (x as f64).sin() + 10.0).collect();
        let series = calculate_rsi(&closes, 14);
        assert_eq!(series.len(), 20);
        assert!(series[..14].iter().all(Option::is_none));
        assert!(series[14..].iter().all(Option::is_some));
    }

    #[test]
    fn rsi_all_gains() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        for v in calculate_rsi(&closes, 14).into_iter().flatten() {
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn rsi_all_losses() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let series = calculate_rsi(&closes, 14);
        assert!(series[29].is_some());
        for v in series.into_iter().flatten() {
            assert!(v.abs() < 1e-10, "expected 0.0, got {v}");
        }
    }

    #[test]
    fn rsi_flat_market_pins_to_100() {
        let series = calculate_rsi(&[100.0; 30], 14);
        let last = series.last().copied().flatten();
        assert_eq!(last, Some(100.0));
        assert!(series.iter().flatten().all(|v| !v.is_nan()));
    }

    #[test]
    fn rsi_known_value() {
        // deltas: +1, -1, +2 with period 3 => avg_gain 1, avg_loss 1/3 => RS 3 => 75
        let series = calculate_rsi(&[10.0, 11.0, 10.0, 12.0], 3);
        assert!((series[3].unwrap() - 75.0).abs() < 1e-10);
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        for v in calculate_rsi(&closes, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    // ---- rsi_signal ------------------------------------------------------

    #[test]
    fn signal_thresholds() {
        assert_eq!(rsi_signal(Some(70.5)), "overbought");
        assert_eq!(rsi_signal(Some(70.0)), "neutral");
        assert_eq!(rsi_signal(Some(29.9)), "oversold");
        assert_eq!(rsi_signal(Some(30.0)), "neutral");
        assert_eq!(rsi_signal(None), "neutral");
    }
}
