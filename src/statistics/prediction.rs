// =============================================================================
// Momentum Price Heuristic
// =============================================================================
//
// Not a forecasting model.  The next price is extrapolated from how far the
// last close sits above or below the mean of the last five closes:
//
//   momentum   = (last - mean(last 5)) / mean(last 5)
//   predicted  = last * (1 + momentum * 0.5)
//   confidence = clamp(100 - std(last 10) / last * 1000, 0, 100)
//
// An EMA(10) of the series is computed and traced for diagnostics; it does not
// enter the formula.

use serde::Serialize;
use tracing::trace;

use crate::indicators::ema::calculate_ema;
use crate::indicators::latest;
use crate::indicators::rolling::{mean, sample_std};

/// Minimum number of closes required for a prediction.
const MIN_CLOSES: usize = 10;

const MOMENTUM_WINDOW: usize = 5;
const CONFIDENCE_WINDOW: usize = 10;
const EMA_SPAN: usize = 10;
const MOMENTUM_DAMPING: f64 = 0.5;

pub const METHOD: &str = "momentum_ema";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_price: f64,
    pub confidence: f64,
    pub method: &'static str,
}

/// One-step-ahead price heuristic.  Returns `None` for fewer than ten closes.
///
/// Division guards: a zero five-sample mean gives zero momentum, and a zero
/// last close gives zero confidence.
pub fn predict_next_price(closes: &[f64]) -> Option<Prediction> {
    if closes.len() < MIN_CLOSES {
        trace!(len = closes.len(), min = MIN_CLOSES, "prediction: insufficient data");
        return None;
    }

    let last = *closes.last()?;
    let ema = latest(&calculate_ema(closes, EMA_SPAN));
    trace!(last, ema = ?ema, "prediction inputs");

    let recent = &closes[closes.len() - MOMENTUM_WINDOW..];
    let recent_mean = mean(recent)?;
    let momentum = if recent_mean == 0.0 {
        0.0
    } else {
        (last - recent_mean) / recent_mean
    };
    let predicted_price = last * (1.0 + momentum * MOMENTUM_DAMPING);

    let recent_std = sample_std(&closes[closes.len() - CONFIDENCE_WINDOW..])?;
    let confidence = if last == 0.0 {
        0.0
    } else {
        (100.0 - recent_std / last * 1000.0).clamp(0.0, 100.0)
    };

    Some(Prediction {
        predicted_price,
        confidence,
        method: METHOD,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_needs_ten_points() {
        let closes: Vec<f64> = (1..=9).map(|x| x as f64).collect();
        assert!(predict_next_price(&closes).is_none());
    }

    #[test]
    fn prediction_known_values() {
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let p = predict_next_price(&closes).unwrap();
        // mean(6..=10) = 8 => momentum 0.25 => 10 * 1.125
        assert!((p.predicted_price - 11.25).abs() < 1e-10);
        // std(1..=10) ≈ 3.03 => 100 - 302.8 < 0 => clamped
        assert_eq!(p.confidence, 0.0);
        assert_eq!(p.method, "momentum_ema");
    }

    #[test]
    fn flat_series_predicts_same_price_with_full_confidence() {
        let p = predict_next_price(&[250.0; 12]).unwrap();
        assert_eq!(p.predicted_price, 250.0);
        assert_eq!(p.confidence, 100.0);
    }

    #[test]
    fn falling_series_predicts_lower() {
        let closes: Vec<f64> = (0..15).map(|x| 300.0 - x as f64).collect();
        let p = predict_next_price(&closes).unwrap();
        assert!(p.predicted_price < 286.0);
        assert!((0.0..=100.0).contains(&p.confidence));
    }

    #[test]
    fn zero_prices_do_not_produce_nan() {
        let p = predict_next_price(&[0.0; 10]).unwrap();
        assert_eq!(p.predicted_price, 0.0);
        assert_eq!(p.confidence, 0.0);
    }
}
