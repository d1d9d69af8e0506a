// =============================================================================
// Linear-Regression Trend
// =============================================================================
//
// Ordinary least-squares fit of price against sample index:
//   slope     = Σ((x-x̄)(y-ȳ)) / Σ((x-x̄)²)
//   intercept = ȳ - slope * x̄
//   R²        = 1 - SS_res / SS_tot     (0 when SS_tot == 0)
//
// Direction is "up" only for a strictly positive slope.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub slope: f64,
    pub r_squared: f64,
    pub direction: &'static str,
}

/// Fit a degree-1 trend to `closes`.  Returns `None` for fewer than two points.
pub fn calculate_trend(closes: &[f64]) -> Option<Trend> {
    if closes.len() < 2 {
        return None;
    }

    let n = closes.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = closes.iter().sum::<f64>() / n;

    let mut numerator = 0.0_f64;
    let mut denominator = 0.0_f64;
    for (i, &y) in closes.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    // denominator > 0 for any n >= 2 since the x values are distinct.
    let slope = numerator / denominator;
    let intercept = y_mean - slope * x_mean;

    let mut ss_res = 0.0_f64;
    let mut ss_tot = 0.0_f64;
    for (i, &y) in closes.iter().enumerate() {
        let fitted = intercept + slope * i as f64;
        ss_res += (y - fitted).powi(2);
        ss_tot += (y - y_mean).powi(2);
    }

    let r_squared = if ss_tot != 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };
    let direction = if slope > 0.0 { "up" } else { "down" };

    Some(Trend {
        slope,
        r_squared,
        direction,
    })
}
