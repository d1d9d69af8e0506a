// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   alpha = 2 / (span + 1)
//   EMA_0 = close_0
//   EMA_t = close_t * alpha + EMA_{t-1} * (1 - alpha)
//
// The recurrence is seeded from the first close with no bias adjustment, so a
// value exists from index 0 onwards.
// =============================================================================

/// Compute the EMA series for `closes` with the given `span`.
///
/// The output is index-aligned with the input.
///
/// # Edge cases
/// - `span == 0` => every output is `None`
/// - Once a non-finite value appears the rest of the series is `None`.
pub fn calculate_ema(closes: &[f64], span: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if span == 0 || closes.is_empty() {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = closes[0];
    if !prev.is_finite() {
        return result;
    }
    result[0] = Some(prev);

    for (i, &close) in closes.iter().enumerate().skip(1) {
        let ema = close * alpha + prev * (1.0 - alpha);
        if !ema.is_finite() {
            // A broken recurrence cannot recover; leave the tail undefined.
            break;
        }
        result[i] = Some(ema);
        prev = ema;
    }

    result
}

/// EMA over a series that may contain gaps.  The recurrence seeds at the first
/// defined value and carries the previous EMA across `None` inputs without
/// emitting a value for them.
pub fn calculate_ema_sparse(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if span == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev: Option<f64> = None;

    for (i, value) in values.iter().enumerate() {
        let Some(x) = value else { continue };
        let ema = match prev {
            Some(p) => x * alpha + p * (1.0 - alpha),
            None => *x,
        };
        if !ema.is_finite() {
            break;
        }
        result[i] = Some(ema);
        prev = Some(ema);
    }

    result
}
