// =============================================================================
// Rolling-window primitives
// =============================================================================
//
// Shared building blocks for SMA, Bollinger Bands, RSI averages and return
// volatility.  A window only yields a value when every sample inside it is
// defined; a single `None` in the window makes that output `None`.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (divisor `n - 1`). `None` for fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Rolling mean over `window` samples.
///
/// # Edge cases
/// - `window == 0` => every output is `None`
/// - the first `window - 1` outputs are `None`
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, mean)
}

/// Rolling sample standard deviation over `window` samples.
///
/// A window of one sample has no sample deviation, so `window < 2` yields an
/// all-`None` series.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, sample_std)
}

fn rolling_apply(
    values: &[Option<f64>],
    window: usize,
    f: impl Fn(&[f64]) -> Option<f64>,
) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return result;
    }

    let mut buf: Vec<f64> = Vec::with_capacity(window);
    for end in window..=values.len() {
        buf.clear();
        for v in &values[end - window..end] {
            match v {
                Some(x) => buf.push(*x),
                None => break,
            }
        }
        if buf.len() == window {
            result[end - 1] = f(&buf).filter(|v| v.is_finite());
        }
    }

    result
}

/// Wrap a plain slice so it can be fed to the rolling functions.
pub fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|&v| Some(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_basic() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&data).unwrap() - 5.0).abs() < 1e-12);
        // Sample variance = 32 / 7.
        assert!((sample_std(&data).unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn std_needs_two_values() {
        assert!(sample_std(&[1.0]).is_none());
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn rolling_mean_leading_nones() {
        let out = rolling_mean(&defined(&[1.0, 2.0, 3.0, 4.0]), 3);
        assert_eq!(out, vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn rolling_window_with_gap_is_none() {
        let values = [None, Some(1.0), Some(2.0), Some(3.0)];
        let out = rolling_mean(&values, 3);
        assert_eq!(out, vec![None, None, None, Some(2.0)]);
    }

    #[test]
    fn rolling_zero_window() {
        assert_eq!(rolling_mean(&defined(&[1.0, 2.0]), 0), vec![None, None]);
    }

    #[test]
    fn rolling_std_flat_is_zero() {
        let out = rolling_std(&defined(&[5.0; 4]), 4);
        assert_eq!(out[3], Some(0.0));
    }
}
