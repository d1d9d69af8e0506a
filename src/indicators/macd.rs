// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   macd_line   = EMA(fast) - EMA(slow)
//   signal_line = EMA(macd_line, signal)
//   histogram   = macd_line - signal_line
//
// All three EMAs are seeded from their first input, so with finite input every
// series is defined from index 0.

use super::ema::{calculate_ema, calculate_ema_sparse};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// Index-aligned MACD series.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd_line: Vec<Option<f64>>,
    pub signal_line: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);

    let macd_line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    let signal_line = calculate_ema_sparse(&macd_line, signal);

    let histogram = macd_line
        .iter()
        .zip(signal_line.iter())
        .map(|(m, s)| Some((*m)? - (*s)?))
        .collect();

    MacdSeries {
        macd_line,
        signal_line,
        histogram,
    }
}

/// "bullish" only for a strictly positive histogram; zero or missing is
/// "bearish".
pub fn macd_signal(histogram: Option<f64>) -> &'static str {
    match histogram {
        Some(h) if h > 0.0 => "bullish",
        _ => "bearish",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_starts_at_zero() {
        let macd = calculate_macd(&[50.0, 51.0, 52.0], 12, 26, 9);
        assert_eq!(macd.macd_line[0], Some(0.0));
        assert_eq!(macd.signal_line[0], Some(0.0));
        assert_eq!(macd.histogram[0], Some(0.0));
    }

    #[test]
    fn macd_rising_series_is_bullish() {
        let closes: Vec<f64> = (1..=60).map(|x| 100.0 + x as f64).collect();
        let macd = calculate_macd(&closes, 12, 26, 9);
        let line = macd.macd_line[59].unwrap();
        let hist = macd.histogram[59].unwrap();
        assert!(line > 0.0);
        assert!(hist > 0.0);
        assert_eq!(macd_signal(Some(hist)), "bullish");
    }

    #[test]
    fn macd_falling_series_is_bearish() {
        let closes: Vec<f64> = (1..=60).map(|x| 200.0 - x as f64).collect();
        let macd = calculate_macd(&closes, 12, 26, 9);
        assert!(macd.macd_line[59].unwrap() < 0.0);
        assert!(macd.histogram[59].unwrap() < 0.0);
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let closes = [10.0, 12.0, 11.0, 15.0, 14.0, 18.0];
        let macd = calculate_macd(&closes, 2, 4, 3);
        for i in 0..closes.len() {
            let expected = macd.macd_line[i].unwrap() - macd.signal_line[i].unwrap();
            assert!((macd.histogram[i].unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn signal_defaults_to_bearish() {
        assert_eq!(macd_signal(None), "bearish");
        assert_eq!(macd_signal(Some(0.0)), "bearish");
        assert_eq!(macd_signal(Some(-0.1)), "bearish");
    }
}
