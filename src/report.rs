// =============================================================================
// Analytics Report: Indicator + statistics snapshot for charting clients
// =============================================================================
//
// The report is assembled once per invocation from the latest value of every
// indicator series plus the whole-series statistics, then serialised as-is.
// Missing values stay `None` all the way through and become JSON `null`.
//
// Series with no data, or a single data point, never reach the engines: they
// produce an error-shaped document instead of a partial report.
// =============================================================================

use serde::Serialize;
use tracing::debug;

use crate::indicators::bollinger::{band_position, calculate_bollinger};
use crate::indicators::latest;
use crate::indicators::macd::{calculate_macd, macd_signal};
use crate::indicators::moving_averages::calculate_moving_averages;
use crate::indicators::rsi::{calculate_rsi, rsi_signal};
use crate::runtime_config::IndicatorParams;
use crate::statistics::{
    calculate_trend, calculate_volatility, describe, predict_next_price, Prediction,
    Statistics, Trend,
};

/// Minimum number of closes for a full report.
const MIN_POINTS: usize = 2;

// =============================================================================
// Report sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RsiReading {
    pub value: Option<f64>,
    pub signal: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdReading {
    pub macd_line: Option<f64>,
    pub signal_line: Option<f64>,
    pub histogram: Option<f64>,
    pub signal: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerReading {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
    pub position: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageReading {
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalIndicators {
    pub rsi: RsiReading,
    pub macd: MacdReading,
    pub bollinger_bands: BollingerReading,
    pub moving_averages: MovingAverageReading,
}

/// Full analytics snapshot for one price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub technical_indicators: TechnicalIndicators,
    pub statistics: Statistics,
    pub volatility: Option<f64>,
    pub trend: Option<Trend>,
    pub prediction: Option<Prediction>,
}

// =============================================================================
// Document envelope
// =============================================================================

/// Why a series was rejected before any indicator ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataShortfall {
    NoData,
    InsufficientData,
}

impl DataShortfall {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoData => "No data available",
            Self::InsufficientData => "Insufficient data",
        }
    }
}

impl std::fmt::Display for DataShortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// What gets written to the sink: either a full report or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyticsDocument {
    Report(Box<AnalyticsReport>),
    Error { error: &'static str },
}

impl AnalyticsDocument {
    fn shortfall(reason: DataShortfall) -> Self {
        Self::Error {
            error: reason.message(),
        }
    }

    pub fn report(&self) -> Option<&AnalyticsReport> {
        match self {
            Self::Report(report) => Some(&**report),
            Self::Error { .. } => None,
        }
    }
}

// =============================================================================
// Assembly
// =============================================================================

/// Run every engine over `closes` and assemble the document.
pub fn build_report(closes: &[f64], params: &IndicatorParams) -> AnalyticsDocument {
    if closes.is_empty() {
        return AnalyticsDocument::shortfall(DataShortfall::NoData);
    }
    if closes.len() < MIN_POINTS {
        return AnalyticsDocument::shortfall(DataShortfall::InsufficientData);
    }

    // --- Indicator engine ----------------------------------------------------
    let rsi = latest(&calculate_rsi(closes, params.rsi_period));
    let macd = calculate_macd(closes, params.macd_fast, params.macd_slow, params.macd_signal);
    let bands = calculate_bollinger(closes, params.bollinger_period, params.bollinger_std_dev);
    let ma = calculate_moving_averages(closes);

    // --- Statistics engine ---------------------------------------------------
    let Some(statistics) = describe(closes) else {
        return AnalyticsDocument::shortfall(DataShortfall::NoData);
    };
    let volatility = calculate_volatility(closes, params.volatility_window);
    let trend = calculate_trend(closes);
    let prediction = predict_next_price(closes);

    // --- Classification ------------------------------------------------------
    let histogram = latest(&macd.histogram);
    let upper = latest(&bands.upper);
    let lower = latest(&bands.lower);

    let technical_indicators = TechnicalIndicators {
        rsi: RsiReading {
            value: rsi,
            signal: rsi_signal(rsi),
        },
        macd: MacdReading {
            macd_line: latest(&macd.macd_line),
            signal_line: latest(&macd.signal_line),
            histogram,
            signal: macd_signal(histogram),
        },
        bollinger_bands: BollingerReading {
            upper,
            middle: latest(&bands.middle),
            lower,
            position: band_position(statistics.current, upper, lower),
        },
        moving_averages: MovingAverageReading {
            sma_20: latest(&ma.sma_20),
            sma_50: latest(&ma.sma_50),
            ema_12: latest(&ma.ema_12),
            ema_26: latest(&ma.ema_26),
        },
    };

    debug!(
        points = closes.len(),
        rsi = ?rsi,
        macd_signal = technical_indicators.macd.signal,
        bb_position = technical_indicators.bollinger_bands.position,
        volatility = ?volatility,
        "analytics report assembled"
    );

    AnalyticsDocument::Report(Box::new(AnalyticsReport {
        technical_indicators,
        statistics,
        volatility,
        trend,
        prediction,
    }))
}
