// =============================================================================
// Shared types used across the analytics pipeline
// =============================================================================

use chrono::{DateTime, Utc};

/// A single closing price observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

/// Chronologically ordered closing prices for one ticker.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// Build a series from bare closes, spacing timestamps one minute apart.
    /// Only used where timestamps do not matter (tests, synthetic input).
    #[cfg(test)]
    pub fn from_closes(closes: &[f64]) -> Self {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                timestamp: start + chrono::Duration::minutes(i as i64),
                close,
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closing prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Keep only the most recent `count` points.
    pub fn tail(&self, count: usize) -> Self {
        let start = self.points.len().saturating_sub(count);
        Self {
            points: self.points[start..].to_vec(),
        }
    }
}

/// Look-back window requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartPeriod {
    OneHour,
    OneDay,
    OneWeek,
    OneMonth,
    ThreeMonths,
    SixMonths,
}

impl Default for ChartPeriod {
    fn default() -> Self {
        Self::OneWeek
    }
}

impl ChartPeriod {
    /// Parse a period label, returning `None` for anything unrecognised.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "1h" => Some(Self::OneHour),
            "1d" => Some(Self::OneDay),
            "1w" => Some(Self::OneWeek),
            "1m" => Some(Self::OneMonth),
            "3m" => Some(Self::ThreeMonths),
            "6m" => Some(Self::SixMonths),
            _ => None,
        }
    }

    /// `(range, interval)` query pair for the Yahoo chart endpoint.
    pub fn yahoo_range(&self) -> (&'static str, &'static str) {
        match self {
            Self::OneHour => ("1d", "1m"),
            Self::OneDay => ("1d", "5m"),
            Self::OneWeek => ("7d", "15m"),
            Self::OneMonth => ("1mo", "1h"),
            Self::ThreeMonths => ("3mo", "1d"),
            Self::SixMonths => ("6mo", "1d"),
        }
    }

    /// strftime pattern for chart labels.
    pub fn label_format(&self) -> &'static str {
        match self {
            Self::ThreeMonths | Self::SixMonths => "%Y-%m-%d",
            Self::OneHour => "%H:%M",
            _ => "%Y-%m-%d %H:%M",
        }
    }
}

impl std::fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneHour => write!(f, "1h"),
            Self::OneDay => write!(f, "1d"),
            Self::OneWeek => write!(f, "1w"),
            Self::OneMonth => write!(f, "1m"),
            Self::ThreeMonths => write!(f, "3m"),
            Self::SixMonths => write!(f, "6m"),
        }
    }
}
