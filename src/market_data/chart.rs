// =============================================================================
// Chart Data: raw price series rendered for the charting client
// =============================================================================
//
// Output shape: `{"labels": [...], "data": [...]}`, one label per close.
// Labels are rendered in the configured target timezone; closes are rounded
// to cents.  The one-hour view keeps only the latest 60 points.

use std::fmt::Display;

use chrono::TimeZone;
use serde::Serialize;

use crate::types::{ChartPeriod, PriceSeries};

/// Number of points kept for the one-hour view.
const ONE_HOUR_POINTS: usize = 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// Render `series` for `period`, formatting timestamps in `tz`.
pub fn build_chart_data<Z>(series: &PriceSeries, period: ChartPeriod, tz: &Z) -> ChartData
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let series = match period {
        ChartPeriod::OneHour => series.tail(ONE_HOUR_POINTS),
        _ => series.clone(),
    };

    let format = period.label_format();
    let labels = series
        .points
        .iter()
        .map(|p| p.timestamp.with_timezone(tz).format(format).to_string())
        .collect();
    let data = series.points.iter().map(|p| round_cents(p.close)).collect();

    ChartData { labels, data }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
