// =============================================================================
// Yahoo Finance chart client: closing-price loader
// =============================================================================
//
// Fetches `/v8/finance/chart/{ticker}` for the range/interval pair mapped from
// a `ChartPeriod` and reduces the response to a chronological `PriceSeries`.
// Rows with a missing or non-finite close are dropped.  A failed request is
// retried once before the error is returned.
// =============================================================================

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::types::{ChartPeriod, PricePoint, PriceSeries};

/// Pause before the single retry.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Yahoo Finance REST client.
#[derive(Clone)]
pub struct YahooClient {
    base_url: String,
    client: reqwest::Client,
}

impl YahooClient {
    /// Create a new `YahooClient` against `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        // Yahoo rejects requests without a browser-like user agent.
        default_headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .context("failed to build reqwest client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(%base_url, "YahooClient initialised");

        Ok(Self { base_url, client })
    }

    /// Full chart URL for `ticker` over `period`.
    pub fn chart_url(&self, ticker: &str, period: ChartPeriod) -> String {
        let (range, interval) = period.yahoo_range();
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}",
            self.base_url, ticker, range, interval
        )
    }

    /// Fetch the closing-price series for `ticker`, retrying once on failure.
    #[instrument(skip(self), name = "yahoo::fetch_series")]
    pub async fn fetch_series(&self, ticker: &str, period: ChartPeriod) -> Result<PriceSeries> {
        match self.fetch_once(ticker, period).await {
            Ok(series) => Ok(series),
            Err(e) => {
                warn!(error = %e, "chart download failed, retrying once");
                tokio::time::sleep(RETRY_DELAY).await;
                self.fetch_once(ticker, period)
                    .await
                    .context("chart download failed after retry")
            }
        }
    }

    async fn fetch_once(&self, ticker: &str, period: ChartPeriod) -> Result<PriceSeries> {
        let url = self.chart_url(ticker, period);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v8/finance/chart request failed")?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("failed to read chart response body")?;

        // Yahoo answers unknown tickers with 404 and a chart.error payload;
        // that is "no data", not a transport failure.
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Ok(series) = parse_chart_body(&body) {
                return Ok(series);
            }
        }

        if !status.is_success() {
            bail!("Yahoo GET /v8/finance/chart returned {}: {}", status, body);
        }

        let series = parse_chart_body(&body)?;
        debug!(ticker, %period, count = series.len(), "chart fetched");
        Ok(series)
    }
}

/// Decode a chart response body into a `PriceSeries`.
///
/// An API-level error with no result rows is treated as an empty series so the
/// report can say "No data available".
pub fn parse_chart_body(body: &str) -> Result<PriceSeries> {
    let response: ChartResponse =
        serde_json::from_str(body).context("failed to parse chart response")?;

    let results = response.chart.result.unwrap_or_default();
    let Some(result) = results.into_iter().next() else {
        if let Some(err) = response.chart.error {
            warn!(code = ?err.code, description = ?err.description, "chart API returned an error");
        }
        return Ok(PriceSeries::default());
    };

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(Some(close)) = closes.get(i) else {
            continue;
        };
        if !close.is_finite() {
            continue;
        }
        let timestamp: DateTime<Utc> = DateTime::from_timestamp(ts, 0)
            .with_context(|| format!("invalid chart timestamp {ts}"))?;
        points.push(PricePoint {
            timestamp,
            close: *close,
        });
    }

    // Provider order is chronological; keep it stable if it ever is not.
    points.sort_by_key(|p| p.timestamp);

    Ok(PriceSeries::new(points))
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
