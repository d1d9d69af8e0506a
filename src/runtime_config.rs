// =============================================================================
// Runtime Configuration: Analytics settings loaded from JSON
// =============================================================================
//
// Every tunable parameter of a run lives here: where reports are written,
// which timezone chart labels are rendered in, how the price loader talks to
// the provider, and the indicator windows.
//
// All fields carry `#[serde(default)]` so that a partial (or empty) config
// file still loads.  The timezone is an explicit value handed to the loader
// and chart renderer; the process environment's TZ is never consulted.
//
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::FixedOffset;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::indicators::{bollinger, macd, rsi};
use crate::statistics::volatility;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_output_dir() -> String {
    "public/data".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_yahoo_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_rsi_period() -> usize {
    rsi::DEFAULT_PERIOD
}

fn default_macd_fast() -> usize {
    macd::DEFAULT_FAST
}

fn default_macd_slow() -> usize {
    macd::DEFAULT_SLOW
}

fn default_macd_signal() -> usize {
    macd::DEFAULT_SIGNAL
}

fn default_bollinger_period() -> usize {
    bollinger::DEFAULT_PERIOD
}

fn default_bollinger_std_dev() -> f64 {
    bollinger::DEFAULT_NUM_STD
}

fn default_volatility_window() -> usize {
    volatility::DEFAULT_WINDOW
}

// =============================================================================
// IndicatorParams
// =============================================================================

/// Window parameters for the indicator and volatility engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Band half-width in standard deviations.
    #[serde(default = "default_bollinger_std_dev")]
    pub bollinger_std_dev: f64,

    /// Rolling window for return volatility.
    #[serde(default = "default_volatility_window")]
    pub volatility_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            bollinger_period: default_bollinger_period(),
            bollinger_std_dev: default_bollinger_std_dev(),
            volatility_window: default_volatility_window(),
        }
    }
}

// =============================================================================
// AnalyticsConfig
// =============================================================================

/// Top-level configuration for one analytics run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Directory that receives the JSON documents.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Target timezone for chart labels: an IANA name such as "US/Eastern",
    /// or a fixed offset such as "-05:00".
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_yahoo_base_url")]
    pub yahoo_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub indicators: IndicatorParams,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            timezone: default_timezone(),
            yahoo_base_url: default_yahoo_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            indicators: IndicatorParams::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analytics config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analytics config from {}", path.display()))?;

        info!(
            path = %path.display(),
            output_dir = %config.output_dir,
            timezone = %config.timezone,
            "analytics config loaded"
        );

        Ok(config)
    }

    /// Resolve the configured timezone label.
    pub fn target_zone(&self) -> Result<TargetZone> {
        TargetZone::parse(&self.timezone)
    }
}

// =============================================================================
// TargetZone
// =============================================================================

/// Timezone chart labels are rendered in.
///
/// IANA names ("US/Eastern", "America/New_York") follow daylight saving;
/// `±HH:MM` labels are a constant offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetZone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl TargetZone {
    /// Parse an IANA zone name, "Z", or a `±HH:MM` offset.
    pub fn parse(label: &str) -> Result<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("utc") {
            return Ok(Self::Named(Tz::UTC));
        }
        if let Ok(tz) = label.parse::<Tz>() {
            return Ok(Self::Named(tz));
        }
        parse_offset(label)
            .map(Self::Fixed)
            .with_context(|| format!("unsupported timezone {label:?}"))
    }
}

impl std::fmt::Display for TargetZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(tz) => write!(f, "{}", tz.name()),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Parse "Z" or a `±HH:MM` offset.
pub fn parse_offset(label: &str) -> Result<FixedOffset> {
    let label = label.trim();
    if label == "Z" {
        return FixedOffset::east_opt(0).context("zero offset out of range");
    }

    let (sign, rest) = match label.as_bytes().first() {
        Some(b'+') => (1, &label[1..]),
        Some(b'-') => (-1, &label[1..]),
        _ => bail!("timezone {label:?} is neither a zone name nor ±HH:MM"),
    };

    let (hours, minutes) = rest
        .split_once(':')
        .with_context(|| format!("timezone offset {label:?} must be ±HH:MM"))?;
    let hours = two_digits(hours)
        .with_context(|| format!("invalid hours in timezone offset {label:?}"))?;
    let minutes = two_digits(minutes)
        .with_context(|| format!("invalid minutes in timezone offset {label:?}"))?;

    if minutes >= 60 {
        bail!("invalid minutes in timezone offset {label:?}");
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("timezone offset {label:?} out of range"))
}

/// Exactly two ASCII digits; a sign inside a field is rejected.
fn two_digits(field: &str) -> Result<i32> {
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        bail!("expected two digits, got {field:?}");
    }
    Ok(field.parse::<u8>()?.into())
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = AnalyticsConfig::default();
        assert_eq!(cfg.output_dir, "public/data");
        assert_eq!(cfg.timezone, "UTC");
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.indicators.rsi_period, 14);
        assert_eq!(cfg.indicators.macd_fast, 12);
        assert_eq!(cfg.indicators.macd_slow, 26);
        assert_eq!(cfg.indicators.macd_signal, 9);
        assert_eq!(cfg.indicators.bollinger_period, 20);
        assert!((cfg.indicators.bollinger_std_dev - 2.0).abs() < f64::EPSILON);
        assert_eq!(cfg.indicators.volatility_window, 20);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: AnalyticsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.output_dir, "public/data");
        assert_eq!(cfg.indicators, IndicatorParams::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "timezone": "-05:00", "indicators": { "rsi_period": 7 } }"#;
        let cfg: AnalyticsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.timezone, "-05:00");
        assert_eq!(cfg.indicators.rsi_period, 7);
        assert_eq!(cfg.indicators.macd_slow, 26);
        assert_eq!(cfg.output_dir, "public/data");
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(AnalyticsConfig::load("/nonexistent/analytics_config.json").is_err());
    }

    // ---- timezone parsing ------------------------------------------------

    #[test]
    fn zone_utc() {
        assert_eq!(TargetZone::parse("UTC").unwrap(), TargetZone::Named(Tz::UTC));
        assert_eq!(TargetZone::parse("utc").unwrap(), TargetZone::Named(Tz::UTC));
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn zone_iana_names() {
        assert_eq!(
            TargetZone::parse("US/Eastern").unwrap(),
            TargetZone::Named(Tz::US__Eastern)
        );
        assert_eq!(
            TargetZone::parse("America/New_York").unwrap(),
            TargetZone::Named(Tz::America__New_York)
        );
        assert_eq!(TargetZone::parse("US/Eastern").unwrap().to_string(), "US/Eastern");
    }

    #[test]
    fn zone_falls_back_to_fixed_offset() {
        let zone = TargetZone::parse("-05:00").unwrap();
        assert_eq!(zone, TargetZone::Fixed(FixedOffset::west_opt(5 * 3600).unwrap()));
    }

    #[test]
    fn zone_from_config_field() {
        let cfg: AnalyticsConfig =
            serde_json::from_str(r#"{ "timezone": "America/New_York" }"#).unwrap();
        assert_eq!(cfg.target_zone().unwrap(), TargetZone::Named(Tz::America__New_York));
    }

    #[test]
    fn offset_signed() {
        assert_eq!(parse_offset("-05:00").unwrap().local_minus_utc(), -5 * 3600);
        assert_eq!(parse_offset("-05:30").unwrap().local_minus_utc(), -(5 * 3600 + 1800));
        assert_eq!(parse_offset("+05:30").unwrap().local_minus_utc(), 5 * 3600 + 1800);
    }

    #[test]
    fn offset_rejects_signs_inside_fields() {
        assert!(parse_offset("+-05:00").is_err());
        assert!(parse_offset("-+05:00").is_err());
        assert!(parse_offset("+05:-30").is_err());
        assert!(parse_offset("+05:+3").is_err());
    }

    #[test]
    fn offset_rejects_garbage() {
        assert!(TargetZone::parse("Mars/Olympus").is_err());
        assert!(parse_offset("US/Eastern").is_err());
        assert!(parse_offset("+5").is_err());
        assert!(parse_offset("+05:75").is_err());
        assert!(parse_offset("+30:00").is_err());
    }
}
