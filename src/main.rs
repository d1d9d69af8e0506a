// =============================================================================
// Price Analytics: Main Entry Point
// =============================================================================
//
// One invocation = one ticker, one period, one document.  The loader fetches
// the close series, the engines run synchronously over it, and the result is
// written to the output directory.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod cli;
mod indicators;
mod market_data;
mod output;
mod report;
mod runtime_config;
mod statistics;
mod types;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, TickerArgs};
use crate::market_data::{build_chart_data, YahooClient};
use crate::report::build_report;
use crate::runtime_config::{AnalyticsConfig, TargetZone};
use crate::types::{ChartPeriod, PriceSeries};

#[tokio::main]
async fn main() {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %format!("{e:#}"), "analytics run failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // ── 2. Config ────────────────────────────────────────────────────────
    let mut config = AnalyticsConfig::load(&cli.config).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AnalyticsConfig::default()
    });

    if let Ok(dir) = std::env::var("ANALYTICS_OUTPUT_DIR") {
        config.output_dir = dir;
    }
    if let Ok(tz) = std::env::var("ANALYTICS_TIMEZONE") {
        config.timezone = tz;
    }
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));

    // ── 3. Loader ────────────────────────────────────────────────────────
    let client = YahooClient::new(
        config.yahoo_base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;

    match cli.command {
        Command::Analytics(args) => {
            let period = resolve_period(&args);
            info!(ticker = %args.ticker, %period, "computing analytics");

            let series = client.fetch_series(&args.ticker, period).await?;
            let document = build_report(&series.closes(), &config.indicators);
            if document.report().is_none() {
                warn!(ticker = %args.ticker, points = series.len(), "series too short for a report");
            }

            let file_name = output::analytics_file_name(&args.ticker, &args.period);
            output::write_json(&output_dir, &file_name, &document)?;
            println!("Analytics for {} saved to {}", args.ticker, file_name);
        }
        Command::Chart(args) => {
            let period = resolve_period(&args);
            let zone = config.target_zone()?;
            info!(ticker = %args.ticker, %period, timezone = %zone, "exporting chart data");

            // The chart view degrades to an empty document rather than failing.
            let series = client
                .fetch_series(&args.ticker, period)
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %format!("{e:#}"), "chart download failed");
                    PriceSeries::default()
                });
            if series.is_empty() {
                warn!(ticker = %args.ticker, "provider returned no prices, writing empty chart");
            }
            let chart = match zone {
                TargetZone::Named(tz) => build_chart_data(&series, period, &tz),
                TargetZone::Fixed(offset) => build_chart_data(&series, period, &offset),
            };

            let file_name = output::chart_file_name(&args.ticker, &args.period);
            output::write_json(&output_dir, &file_name, &chart)?;
            println!("Stock data for {} saved to {}", args.ticker, file_name);
        }
    }

    Ok(())
}

/// Map the period label to a request window; unknown labels fall back to one
/// week but keep their label for the file name.
fn resolve_period(args: &TickerArgs) -> ChartPeriod {
    ChartPeriod::parse(&args.period).unwrap_or_else(|| {
        warn!(period = %args.period, "unknown period, using 1w request window");
        ChartPeriod::default()
    })
}
