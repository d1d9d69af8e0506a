// =============================================================================
// Command-line interface
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Price analytics for a single ticker, written as JSON for charting clients.
#[derive(Debug, Parser)]
#[command(name = "price-analytics", version, about)]
pub struct Cli {
    /// Path to the JSON config file.
    #[arg(long, global = true, default_value = "analytics_config.json")]
    pub config: PathBuf,

    /// Override the configured output directory.
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute indicators and statistics; writes `<ticker>_<period>_analytics.json`.
    Analytics(TickerArgs),
    /// Export the raw close series; writes `<ticker>_<period>_output.json`.
    Chart(TickerArgs),
}

#[derive(Debug, Args)]
pub struct TickerArgs {
    /// Ticker symbol, e.g. AAPL.
    pub ticker: String,

    /// Look-back period: 1h, 1d, 1w, 1m, 3m or 6m.
    #[arg(default_value = "1w")]
    pub period: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analytics_with_default_period() {
        let cli = Cli::try_parse_from(["price-analytics", "analytics", "AAPL"]).unwrap();
        match cli.command {
            Command::Analytics(args) => {
                assert_eq!(args.ticker, "AAPL");
                assert_eq!(args.period, "1w");
            }
            Command::Chart(_) => panic!("expected analytics"),
        }
        assert_eq!(cli.config, PathBuf::from("analytics_config.json"));
        assert!(cli.output_dir.is_none());
    }

    #[test]
    fn parses_chart_with_globals() {
        let cli = Cli::try_parse_from([
            "price-analytics",
            "chart",
            "MSFT",
            "3m",
            "--output-dir",
            "/tmp/out",
        ])
        .unwrap();
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
        match cli.command {
            Command::Chart(args) => assert_eq!(args.period, "3m"),
            Command::Analytics(_) => panic!("expected chart"),
        }
    }

    #[test]
    fn ticker_is_required() {
        assert!(Cli::try_parse_from(["price-analytics", "analytics"]).is_err());
    }
}
