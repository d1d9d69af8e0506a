pub mod chart;
pub mod yahoo;

// Re-export the loader for convenient access (e.g. `use crate::market_data::YahooClient`).
pub use chart::build_chart_data;
pub use yahoo::YahooClient;
