// =============================================================================
// Statistics Module
// =============================================================================
//
// Whole-series metrics reported next to the technical indicators:
// - Descriptive statistics (location, spread, percentiles)
// - Annualised return volatility
// - Linear-regression trend
// - Momentum-based next-price heuristic

pub mod descriptive;
pub mod prediction;
pub mod trend;
pub mod volatility;

pub use descriptive::{describe, Statistics};
pub use prediction::{predict_next_price, Prediction};
pub use trend::{calculate_trend, Trend};
pub use volatility::calculate_volatility;
