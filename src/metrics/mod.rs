pub mod summary;
pub mod timeseries;

pub use summary::SummaryMetrics;
pub use timeseries::{build_equity_curve, EquityPoint};
