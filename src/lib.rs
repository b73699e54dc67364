//a Rust-based backtest metrics and signal evaluation engine for daily price series

pub mod config;
pub mod data;
pub mod engine;
pub mod metrics;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        EvalConfiguration, RsiParams, SmaParams, StrategyParams, StrategyType,
    };
    pub use crate::data::{load_csv, load_positions_csv, Bar};
    pub use crate::engine::{
        extract_signals, run_backtest, simulate, BacktestConfig, BacktestError, BacktestResult,
        Position, Signal,
    };
    pub use crate::metrics::{build_equity_curve, EquityPoint, SummaryMetrics};
    pub use crate::strategy::{
        rsi_reversion::RsiReversionStrategy, sma_crossover::SmaCrossoverStrategy, Strategy,
    };
}
