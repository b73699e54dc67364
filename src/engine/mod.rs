pub mod backtest;
pub mod signal;
pub mod simulator;

pub use backtest::{run_backtest, BacktestConfig, BacktestError, BacktestResult};
pub use signal::{extract_signals, Position, Signal};
pub use simulator::simulate;
