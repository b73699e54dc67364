use crate::data::Bar;
use crate::engine::signal::{extract_signals, Position, Signal};
use crate::engine::simulator::{simulate, SimulationError};
use crate::metrics::summary::{EvaluationError, SummaryMetrics};
use crate::metrics::timeseries::{build_equity_curve, EquityPoint};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacktestError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

//configuration for a backtest evaluation
#[derive(Debug, Clone)]
pub struct BacktestConfig {
    //round-trip transaction cost charged on every position change
    pub cost: f64,
    //forward window in days for excursion measurement
    pub period: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            cost: 0.001,
            period: 10,
        }
    }
}

//result of a backtest evaluation
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub summary: SummaryMetrics,
    pub equity_curve: Vec<EquityPoint>,
    pub signals: Vec<Signal>,
}

//runs the full pipeline: simulate the equity curve from closes and positions,
//derive signals, and evaluate the summary report
pub fn run_backtest(
    bars: &[Bar],
    positions: &[Position],
    config: &BacktestConfig,
) -> Result<BacktestResult, BacktestError> {
    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    let equity_values = simulate(&closes, positions, config.cost)?;

    let summary = SummaryMetrics::evaluate(bars, &equity_values, positions, config.period)?;

    let dates: Vec<_> = bars.iter().map(|bar| bar.date).collect();
    let equity_curve = build_equity_curve(&dates, &equity_values);
    let signals = extract_signals(positions);

    Ok(BacktestResult {
        summary,
        equity_curve,
        signals,
    })
}
