use crate::data::Bar;
use crate::engine::signal::{extract_signals, Position, Signal};
use crate::metrics::timeseries::{build_equity_curve, daily_ratios, max_drawdown};
use indexmap::IndexMap;
use prettytable::{Cell, Row, Table};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use thiserror::Error;

const TRADING_DAYS_PER_YEAR: f64 = 243.0;
const ANNUAL_RISK_FREE_RATE: f64 = 0.03;
//excursion floors: a window that never moves against (or for) the entry still
//registers a 0.1% tick, keeping the E ratio away from division by zero
const ADVERSE_FLOOR: f64 = -1e-3;
const FAVORABLE_FLOOR: f64 = 1e-3;

#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Length mismatch: {bars} bars vs {equity} equity values vs {positions} positions")]
    LengthMismatch {
        bars: usize,
        equity: usize,
        positions: usize,
    },
    #[error("Empty price series")]
    EmptySeries,
    #[error("Invalid evaluation period: 0 (must be at least 1)")]
    InvalidPeriod,
    #[error("Exit signal on day {day} with no open trade")]
    ExitWithoutEntry { day: usize },
}

//single-row summary report for one backtest
//
//degenerate inputs such as a series with no entries or zero return variance
//leave the affected ratio fields NaN or infinite instead of failing;
//check is_finite before consuming them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub annual_return: f64,
    pub sharpe_ratio: f64,
    pub e_ratio: f64,
    pub mfe_avg: f64,
    pub mae_avg: f64,
    pub total_trading_days: usize,
    pub signal_count: usize,
    pub avg_holding_days: f64,
    pub holding_pct_of_total: f64,
    pub winning_rate: f64,
    pub profit_over_loss_ratio: f64,
    pub max_drawdown: f64,
}

impl SummaryMetrics {
    //evaluates the summary report from bars, the simulated equity curve and
    //the position series; signals are recomputed from positions so there is
    //a single authoritative signal source
    pub fn evaluate(
        bars: &[Bar],
        equity_values: &[f64],
        positions: &[Position],
        period: usize,
    ) -> Result<Self, EvaluationError> {
        if bars.len() != equity_values.len() || bars.len() != positions.len() {
            return Err(EvaluationError::LengthMismatch {
                bars: bars.len(),
                equity: equity_values.len(),
                positions: positions.len(),
            });
        }
        if bars.is_empty() {
            return Err(EvaluationError::EmptySeries);
        }
        if period == 0 {
            return Err(EvaluationError::InvalidPeriod);
        }

        let total_trading_days = bars.len();
        let signals = extract_signals(positions);

        //per-entry excursions over the forward window
        let (mae, mfe) = entry_excursions(bars, &signals, period);

        //sequential day walk: holding runs and trade buckets carry state
        //between days and must run in forward order
        let mut tracker = TradeTracker::default();
        for (i, &signal) in signals.iter().enumerate() {
            let prev_position = if i == 0 { None } else { Some(positions[i - 1]) };
            tracker.observe(i, bars[i].close, signal, prev_position, positions[i])?;
        }

        let dates: Vec<_> = bars.iter().map(|bar| bar.date).collect();
        let curve = build_equity_curve(&dates, equity_values);
        let max_dd = max_drawdown(&curve);

        let mae_avg = mae.as_slice().mean();
        let mfe_avg = mfe.as_slice().mean();
        let e_ratio = mfe_avg / mae_avg;

        let hold_days: Vec<f64> = tracker.hold_days.iter().map(|&d| d as f64).collect();
        let avg_holding_days = hold_days.as_slice().mean();
        let holding_pct_of_total =
            hold_days.iter().sum::<f64>() / total_trading_days as f64;

        let winning_rate = tracker.profits.len() as f64 / tracker.signal_count as f64;
        let profit_over_loss_ratio =
            tracker.profits.as_slice().mean() / tracker.losses.as_slice().mean();

        let annual_return = (equity_values[total_trading_days - 1] / equity_values[0])
            .powf(TRADING_DAYS_PER_YEAR / total_trading_days as f64)
            - 1.0;

        //population deviation of day-over-day value ratios
        let ratios = daily_ratios(equity_values);
        let volatility = ratios.as_slice().population_std_dev();
        let sharpe_ratio =
            (annual_return - ANNUAL_RISK_FREE_RATE) / volatility / TRADING_DAYS_PER_YEAR.sqrt();

        Ok(SummaryMetrics {
            annual_return,
            sharpe_ratio,
            e_ratio,
            mfe_avg,
            mae_avg,
            total_trading_days,
            signal_count: tracker.signal_count,
            avg_holding_days,
            holding_pct_of_total,
            winning_rate,
            profit_over_loss_ratio,
            max_drawdown: max_dd,
        })
    }

    //report rows in presentation order, shared by the table and csv output
    pub fn to_rows(&self) -> IndexMap<&'static str, String> {
        let mut rows = IndexMap::new();
        rows.insert("annual_return", format_value(self.annual_return));
        rows.insert("sharpe_ratio", format_value(self.sharpe_ratio));
        rows.insert("E_ratio", format_value(self.e_ratio));
        rows.insert("MFE_avg", format_value(self.mfe_avg));
        rows.insert("MAE_avg", format_value(self.mae_avg));
        rows.insert("total_trading_days", self.total_trading_days.to_string());
        rows.insert("signal_count", self.signal_count.to_string());
        rows.insert("avg_holding_days", format_value(self.avg_holding_days));
        rows.insert(
            "holding_pct_of_total",
            format_value(self.holding_pct_of_total),
        );
        rows.insert("winning_rate", format_value(self.winning_rate));
        rows.insert(
            "profit_over_loss_ratio",
            format_value(self.profit_over_loss_ratio),
        );
        rows.insert("max_drawdown", format_value(self.max_drawdown));
        rows
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        for (name, value) in self.to_rows() {
            table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value)]));
        }

        table.printstd();
    }
}

fn format_value(value: f64) -> String {
    format!("{:.6}", value)
}

//accumulator threaded through the forward day walk
#[derive(Debug, Default)]
struct TradeTracker {
    hold_days: Vec<u32>,
    profits: Vec<f64>,
    losses: Vec<f64>,
    //single rolling slot: one open trade at a time
    entry_close: Option<f64>,
    signal_count: usize,
}

impl TradeTracker {
    fn observe(
        &mut self,
        day: usize,
        close: f64,
        signal: Signal,
        prev_position: Option<Position>,
        position: Position,
    ) -> Result<(), EvaluationError> {
        //a new holding counter opens on each flat-to-long transition (or a
        //series that starts long); the current run keeps counting while
        //yesterday was long, so the exit day itself still counts
        let entered = position == Position::Long
            && !matches!(prev_position, Some(Position::Long));
        if entered {
            self.hold_days.push(0);
        } else if prev_position == Some(Position::Long) {
            if let Some(last) = self.hold_days.last_mut() {
                *last += 1;
            }
        }

        match signal {
            Signal::Entry => {
                self.entry_close = Some(close);
                self.signal_count += 1;
            }
            Signal::Exit => {
                let entry_close = self
                    .entry_close
                    .ok_or(EvaluationError::ExitWithoutEntry { day })?;
                let gain = close / entry_close - 1.0;
                if gain >= 0.0 {
                    self.profits.push(gain);
                } else {
                    self.losses.push(-gain);
                }
            }
            Signal::Hold => {}
        }

        Ok(())
    }
}

//per-entry forward-window excursions
//only entries with a full window of period bars ahead are measured; each
//window is independent of the others, so the scan runs in parallel
fn entry_excursions(bars: &[Bar], signals: &[Signal], period: usize) -> (Vec<f64>, Vec<f64>) {
    let last_eligible = bars.len().saturating_sub(period);

    (0..last_eligible)
        .into_par_iter()
        .filter(|&i| signals[i] == Signal::Entry)
        .map(|i| {
            let close = bars[i].close;
            let window = &bars[i + 1..=i + period];

            let worst = window
                .iter()
                .map(|bar| bar.low / close - 1.0)
                .fold(f64::INFINITY, f64::min);
            let best = window
                .iter()
                .map(|bar| bar.high / close - 1.0)
                .fold(f64::NEG_INFINITY, f64::max);

            let adverse = worst.min(ADVERSE_FLOOR);
            let favorable = best.max(FAVORABLE_FLOOR);

            (adverse.abs(), favorable)
        })
        .unzip()
}
