use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

//a point in the equity curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
    pub drawdown: f64,
    pub returns: f64,
}

impl EquityPoint {
    pub fn new(date: NaiveDate, equity: f64, drawdown: f64, returns: f64) -> Self {
        EquityPoint {
            date,
            equity,
            drawdown,
            returns,
        }
    }
}

//builds the dated equity curve with running-peak drawdowns
//the peak starts at the first equity value
pub fn build_equity_curve(dates: &[NaiveDate], equity_values: &[f64]) -> Vec<EquityPoint> {
    let mut curve = Vec::with_capacity(dates.len());
    let mut peak = equity_values.first().copied().unwrap_or(0.0);
    let mut prev_equity = peak;

    for (i, (&date, &equity)) in dates.iter().zip(equity_values.iter()).enumerate() {
        //update peak
        if equity > peak {
            peak = equity;
        }

        //calculate drawdown
        let drawdown = if peak > 0.0 { 1.0 - equity / peak } else { 0.0 };

        //calculate returns
        let returns = if i == 0 {
            0.0
        } else {
            equity / prev_equity - 1.0
        };

        curve.push(EquityPoint::new(date, equity, drawdown, returns));
        prev_equity = equity;
    }

    curve
}

//maximum drawdown over an equity curve
pub fn max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    equity_curve
        .iter()
        .map(|point| point.drawdown)
        .fold(0.0, f64::max)
}

//day-over-day value ratios equity[i]/equity[i-1]
pub fn daily_ratios(equity_values: &[f64]) -> Vec<f64> {
    if equity_values.len() < 2 {
        return vec![];
    }

    let mut ratios = Vec::with_capacity(equity_values.len() - 1);
    for i in 1..equity_values.len() {
        ratios.push(equity_values[i] / equity_values[i - 1]);
    }
    ratios
}
