use crate::engine::signal::Position;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Length mismatch: {prices} prices vs {positions} positions")]
    LengthMismatch { prices: usize, positions: usize },
    #[error("Empty price series")]
    EmptySeries,
    #[error("Negative transaction cost: {0}")]
    NegativeCost(f64),
}

//simulates the cumulative strategy value over a daily close series
//
//day 0 starts at the first close, charged the transaction cost if the
//series opens already in position; each later day compounds the close-to-close
//return earned on the position carried over from the previous day, then pays
//the turnover cost for any position change made that day
pub fn simulate(
    closes: &[f64],
    positions: &[Position],
    cost: f64,
) -> Result<Vec<f64>, SimulationError> {
    if closes.len() != positions.len() {
        return Err(SimulationError::LengthMismatch {
            prices: closes.len(),
            positions: positions.len(),
        });
    }
    if closes.is_empty() {
        return Err(SimulationError::EmptySeries);
    }
    if cost < 0.0 {
        return Err(SimulationError::NegativeCost(cost));
    }

    let mut curve = Vec::with_capacity(closes.len());
    //weight carried over from the previous day, 0 before the first day
    let mut held = 0.0;

    for i in 0..closes.len() {
        if i == 0 {
            curve.push(closes[0] * (1.0 - positions[0].weight() * cost));
        } else {
            //return on yesterday's decision, not today's
            let daily_return = (closes[i] / closes[i - 1] - 1.0) * held;
            let turnover = (positions[i].weight() - positions[i - 1].weight()).abs();
            let daily_cost = turnover * cost;

            let prev = curve[i - 1];
            curve.push(prev * (1.0 + daily_return) * (1.0 - daily_cost));
        }

        //held updates only after the day's return is applied
        held = positions[i].weight();
    }

    Ok(curve)
}
