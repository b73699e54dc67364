pub mod rsi_reversion;
pub mod sma_crossover;

use crate::data::Bar;
use crate::engine::signal::Position;

//strategy interface: maps a daily bar history to a full 0/1 position series
//the engine consumes whole position series, so strategies are pure functions
//of the bar history rather than order emitters
pub trait Strategy {
    //one position per bar, long-only; warmup days are flat
    fn positions(&self, bars: &[Bar]) -> Vec<Position>;

    //returns the strategy name
    fn name(&self) -> &str;
}

//helper function to calculate simple moving average
pub fn sma(prices: &[f64]) -> Option<f64> {
    if prices.is_empty() {
        return None;
    }
    Some(prices.iter().sum::<f64>() / prices.len() as f64)
}

//helper function to calculate relative strength index
pub fn rsi(prices: &[f64], period: usize) -> Option<f64> {
    if prices.len() < period + 1 {
        return None;
    }

    let mut gains = Vec::new();
    let mut losses = Vec::new();

    for i in 1..prices.len() {
        let change = prices[i] - prices[i - 1];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-change);
        }
    }

    if gains.len() < period {
        return None;
    }

    let avg_gain: f64 = gains.iter().rev().take(period).sum::<f64>() / period as f64;
    let avg_loss: f64 = losses.iter().rev().take(period).sum::<f64>() / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_of_empty_slice_is_none() {
        assert!(sma(&[]).is_none());
    }

    #[test]
    fn sma_averages_prices() {
        assert_relative_eq!(sma(&[1.0, 2.0, 3.0]).unwrap(), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn rsi_needs_period_plus_one_prices() {
        assert!(rsi(&[1.0, 2.0], 2).is_none());
        assert!(rsi(&[1.0, 2.0, 3.0], 2).is_some());
    }

    #[test]
    fn rsi_of_pure_gains_is_hundred() {
        let value = rsi(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_relative_eq!(value, 100.0, max_relative = 1e-12);
    }

    #[test]
    fn rsi_of_pure_losses_is_zero() {
        let value = rsi(&[4.0, 3.0, 2.0, 1.0], 3).unwrap();
        assert_relative_eq!(value, 0.0, max_relative = 1e-12);
    }
}
