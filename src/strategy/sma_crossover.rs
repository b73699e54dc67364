use crate::data::Bar;
use crate::engine::signal::Position;
use crate::strategy::{sma, Strategy};

//sma crossover regime strategy
//long while the fast sma sits above the slow sma, flat otherwise
#[derive(Debug, Clone)]
pub struct SmaCrossoverStrategy {
    fast_window: usize,
    slow_window: usize,
}

impl SmaCrossoverStrategy {
    pub fn new(fast_window: usize, slow_window: usize) -> Self {
        SmaCrossoverStrategy {
            fast_window,
            slow_window,
        }
    }
}

impl Default for SmaCrossoverStrategy {
    fn default() -> Self {
        SmaCrossoverStrategy::new(20, 50)
    }
}

impl Strategy for SmaCrossoverStrategy {
    fn positions(&self, bars: &[Bar]) -> Vec<Position> {
        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        let mut positions = Vec::with_capacity(bars.len());

        for i in 0..closes.len() {
            //need at least slow_window bars to calculate
            if i + 1 < self.slow_window {
                positions.push(Position::Flat);
                continue;
            }

            let window = &closes[i + 1 - self.slow_window..=i];
            let fast_slice = &window[window.len().saturating_sub(self.fast_window)..];

            let position = match (sma(fast_slice), sma(window)) {
                (Some(fast), Some(slow)) if fast > slow => Position::Long,
                _ => Position::Flat,
            };
            positions.push(position);
        }

        positions
    }

    fn name(&self) -> &str {
        "SMA Crossover"
    }
}
