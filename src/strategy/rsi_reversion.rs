use crate::data::Bar;
use crate::engine::signal::Position;
use crate::strategy::{rsi, Strategy};

//rsi mean reversion strategy, long-only
//enters when rsi drops below the oversold threshold, exits when rsi rises
//above the overbought threshold, holds through the neutral zone
#[derive(Debug, Clone)]
pub struct RsiReversionStrategy {
    lookback: usize,
    oversold: f64,
    overbought: f64,
}

impl RsiReversionStrategy {
    pub fn new(lookback: usize, oversold: f64, overbought: f64) -> Self {
        RsiReversionStrategy {
            lookback,
            oversold,
            overbought,
        }
    }
}

impl Default for RsiReversionStrategy {
    fn default() -> Self {
        RsiReversionStrategy::new(14, 30.0, 70.0)
    }
}

impl Strategy for RsiReversionStrategy {
    fn positions(&self, bars: &[Bar]) -> Vec<Position> {
        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        let mut positions = Vec::with_capacity(bars.len());
        let mut holding = false;

        for i in 0..closes.len() {
            //need at least lookback + 1 bars for rsi calculation
            if i < self.lookback {
                positions.push(Position::Flat);
                continue;
            }

            let window = &closes[i - self.lookback..=i];
            if let Some(value) = rsi(window, self.lookback) {
                if value < self.oversold {
                    holding = true;
                } else if value > self.overbought {
                    holding = false;
                }
                //between the thresholds the current state carries over
            }

            positions.push(if holding {
                Position::Long
            } else {
                Position::Flat
            });
        }

        positions
    }

    fn name(&self) -> &str {
        "RSI Reversion"
    }
}
