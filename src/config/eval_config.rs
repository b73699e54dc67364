use crate::strategy::rsi_reversion::RsiReversionStrategy;
use crate::strategy::sma_crossover::SmaCrossoverStrategy;
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

//strategy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyType {
    SmaCrossover,
    RsiReversion,
}

impl StrategyType {
    //parse strategy type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sma" | "sma_crossover" => Some(StrategyType::SmaCrossover),
            "rsi" | "rsi_reversion" => Some(StrategyType::RsiReversion),
            _ => None,
        }
    }
}

//sma crossover strategy parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmaParams {
    pub fast_window: usize,
    pub slow_window: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        SmaParams {
            fast_window: 20,
            slow_window: 50,
        }
    }
}

//rsi reversion strategy parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiParams {
    pub lookback: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        RsiParams {
            lookback: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

//strategy-specific parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StrategyParams {
    Sma(SmaParams),
    Rsi(RsiParams),
}

impl StrategyParams {
    //converts to a boxed strategy
    pub fn to_strategy(&self) -> Box<dyn Strategy> {
        match self {
            StrategyParams::Sma(params) => Box::new(SmaCrossoverStrategy::new(
                params.fast_window,
                params.slow_window,
            )),
            StrategyParams::Rsi(params) => Box::new(RsiReversionStrategy::new(
                params.lookback,
                params.oversold,
                params.overbought,
            )),
        }
    }
}

//complete evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfiguration {
    //data
    pub data_path: PathBuf,

    //position series source: a csv file takes precedence over the strategy
    pub positions_path: Option<PathBuf>,
    pub strategy_type: StrategyType,
    pub strategy_params: StrategyParams,

    //evaluation settings
    pub cost: f64,
    pub period: usize,

    //optional output paths
    pub output_equity_csv: Option<PathBuf>,
    pub output_report_csv: Option<PathBuf>,
}

impl Default for EvalConfiguration {
    fn default() -> Self {
        EvalConfiguration {
            data_path: PathBuf::from("data.csv"),
            positions_path: None,
            strategy_type: StrategyType::SmaCrossover,
            strategy_params: StrategyParams::Sma(SmaParams::default()),
            cost: 0.001,
            period: 10,
            output_equity_csv: None,
            output_report_csv: None,
        }
    }
}

impl EvalConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: EvalConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognizes_aliases() {
        assert_eq!(StrategyType::parse("sma"), Some(StrategyType::SmaCrossover));
        assert_eq!(
            StrategyType::parse("SMA_Crossover"),
            Some(StrategyType::SmaCrossover)
        );
        assert_eq!(StrategyType::parse("rsi"), Some(StrategyType::RsiReversion));
        assert_eq!(StrategyType::parse("macd"), None);
    }

    #[test]
    fn params_build_named_strategies() {
        let sma = StrategyParams::Sma(SmaParams::default()).to_strategy();
        assert_eq!(sma.name(), "SMA Crossover");

        let rsi = StrategyParams::Rsi(RsiParams::default()).to_strategy();
        assert_eq!(rsi.name(), "RSI Reversion");
    }

    #[test]
    fn default_configuration() {
        let config = EvalConfiguration::default();
        assert!(config.positions_path.is_none());
        assert!((config.cost - 0.001).abs() < f64::EPSILON);
        assert_eq!(config.period, 10);
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = EvalConfiguration::default();
        config.cost = 0.002;
        config.period = 5;
        config.positions_path = Some(PathBuf::from("positions.csv"));
        config.to_json_file(&path).unwrap();

        let loaded = EvalConfiguration::from_json_file(&path).unwrap();
        assert!((loaded.cost - 0.002).abs() < f64::EPSILON);
        assert_eq!(loaded.period, 5);
        assert_eq!(loaded.positions_path, Some(PathBuf::from("positions.csv")));
    }
}
