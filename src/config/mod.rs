pub mod eval_config;

pub use eval_config::{EvalConfiguration, RsiParams, SmaParams, StrategyParams, StrategyType};
