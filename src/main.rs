use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sigeval::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sigeval")]
#[command(about = "A Rust-based backtest metrics engine for daily price series", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a backtest evaluation
    Run {
        //path to json configuration file (overrides the other options)
        #[arg(long)]
        config: Option<PathBuf>,

        //path to csv data file with date,open,high,low,close columns
        #[arg(long)]
        data: Option<PathBuf>,

        //path to csv file with a 0/1 position column aligned with the data
        #[arg(long)]
        positions: Option<PathBuf>,

        //strategy generating positions when no positions file is given (sma, rsi)
        #[arg(long)]
        strategy: Option<String>,

        //sma strategy parameters
        //fast sma window (for sma strategy)
        #[arg(long)]
        fast: Option<usize>,

        //slow sma window (for sma strategy)
        #[arg(long)]
        slow: Option<usize>,

        //rsi strategy parameters
        //rsi lookback period (for rsi strategy)
        #[arg(long)]
        rsi_lookback: Option<usize>,

        //rsi oversold threshold (for rsi strategy)
        #[arg(long)]
        rsi_lower: Option<f64>,

        //rsi overbought threshold (for rsi strategy)
        #[arg(long)]
        rsi_upper: Option<f64>,

        //round-trip transaction cost charged on every position change
        #[arg(long, default_value = "0.001")]
        cost: f64,

        //forward window in days for excursion measurement
        #[arg(long, default_value = "10")]
        period: usize,

        //output options
        //output path for equity curve csv
        #[arg(long)]
        output_equity_csv: Option<PathBuf>,

        //output path for the report csv
        #[arg(long)]
        output_report_csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            data,
            positions,
            strategy,
            fast,
            slow,
            rsi_lookback,
            rsi_lower,
            rsi_upper,
            cost,
            period,
            output_equity_csv,
            output_report_csv,
        } => {
            let configuration = match config {
                Some(path) => EvalConfiguration::from_json_file(&path)
                    .context(format!("Failed to load configuration from {:?}", path))?,
                None => build_configuration(
                    data,
                    positions,
                    strategy,
                    fast,
                    slow,
                    rsi_lookback,
                    rsi_lower,
                    rsi_upper,
                    cost,
                    period,
                    output_equity_csv,
                    output_report_csv,
                )?,
            };

            run_evaluation(&configuration)?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_configuration(
    data: Option<PathBuf>,
    positions: Option<PathBuf>,
    strategy: Option<String>,
    fast: Option<usize>,
    slow: Option<usize>,
    rsi_lookback: Option<usize>,
    rsi_lower: Option<f64>,
    rsi_upper: Option<f64>,
    cost: f64,
    period: usize,
    output_equity_csv: Option<PathBuf>,
    output_report_csv: Option<PathBuf>,
) -> Result<EvalConfiguration> {
    let data_path = data.ok_or_else(|| anyhow::anyhow!("--data required without --config"))?;

    //the position source is either a csv column or a named strategy
    let (strategy_type, strategy_params) = if positions.is_some() {
        //placeholder strategy settings, unused when positions come from csv
        (
            StrategyType::SmaCrossover,
            StrategyParams::Sma(SmaParams::default()),
        )
    } else {
        let name = strategy
            .ok_or_else(|| anyhow::anyhow!("either --positions or --strategy required"))?;
        let strategy_type = StrategyType::parse(&name)
            .ok_or_else(|| anyhow::anyhow!("Unknown strategy: {}", name))?;

        let params = match strategy_type {
            StrategyType::SmaCrossover => {
                let fast =
                    fast.ok_or_else(|| anyhow::anyhow!("--fast required for SMA strategy"))?;
                let slow =
                    slow.ok_or_else(|| anyhow::anyhow!("--slow required for SMA strategy"))?;
                StrategyParams::Sma(SmaParams {
                    fast_window: fast,
                    slow_window: slow,
                })
            }
            StrategyType::RsiReversion => StrategyParams::Rsi(RsiParams {
                lookback: rsi_lookback.unwrap_or(14),
                oversold: rsi_lower.unwrap_or(30.0),
                overbought: rsi_upper.unwrap_or(70.0),
            }),
        };

        (strategy_type, params)
    };

    Ok(EvalConfiguration {
        data_path,
        positions_path: positions,
        strategy_type,
        strategy_params,
        cost,
        period,
        output_equity_csv,
        output_report_csv,
    })
}

fn run_evaluation(config: &EvalConfiguration) -> Result<()> {
    println!("Sigeval Backtest Metrics Engine");
    println!("===============================\n");

    //load data
    println!("Loading data from {:?}...", config.data_path);
    let bars = load_csv(&config.data_path).context(format!(
        "Failed to load data from {:?}",
        config.data_path
    ))?;

    if bars.is_empty() {
        anyhow::bail!("No bars found in {:?}", config.data_path);
    }

    println!("Loaded {} bars", bars.len());
    println!(
        "Date range: {} to {}\n",
        bars.first().unwrap().date,
        bars.last().unwrap().date
    );

    //resolve positions
    let positions = match &config.positions_path {
        Some(path) => {
            println!("Positions: {:?}", path);
            load_positions_csv(path)
                .context(format!("Failed to load positions from {:?}", path))?
        }
        None => {
            let strategy = config.strategy_params.to_strategy();
            println!("Strategy: {}", strategy.name());
            strategy.positions(&bars)
        }
    };

    println!("Transaction cost: {}", config.cost);
    println!("Evaluation period: {} days\n", config.period);

    //run evaluation
    println!("Running evaluation...\n");
    let backtest_config = BacktestConfig {
        cost: config.cost,
        period: config.period,
    };
    let result = run_backtest(&bars, &positions, &backtest_config)?;

    //display results
    println!("Evaluation Results");
    println!("==================\n");
    result.summary.pretty_print_table();

    //save outputs if requested
    if let Some(equity_path) = &config.output_equity_csv {
        save_equity_csv(&result.equity_curve, &result.signals, equity_path)?;
        println!("\nEquity curve saved to {:?}", equity_path);
    }

    if let Some(report_path) = &config.output_report_csv {
        save_report_csv(&result.summary, report_path)?;
        println!("Report saved to {:?}", report_path);
    }

    Ok(())
}

fn save_equity_csv(
    equity_curve: &[EquityPoint],
    signals: &[Signal],
    path: &PathBuf,
) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "date,equity,drawdown,returns,signal")?;

    for (point, signal) in equity_curve.iter().zip(signals.iter()) {
        writeln!(
            file,
            "{},{},{},{},{}",
            point.date,
            point.equity,
            point.drawdown,
            point.returns,
            signal.as_int()
        )?;
    }

    Ok(())
}

fn save_report_csv(summary: &SummaryMetrics, path: &PathBuf) -> Result<()> {
    use std::io::Write;

    let rows = summary.to_rows();
    let mut file = std::fs::File::create(path)?;

    let header: Vec<&str> = rows.keys().copied().collect();
    writeln!(file, "{}", header.join(","))?;

    let values: Vec<String> = rows.values().cloned().collect();
    writeln!(file, "{}", values.join(","))?;

    Ok(())
}
