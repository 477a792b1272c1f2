//! OddsLab CLI — run calibration backtests and render saved reports.
//!
//! Commands:
//! - `run` — fetch 1-minute bars from Binance, backtest every configured
//!   (symbol, timeframe) pair, print the report, save artifacts
//! - `report` — re-render a previously saved `report.json`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use oddslab_core::data::BinanceProvider;
use oddslab_runner::config::SymbolConfig;
use oddslab_runner::{export_buckets_csv, render_report, run_all, save_report, RunConfig, RunReport};

#[derive(Parser)]
#[command(
    name = "oddslab",
    about = "OddsLab — candle-direction probability calibration backtester"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch bars, run the backtest, print and save the report.
    Run {
        /// Path to a TOML config file. Defaults cover BTC/ETH/SOL/XRP at
        /// 5M/15M/1H over 30 days.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the lookback window in days.
        #[arg(long)]
        days: Option<u32>,

        /// Override the symbol list (exchange symbols, e.g. BTCUSDT).
        /// Labels are derived by stripping the USDT suffix.
        #[arg(long, num_args = 1..)]
        symbols: Option<Vec<String>>,

        /// Evaluate pairs sequentially instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Output directory for report.json (and buckets.csv with --csv).
        #[arg(long, default_value = "results")]
        out: PathBuf,

        /// Also export all magnitude buckets as CSV.
        #[arg(long, default_value_t = false)]
        csv: bool,
    },
    /// Render a saved report.json to the console.
    Report {
        /// Path to a report.json produced by `run`.
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            days,
            symbols,
            sequential,
            out,
            csv,
        } => cmd_run(config, days, symbols, sequential, &out, csv),
        Commands::Report { path } => cmd_report(&path),
    }
}

fn cmd_run(
    config_path: Option<PathBuf>,
    days: Option<u32>,
    symbols: Option<Vec<String>>,
    sequential: bool,
    out_dir: &Path,
    csv: bool,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => RunConfig::default(),
    };

    if let Some(days) = days {
        config.lookback_days = days;
    }
    if let Some(symbols) = symbols {
        config.symbols = symbols
            .iter()
            .map(|s| SymbolConfig::new(s, s.trim_end_matches("USDT")))
            .collect();
    }

    let provider = BinanceProvider::new();
    println!(
        "Fetching {} bars for {} symbol(s), last {} days...",
        config.interval,
        config.symbols.len(),
        config.lookback_days
    );

    let report = run_all(&config, &provider, !sequential);

    print!("{}", render_report(&report));

    let json_path = save_report(&report, out_dir)?;
    println!("\nReport saved to: {}", json_path.display());
    if csv {
        let csv_path = export_buckets_csv(&report, out_dir)?;
        println!("Buckets saved to: {}", csv_path.display());
    }

    Ok(())
}

fn cmd_report(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading report from {}", path.display()))?;
    let report: RunReport =
        serde_json::from_str(&content).context("parsing report JSON")?;
    print!("{}", render_report(&report));
    Ok(())
}
