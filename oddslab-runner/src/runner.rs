//! Run driver — wires bar source, pipeline, and aggregate reporter.
//!
//! Two entry points:
//! - `run_pair()`: pure per-(symbol, timeframe) pipeline on pre-fetched
//!   bars. No I/O, trivially parallel.
//! - `run_all()`: fetches each symbol's bars once, evaluates every
//!   timeframe against them (rayon across pairs), then aggregates.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use oddslab_core::data::{BarProvider, DataError};
use oddslab_core::domain::Timeframe;
use oddslab_core::reaggregate::reaggregate;
use oddslab_core::snapshots::extract_snapshots;
use oddslab_core::stats::{compare_to_model, ModelComparison};
use oddslab_core::strategy::simulate;
use oddslab_core::{bucket_by, Bar, Bucket, BucketDimension, EngineParams, StrategyResult};

use crate::aggregate::{self, AggregateSummary};
use crate::config::{ConfigError, RunConfig, RunId};

/// Errors from the runner. Per-symbol fetch failures are not here — they
/// degrade to warnings so one bad instrument cannot abort the run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("artifact error: {0}")]
    Artifact(#[from] std::io::Error),
}

/// A reportable magnitude bucket together with its model comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeBucketRow {
    #[serde(flatten)]
    pub bucket: Bucket,
    #[serde(flatten)]
    pub comparison: ModelComparison,
}

/// Everything computed for one (symbol, timeframe) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    pub symbol_label: String,
    pub timeframe: Timeframe,
    pub candle_count: usize,
    pub snapshot_count: usize,
    /// Win rate per move-magnitude range, with model verdicts.
    pub magnitude_rows: Vec<MagnitudeBucketRow>,
    /// Win rate per elapsed-time range, over moves past the magnitude floor.
    pub elapsed_rows: Vec<Bucket>,
    /// EV projection per candidate odds.
    pub strategy: Vec<StrategyResult>,
}

/// Complete result of one run: per-pair tables plus the aggregate summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub generated_at: String,
    pub config: RunConfig,
    pub pairs: Vec<PairResult>,
    pub aggregate: AggregateSummary,
    /// Per-symbol fetch failures, reported but non-fatal.
    pub warnings: Vec<String>,
}

/// Run the full pipeline for one pair. Pure: bars in, tables out.
pub fn run_pair(
    bars: &[Bar],
    symbol_label: &str,
    timeframe: &Timeframe,
    params: &EngineParams,
) -> PairResult {
    let candles = reaggregate(bars, timeframe.minutes);
    let snapshots: Vec<_> = candles.iter().flat_map(extract_snapshots).collect();

    let magnitude_rows = bucket_by(
        &snapshots,
        BucketDimension::Magnitude,
        &params.magnitude_buckets,
        params.min_bucket_samples,
    )
    .into_iter()
    .map(|bucket| {
        let comparison = compare_to_model(&bucket, &params.model);
        MagnitudeBucketRow { bucket, comparison }
    })
    .collect();

    // Elapsed-time table only over moves big enough to bet on.
    let big_moves: Vec<_> = snapshots
        .iter()
        .copied()
        .filter(|s| s.magnitude_pct >= params.elapsed_min_magnitude_pct)
        .collect();
    let elapsed_rows = bucket_by(
        &big_moves,
        BucketDimension::Elapsed,
        &params.elapsed_buckets,
        params.min_bucket_samples,
    );

    let strategy = simulate(
        &snapshots,
        &params.entry_filter,
        &params.odds_ladder,
        params.projection_bets,
    );

    PairResult {
        symbol_label: symbol_label.to_string(),
        timeframe: timeframe.clone(),
        candle_count: candles.len(),
        snapshot_count: snapshots.len(),
        magnitude_rows,
        elapsed_rows,
        strategy,
    }
}

/// Fetch and evaluate every configured pair, then aggregate.
///
/// Bars are fetched sequentially per symbol (the provider owns the rate
/// limit); pair evaluation fans out on rayon when `parallel` is set. A
/// symbol whose fetch fails contributes a warning and zero pairs — the run
/// carries on, and the aggregate treats the missing data exactly like
/// sparse real data.
pub fn run_all(config: &RunConfig, provider: &dyn BarProvider, parallel: bool) -> RunReport {
    let mut warnings = Vec::new();
    let mut fetched: Vec<(String, Vec<Bar>)> = Vec::new();

    for sym in &config.symbols {
        match provider.fetch_bars(&sym.symbol, &config.interval, config.lookback_days) {
            Ok(bars) => fetched.push((sym.label.clone(), bars)),
            Err(e) => warnings.push(format!("{}: fetch failed: {e}", sym.label)),
        }
    }

    let jobs: Vec<(&str, &[Bar], &Timeframe)> = fetched
        .iter()
        .flat_map(|(label, bars)| {
            config
                .timeframes
                .iter()
                .map(move |tf| (label.as_str(), bars.as_slice(), tf))
        })
        .collect();

    let evaluate = |&(label, bars, tf): &(&str, &[Bar], &Timeframe)| {
        run_pair(bars, label, tf, &config.params)
    };

    let pairs: Vec<PairResult> = if parallel {
        jobs.par_iter().map(evaluate).collect()
    } else {
        jobs.iter().map(evaluate).collect()
    };

    let aggregate = aggregate::summarize(&pairs, &config.params);

    RunReport {
        run_id: config.run_id(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        config: config.clone(),
        pairs,
        aggregate,
        warnings,
    }
}
