//! Aggregate reporter — the whole-run view of model calibration.
//!
//! Collects every reportable magnitude bucket across all pairs, applies a
//! stricter sample floor, and reduces to counts, big-move averages, and a
//! single qualitative recommendation. Pure functions over `PairResult`s —
//! nothing is side-collected during the run.

use serde::{Deserialize, Serialize};

use oddslab_core::EngineParams;

use crate::runner::PairResult;

/// Aggregate deviation tolerance: buckets within this band count as
/// calibrated. Deliberately distinct from the five-way verdict ladder.
const AGGREGATE_TOLERANCE: f64 = 0.03;

/// Magnitude lower bound for the "big move" averages.
const BIG_MOVE_LO_PCT: f64 = 0.25;

/// Averages over the big-move buckets (magnitude range starting at
/// [`BIG_MOVE_LO_PCT`] or higher).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigMoveAverages {
    pub bucket_count: usize,
    pub avg_win_rate: f64,
    pub avg_model_probability: f64,
}

impl BigMoveAverages {
    pub fn avg_deviation(&self) -> f64 {
        self.avg_win_rate - self.avg_model_probability
    }
}

/// Final qualitative call on the strategy, derived from the big-move
/// average win rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Average win rate above 0.55 — profitable at typical quoted odds.
    ViableAtTypicalOdds,
    /// Average win rate in (0.52, 0.55] — needs unusually favorable odds.
    ViableAtFavorableOdds,
    /// Average win rate at or below 0.52.
    NotViable,
    /// No bucket met the big-move and sample-floor criteria. Explicit
    /// result, never an undefined average.
    InsufficientData,
}

impl Recommendation {
    fn from_avg_win_rate(avg_win_rate: f64) -> Self {
        if avg_win_rate > 0.55 {
            Recommendation::ViableAtTypicalOdds
        } else if avg_win_rate > 0.52 {
            Recommendation::ViableAtFavorableOdds
        } else {
            Recommendation::NotViable
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Recommendation::ViableAtTypicalOdds => {
                "win rate above 55% — profitable if typical odds are available"
            }
            Recommendation::ViableAtFavorableOdds => {
                "win rate 52-55% — requires very favorable odds (40% or lower)"
            }
            Recommendation::NotViable => {
                "win rate at or below 52% — not viable under the current model"
            }
            Recommendation::InsufficientData => {
                "insufficient data — no bucket met the big-move sample criteria"
            }
        }
    }
}

/// Whole-run summary over all reportable magnitude buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Buckets meeting the aggregate sample floor.
    pub qualifying_buckets: usize,
    /// Of those, deviation < -0.03.
    pub overestimated: usize,
    /// |deviation| <= 0.03.
    pub calibrated: usize,
    /// deviation > 0.03.
    pub underestimated: usize,
    /// None when no bucket qualifies for the big-move averages.
    pub big_move: Option<BigMoveAverages>,
    pub recommendation: Recommendation,
}

/// Reduce all per-pair magnitude buckets to the aggregate summary.
///
/// Only buckets with `count >= params.min_aggregate_samples` participate;
/// the big-move averages additionally require the bucket's magnitude range
/// to start at 0.25% or higher. When that intersection is empty the average
/// win rate is undefined, so the summary says so explicitly instead of
/// producing a number.
pub fn summarize(pairs: &[PairResult], params: &EngineParams) -> AggregateSummary {
    let qualifying: Vec<_> = pairs
        .iter()
        .flat_map(|p| &p.magnitude_rows)
        .filter(|row| row.bucket.count >= params.min_aggregate_samples)
        .collect();

    let mut overestimated = 0usize;
    let mut calibrated = 0usize;
    let mut underestimated = 0usize;
    for row in &qualifying {
        let d = row.comparison.deviation;
        if d < -AGGREGATE_TOLERANCE {
            overestimated += 1;
        } else if d > AGGREGATE_TOLERANCE {
            underestimated += 1;
        } else {
            calibrated += 1;
        }
    }

    let big: Vec<_> = qualifying
        .iter()
        .filter(|row| row.bucket.lo >= BIG_MOVE_LO_PCT)
        .collect();

    let big_move = if big.is_empty() {
        None
    } else {
        let n = big.len() as f64;
        Some(BigMoveAverages {
            bucket_count: big.len(),
            avg_win_rate: big.iter().map(|r| r.bucket.win_rate).sum::<f64>() / n,
            avg_model_probability: big
                .iter()
                .map(|r| r.comparison.model_probability)
                .sum::<f64>()
                / n,
        })
    };

    let recommendation = match &big_move {
        Some(avgs) => Recommendation::from_avg_win_rate(avgs.avg_win_rate),
        None => Recommendation::InsufficientData,
    };

    AggregateSummary {
        qualifying_buckets: qualifying.len(),
        overestimated,
        calibrated,
        underestimated,
        big_move,
        recommendation,
    }
}
