//! EngineParams — every tunable the pipeline reads, passed explicitly.
//!
//! Bucket edges, the model table, the odds ladder, and the sample floors are
//! configuration, not literals buried in the math. Defaults reproduce the
//! reference run.

use serde::{Deserialize, Serialize};

use crate::model::ModelTable;
use crate::strategy::EntryFilter;

/// Parameters for one backtest pass. Shared read-only across all
/// (symbol, timeframe) pairs of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Reference probability model under test.
    pub model: ModelTable,
    /// `[lo, hi)` move-magnitude ranges, in percent.
    pub magnitude_buckets: Vec<(f64, f64)>,
    /// `[lo, hi)` elapsed-fraction ranges.
    pub elapsed_buckets: Vec<(f64, f64)>,
    /// Snapshots below this magnitude are excluded from the elapsed-time
    /// table (it only makes sense for moves big enough to bet on).
    pub elapsed_min_magnitude_pct: f64,
    /// Minimum samples for a bucket to be reportable.
    pub min_bucket_samples: usize,
    /// Stricter floor applied by the aggregate reporter.
    pub min_aggregate_samples: usize,
    /// Entry conditions for the EV simulation.
    pub entry_filter: EntryFilter,
    /// Candidate quoted odds (implied win probabilities).
    pub odds_ladder: Vec<f64>,
    /// Bet count for the projected-value figure.
    pub projection_bets: u32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            model: ModelTable::default(),
            magnitude_buckets: vec![
                (0.03, 0.08),
                (0.08, 0.15),
                (0.15, 0.25),
                (0.25, 0.35),
                (0.35, 0.50),
                (0.50, 0.70),
                (0.70, 1.00),
                (1.00, 2.00),
                (2.00, 5.00),
            ],
            elapsed_buckets: vec![
                (0.0, 0.2),
                (0.2, 0.4),
                (0.4, 0.6),
                (0.6, 0.8),
                (0.8, 1.0),
            ],
            elapsed_min_magnitude_pct: 0.10,
            min_bucket_samples: 30,
            min_aggregate_samples: 100,
            entry_filter: EntryFilter::default(),
            odds_ladder: vec![0.45, 0.50, 0.55, 0.60],
            projection_bets: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_reference_run() {
        let params = EngineParams::default();
        assert_eq!(params.magnitude_buckets.len(), 9);
        assert_eq!(params.elapsed_buckets.len(), 5);
        assert_eq!(params.min_bucket_samples, 30);
        assert_eq!(params.min_aggregate_samples, 100);
        assert_eq!(params.odds_ladder, vec![0.45, 0.50, 0.55, 0.60]);
        assert_eq!(params.projection_bets, 1000);
    }

    #[test]
    fn params_serialization_roundtrip() {
        let params = EngineParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let deser: EngineParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, deser);
    }
}
