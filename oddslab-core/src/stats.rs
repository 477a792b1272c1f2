//! Bucketed win-rate estimation and model comparison.
//!
//! Pure functions: snapshot slice and range list in, buckets out. Buckets
//! below the minimum-sample floor are silently skipped, never zero-filled —
//! a thin bucket is an unstable estimate, not an error.

use serde::{Deserialize, Serialize};

use crate::domain::Snapshot;
use crate::model::ModelTable;

/// Which snapshot dimension a range list partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketDimension {
    /// Partition by `magnitude_pct`.
    Magnitude,
    /// Partition by `elapsed_fraction`.
    Elapsed,
}

/// Empirical win-rate estimate over one `[lo, hi)` range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub dimension: BucketDimension,
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
    /// Fraction of member snapshots with `same_direction == true`.
    pub win_rate: f64,
}

impl Bucket {
    /// Representative value for model evaluation.
    pub fn midpoint(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }
}

/// Partition snapshots along one dimension and estimate a win rate per range.
///
/// Membership is half-open: `lo <= value < hi`. Ranges with fewer than
/// `min_samples` members are omitted from the output (this also guards the
/// division for empty ranges). Ranges are assumed non-overlapping; the
/// function does not depend on that, it simply scores each range on its own.
pub fn bucket_by(
    snapshots: &[Snapshot],
    dimension: BucketDimension,
    ranges: &[(f64, f64)],
    min_samples: usize,
) -> Vec<Bucket> {
    ranges
        .iter()
        .filter_map(|&(lo, hi)| {
            let value = |s: &Snapshot| match dimension {
                BucketDimension::Magnitude => s.magnitude_pct,
                BucketDimension::Elapsed => s.elapsed_fraction,
            };
            let mut count = 0usize;
            let mut wins = 0usize;
            for snap in snapshots {
                let v = value(snap);
                if lo <= v && v < hi {
                    count += 1;
                    if snap.same_direction {
                        wins += 1;
                    }
                }
            }
            if count < min_samples || count == 0 {
                return None;
            }
            Some(Bucket {
                dimension,
                lo,
                hi,
                count,
                win_rate: wins as f64 / count as f64,
            })
        })
        .collect()
}

/// How far the empirical rate sits from the model, and what to make of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    /// Model probability at the bucket midpoint.
    pub model_probability: f64,
    /// Signed `win_rate - model_probability`.
    pub deviation: f64,
    pub verdict: Verdict,
}

/// Five-way classification of a model deviation.
///
/// The thresholds partition the real line totally and without overlap.
/// This is a reporting convenience only; nothing feeds it back into the
/// model or the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// deviation < -0.05 — the model claims far more edge than exists.
    OverestimatesStrongly,
    /// -0.05 <= deviation < -0.02.
    OverestimatesSlightly,
    /// |deviation| <= 0.02.
    WellCalibrated,
    /// 0.02 < deviation <= 0.05.
    UnderestimatesSlightly,
    /// deviation > 0.05 — unpriced edge, an opportunity.
    UnderestimatesStrongly,
}

impl Verdict {
    pub fn classify(deviation: f64) -> Self {
        if deviation < -0.05 {
            Verdict::OverestimatesStrongly
        } else if deviation < -0.02 {
            Verdict::OverestimatesSlightly
        } else if deviation <= 0.02 {
            Verdict::WellCalibrated
        } else if deviation <= 0.05 {
            Verdict::UnderestimatesSlightly
        } else {
            Verdict::UnderestimatesStrongly
        }
    }

    /// Short label for report tables.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::OverestimatesStrongly => "model overestimates",
            Verdict::OverestimatesSlightly => "slightly over",
            Verdict::WellCalibrated => "calibrated",
            Verdict::UnderestimatesSlightly => "slightly under",
            Verdict::UnderestimatesStrongly => "underestimated edge",
        }
    }
}

/// Evaluate the model at the bucket's midpoint and classify the deviation.
pub fn compare_to_model(bucket: &Bucket, model: &ModelTable) -> ModelComparison {
    let model_probability = model.probability(bucket.midpoint());
    let deviation = bucket.win_rate - model_probability;
    ModelComparison {
        model_probability,
        deviation,
        verdict: Verdict::classify(deviation),
    }
}
