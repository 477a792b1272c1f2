//! ModelTable — the reference probability model under test.
//!
//! A step function from observed move magnitude to assumed win probability:
//! the probability of the largest threshold not exceeding the magnitude, with
//! a fixed floor below the smallest threshold. This is the null hypothesis
//! the empirical win rates are compared against.

use serde::{Deserialize, Serialize};

/// One step of the model: at `threshold_pct` and above, assume `probability`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelStep {
    pub threshold_pct: f64,
    pub probability: f64,
}

/// Piecewise-constant probability model over move magnitude.
///
/// Steps are strictly increasing in `threshold_pct`. Lookup is a binary
/// search for the last step whose threshold does not exceed the magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTable {
    pub floor_probability: f64,
    pub steps: Vec<ModelStep>,
}

impl ModelTable {
    /// Build a table from `(threshold_pct, probability)` pairs.
    ///
    /// Panics if thresholds are not strictly increasing; the table is always
    /// constructed from configuration, never from market data.
    pub fn new(floor_probability: f64, pairs: &[(f64, f64)]) -> Self {
        let steps: Vec<ModelStep> = pairs
            .iter()
            .map(|&(threshold_pct, probability)| ModelStep {
                threshold_pct,
                probability,
            })
            .collect();
        assert!(
            steps
                .windows(2)
                .all(|w| w[0].threshold_pct < w[1].threshold_pct),
            "model thresholds must be strictly increasing"
        );
        Self {
            floor_probability,
            steps,
        }
    }

    /// Probability of the largest threshold not exceeding `magnitude_pct`,
    /// or the floor when the magnitude sits below every threshold.
    pub fn probability(&self, magnitude_pct: f64) -> f64 {
        let idx = self
            .steps
            .partition_point(|step| step.threshold_pct <= magnitude_pct);
        if idx == 0 {
            self.floor_probability
        } else {
            self.steps[idx - 1].probability
        }
    }
}

impl Default for ModelTable {
    /// The production odds-gap model table.
    fn default() -> Self {
        Self::new(
            0.51,
            &[
                (0.05, 0.51),
                (0.08, 0.52),
                (0.10, 0.54),
                (0.15, 0.57),
                (0.25, 0.61),
                (0.35, 0.66),
                (0.50, 0.73),
                (0.70, 0.80),
                (1.00, 0.85),
            ],
        )
    }
}
