//! Snapshot — one intra-candle observation.

use serde::{Deserialize, Serialize};

/// An observation taken at one member bar inside a valid candle: how far
/// price has moved from the candle open, how much of the candle has elapsed,
/// and whether that partial move ended up pointing the same way the candle
/// finally closed.
///
/// Snapshots are derived, immutable, and consumed once by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Fraction of the candle elapsed at this bar's close, in (0, 1].
    pub elapsed_fraction: f64,
    /// Absolute move from candle open to this bar's close, in percent.
    /// Always >= the noise floor (0.001) by construction.
    pub magnitude_pct: f64,
    /// True iff the partial move's sign matches the candle's final sign.
    pub same_direction: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serialization_roundtrip() {
        let snap = Snapshot {
            elapsed_fraction: 0.4,
            magnitude_pct: 0.12,
            same_direction: true,
        };
        let json = serde_json::to_string(&snap).unwrap();
        let deser: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, deser);
    }
}
