//! Snapshot extraction — one observation per member bar of a valid candle.

use crate::domain::{Snapshot, SyntheticCandle};

/// Moves smaller than this (in percent) are noise, not a directional signal.
pub const NOISE_FLOOR_PCT: f64 = 0.001;

/// Extract snapshots from one valid candle.
///
/// For the member bar at zero-based position `i` of a D-minute candle:
/// - `elapsed_fraction = (i + 1) / D` — the fraction of the candle elapsed
///   once that bar has closed, so it lands in (0, 1];
/// - `magnitude_pct = |bar.close - open| / open * 100`;
/// - `same_direction` compares the sign of the partial move against the sign
///   of the full candle move.
///
/// Bars whose move is below [`NOISE_FLOOR_PCT`] are skipped.
pub fn extract_snapshots(candle: &SyntheticCandle) -> Vec<Snapshot> {
    debug_assert!(candle.is_valid());

    let open = candle.open();
    let final_up = candle.final_up();
    let duration = candle.duration_minutes as f64;

    candle
        .bars
        .iter()
        .enumerate()
        .filter_map(|(i, bar)| {
            let change_pct = (bar.close - open) / open * 100.0;
            if change_pct.abs() < NOISE_FLOOR_PCT {
                return None;
            }
            Some(Snapshot {
                elapsed_fraction: (i + 1) as f64 / duration,
                magnitude_pct: change_pct.abs(),
                same_direction: (change_pct > 0.0) == final_up,
            })
        })
        .collect()
}
