//! Candle re-aggregation — 1-minute bars into D-minute synthetic candles.

use std::collections::BTreeMap;

use crate::domain::candle::{window_id, SyntheticCandle};
use crate::domain::Bar;

/// Group an ordered 1-minute bar sequence into valid D-minute candles.
///
/// Each bar is assigned a window by integer division of its timestamp, so a
/// gap in the source simply leaves its window short. Windows are emitted in
/// ascending `window_id` order, which makes the output deterministic for a
/// given input.
///
/// Three kinds of window are dropped silently, per the validity rule on
/// [`SyntheticCandle`]:
/// - partial windows (fewer than D member bars — typically the first and
///   last windows of the fetched range, or any window spanning a data gap);
/// - windows with a non-positive open;
/// - windows whose close equals their open exactly (no directional signal).
///
/// Dropping incomplete windows biases the sample toward periods with
/// complete data; that is accepted, documented behavior.
pub fn reaggregate(bars: &[Bar], duration_minutes: u32) -> Vec<SyntheticCandle> {
    assert!(duration_minutes > 0, "candle duration must be positive");

    let mut windows: BTreeMap<i64, Vec<Bar>> = BTreeMap::new();
    for bar in bars {
        windows
            .entry(window_id(bar.open_time, duration_minutes))
            .or_default()
            .push(bar.clone());
    }

    windows
        .into_iter()
        .map(|(wid, members)| SyntheticCandle {
            window_id: wid,
            duration_minutes,
            bars: members,
        })
        .filter(SyntheticCandle::is_valid)
        .collect()
}
