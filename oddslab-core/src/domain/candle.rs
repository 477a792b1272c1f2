//! SyntheticCandle — a D-minute candle rebuilt from consecutive 1-minute bars.

use serde::{Deserialize, Serialize};

use super::bar::Bar;

/// Milliseconds in one minute; window ids are minutes-per-candle times this.
pub const MINUTE_MS: i64 = 60_000;

/// A virtual candle of `duration_minutes` built by grouping member bars that
/// share a `window_id` (`open_time / (duration_minutes * 60_000)`).
///
/// Member bars keep their original time order. Open and close are derived,
/// never stored: the open of the first member and the close of the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticCandle {
    pub window_id: i64,
    pub duration_minutes: u32,
    pub bars: Vec<Bar>,
}

impl SyntheticCandle {
    /// Open of the first member bar.
    pub fn open(&self) -> f64 {
        self.bars.first().map(|b| b.open).unwrap_or(f64::NAN)
    }

    /// Close of the last member bar.
    pub fn close(&self) -> f64 {
        self.bars.last().map(|b| b.close).unwrap_or(f64::NAN)
    }

    /// Whether the candle closed above its open.
    pub fn final_up(&self) -> bool {
        self.close() > self.open()
    }

    /// Validity rule: exactly one member bar per minute of duration (no
    /// partial window at a data boundary), positive open, and a close that
    /// actually moved. Anything else carries no directional signal and is
    /// dropped whole — it contributes zero snapshots.
    pub fn is_valid(&self) -> bool {
        self.bars.len() == self.duration_minutes as usize
            && self.open() > 0.0
            && self.close() != self.open()
    }
}

/// Window id for a bar timestamp at a given candle duration.
pub fn window_id(open_time: i64, duration_minutes: u32) -> i64 {
    open_time / (duration_minutes as i64 * MINUTE_MS)
}
