//! Bar — the fundamental market data unit.

use serde::{Deserialize, Serialize};

/// One sampled OHLCV interval, as delivered by a bar source.
///
/// `open_time` is milliseconds since the Unix epoch. Within one
/// symbol/interval sequence bars are sorted ascending by `open_time` and are
/// unique; gaps are allowed and handled downstream by the re-aggregator.
/// Only `open_time`, `open`, and `close` feed the core math — high, low, and
/// volume ride along for completeness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Basic sanity check: finite positive prices, high/low bracket open/close.
    pub fn is_sane(&self) -> bool {
        self.open.is_finite()
            && self.close.is_finite()
            && self.open > 0.0
            && self.close > 0.0
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}
