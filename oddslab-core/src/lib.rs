//! OddsLab Core — calibration engine for short-horizon direction probabilities.
//!
//! The question under test: given that price has already moved X% into a
//! candle, how often does the candle close in the same direction — and how
//! far off is a reference probability model?
//!
//! This crate contains the whole computation pipeline:
//! - Domain types (bars, synthetic candles, snapshots, timeframes)
//! - Candle re-aggregation (1-minute bars into D-minute windows)
//! - Snapshot extraction (one intra-candle observation per member bar)
//! - Bucketed win-rate estimation with minimum-sample floors
//! - Model comparison and verdict classification
//! - Fixed-odds expected-value simulation
//! - Bar source abstraction + Binance klines provider
//!
//! Everything past the bar source is a pure, single-pass batch computation:
//! immutable sequence in, immutable sequence out.

pub mod data;
pub mod domain;
pub mod model;
pub mod params;
pub mod reaggregate;
pub mod snapshots;
pub mod stats;
pub mod strategy;

pub use domain::{Bar, Snapshot, SyntheticCandle, Timeframe};
pub use model::ModelTable;
pub use params::EngineParams;
pub use stats::{bucket_by, Bucket, BucketDimension, Verdict};
pub use strategy::{simulate, EntryFilter, StrategyResult};
