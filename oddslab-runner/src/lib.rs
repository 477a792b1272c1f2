//! OddsLab Runner — orchestrates calibration runs across symbol/timeframe
//! pairs and aggregates the results into a final verdict on the model.
//!
//! - `config` — TOML run configuration with a content-addressed run id
//! - `runner` — per-pair pipeline and the whole-run driver
//! - `aggregate` — cross-run bucket counts and the final recommendation
//! - `report` — text tables, JSON artifact, CSV bucket export

pub mod aggregate;
pub mod config;
pub mod report;
pub mod runner;

pub use aggregate::{AggregateSummary, Recommendation};
pub use config::{RunConfig, SymbolConfig};
pub use report::{export_buckets_csv, render_report, save_report};
pub use runner::{run_all, run_pair, PairResult, RunError, RunReport};
