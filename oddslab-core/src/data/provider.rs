//! Bar provider trait and structured error types.
//!
//! The BarProvider trait abstracts over market-data sources so the runner
//! can swap implementations and tests can serve synthetic bars. The core
//! engine never sees these errors: a failed or partial fetch reaches it as
//! a short bar sequence and falls under the ordinary drop rules.

use thiserror::Error;

use crate::domain::Bar;

/// Structured error types for bar retrieval.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// A source of time-ordered, gap-tolerant OHLC bars.
///
/// Contract: the returned sequence is sorted ascending by `open_time` with
/// no duplicate timestamps. Gaps are allowed — the re-aggregator drops the
/// windows they puncture.
pub trait BarProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch bars for a symbol at a sampling interval (e.g. "1m"), covering
    /// the last `lookback_days` days.
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: &str,
        lookback_days: u32,
    ) -> Result<Vec<Bar>, DataError>;
}
