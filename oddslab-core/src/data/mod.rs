//! Bar sources — the only I/O in the system.

pub mod binance;
pub mod provider;

pub use binance::BinanceProvider;
pub use provider::{BarProvider, DataError};
