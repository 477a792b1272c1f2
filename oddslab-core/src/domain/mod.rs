//! Domain types shared across the pipeline.

pub mod bar;
pub mod candle;
pub mod snapshot;
pub mod timeframe;

pub use bar::Bar;
pub use candle::SyntheticCandle;
pub use snapshot::Snapshot;
pub use timeframe::Timeframe;
