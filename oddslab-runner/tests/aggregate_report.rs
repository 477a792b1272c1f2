//! Whole-run integration tests: scripted bar provider → report → aggregate.

use oddslab_core::data::{BarProvider, DataError};
use oddslab_core::domain::candle::MINUTE_MS;
use oddslab_core::domain::Timeframe;
use oddslab_core::Bar;

use oddslab_runner::config::SymbolConfig;
use oddslab_runner::{render_report, run_all, Recommendation, RunConfig};

/// Deterministic synthetic provider: a strongly trending tape, so every
/// 5-minute candle closes up and early same-direction snapshots dominate.
struct TrendingProvider {
    minutes: i64,
}

impl BarProvider for TrendingProvider {
    fn name(&self) -> &str {
        "trending"
    }

    fn fetch_bars(&self, _: &str, _: &str, _: u32) -> Result<Vec<Bar>, DataError> {
        Ok((0..self.minutes)
            .map(|m| {
                let base = 100.0 + m as f64 * 0.5;
                Bar {
                    open_time: m * MINUTE_MS,
                    open: base,
                    high: base + 0.6,
                    low: base,
                    close: base + 0.5,
                    volume: 1.0,
                }
            })
            .collect())
    }
}

struct EmptyProvider;

impl BarProvider for EmptyProvider {
    fn name(&self) -> &str {
        "empty"
    }

    fn fetch_bars(&self, _: &str, _: &str, _: u32) -> Result<Vec<Bar>, DataError> {
        Ok(Vec::new())
    }
}

fn small_config() -> RunConfig {
    let mut config = RunConfig::default();
    config.symbols = vec![SymbolConfig::new("BTCUSDT", "BTC")];
    config.timeframes = vec![Timeframe::new(5, "5M")];
    config
}

/// On a pure uptrend every snapshot agrees with the final direction, so the
/// empirical win rate is 1.0 everywhere the model claims less — the
/// aggregate must call the model underestimated and the strategy viable.
#[test]
fn trending_tape_flags_underestimation() {
    let mut config = small_config();
    config.params.min_bucket_samples = 10;
    config.params.min_aggregate_samples = 10;

    let provider = TrendingProvider { minutes: 2000 };
    let report = run_all(&config, &provider, false);

    assert_eq!(report.pairs.len(), 1);
    let pair = &report.pairs[0];
    assert!(pair.candle_count > 0);
    assert!(!pair.magnitude_rows.is_empty());
    for row in &pair.magnitude_rows {
        assert_eq!(row.bucket.win_rate, 1.0);
    }

    assert!(report.aggregate.underestimated > 0);
    assert_eq!(report.aggregate.overestimated, 0);
    assert_eq!(
        report.aggregate.recommendation,
        Recommendation::ViableAtTypicalOdds
    );

    // Every strategy row must be positive-EV at win rate 1.0.
    for s in &pair.strategy {
        assert!(s.expected_value_per_bet > 0.0);
    }
}

/// An empty bar sequence (failed upstream fetch handed through as sparse
/// data) must produce an explicit insufficient-data result, not a crash.
#[test]
fn empty_data_yields_insufficient_data() {
    let report = run_all(&small_config(), &EmptyProvider, false);

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].candle_count, 0);
    assert!(report.aggregate.big_move.is_none());
    assert_eq!(
        report.aggregate.recommendation,
        Recommendation::InsufficientData
    );

    // And it renders without panicking.
    let text = render_report(&report);
    assert!(text.contains("insufficient data"));
}

/// Re-running the same config on the same provider yields bit-identical
/// pair and aggregate structures (and identical serialized bytes).
#[test]
fn reruns_are_bit_identical() {
    let config = small_config();
    let provider = TrendingProvider { minutes: 500 };

    let a = run_all(&config, &provider, false);
    let b = run_all(&config, &provider, false);

    assert_eq!(a.pairs, b.pairs);
    assert_eq!(a.aggregate, b.aggregate);
    assert_eq!(a.run_id, b.run_id);
    assert_eq!(
        serde_json::to_string(&a.pairs).unwrap(),
        serde_json::to_string(&b.pairs).unwrap()
    );
}

/// The stricter aggregate floor can only see fewer buckets than the
/// per-bucket floor admits.
#[test]
fn aggregate_floor_is_no_looser_than_bucket_floor() {
    let mut config = small_config();
    config.params.min_bucket_samples = 10;
    config.params.min_aggregate_samples = 100;

    let provider = TrendingProvider { minutes: 2000 };
    let report = run_all(&config, &provider, false);

    let reportable: usize = report.pairs.iter().map(|p| p.magnitude_rows.len()).sum();
    assert!(report.aggregate.qualifying_buckets <= reportable);
}
