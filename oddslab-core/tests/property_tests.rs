//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Verdict classification totally partitions the real line
//! 2. Raising the sample floor never adds reportable buckets
//! 3. Snapshot bounds hold for arbitrary bar sequences
//! 4. Model lookup keeps step-function semantics

use proptest::prelude::*;

use oddslab_core::domain::candle::MINUTE_MS;
use oddslab_core::reaggregate::reaggregate;
use oddslab_core::snapshots::extract_snapshots;
use oddslab_core::{bucket_by, Bar, BucketDimension, ModelTable, Snapshot, Verdict};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (50.0..150.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
    (0.01..=1.0_f64, 0.001..5.0_f64, prop::bool::ANY).prop_map(
        |(elapsed_fraction, magnitude_pct, same_direction)| Snapshot {
            elapsed_fraction,
            magnitude_pct,
            same_direction,
        },
    )
}

// ── 1. Verdict totality ──────────────────────────────────────────────

proptest! {
    /// Every finite deviation maps to exactly one verdict, and the verdict
    /// ordering agrees with the deviation ordering at the boundaries.
    #[test]
    fn verdict_is_total(deviation in -1.0..1.0_f64) {
        let verdict = Verdict::classify(deviation);
        let expected = if deviation < -0.05 {
            Verdict::OverestimatesStrongly
        } else if deviation < -0.02 {
            Verdict::OverestimatesSlightly
        } else if deviation <= 0.02 {
            Verdict::WellCalibrated
        } else if deviation <= 0.05 {
            Verdict::UnderestimatesSlightly
        } else {
            Verdict::UnderestimatesStrongly
        };
        prop_assert_eq!(verdict, expected);
    }
}

// ── 2. Sample floor monotonicity ─────────────────────────────────────

proptest! {
    /// A stricter floor can only shrink the reportable bucket set, and the
    /// surviving buckets are unchanged.
    #[test]
    fn raising_the_floor_never_adds_buckets(
        snaps in prop::collection::vec(arb_snapshot(), 0..400),
        floor_lo in 0usize..50,
        floor_delta in 0usize..50,
    ) {
        let ranges = [(0.001, 0.1), (0.1, 0.5), (0.5, 1.0), (1.0, 5.0)];
        let loose = bucket_by(&snaps, BucketDimension::Magnitude, &ranges, floor_lo);
        let strict = bucket_by(
            &snaps,
            BucketDimension::Magnitude,
            &ranges,
            floor_lo + floor_delta,
        );

        prop_assert!(strict.len() <= loose.len());
        for bucket in &strict {
            prop_assert!(loose.contains(bucket));
        }
    }
}

// ── 3. Snapshot bounds ───────────────────────────────────────────────

proptest! {
    /// For arbitrary contiguous bar runs, every snapshot respects its bounds
    /// and every valid candle has exactly D members with derived open/close.
    #[test]
    fn snapshot_bounds_hold(
        opens in prop::collection::vec(arb_price(), 30),
        closes in prop::collection::vec(arb_price(), 30),
    ) {
        let bars: Vec<Bar> = opens
            .iter()
            .zip(&closes)
            .enumerate()
            .map(|(m, (&open, &close))| Bar {
                open_time: m as i64 * MINUTE_MS,
                open,
                high: open.max(close),
                low: open.min(close),
                close,
                volume: 1.0,
            })
            .collect();

        for candle in reaggregate(&bars, 5) {
            prop_assert_eq!(candle.bars.len(), 5);
            prop_assert_eq!(candle.open(), candle.bars[0].open);
            prop_assert_eq!(candle.close(), candle.bars[4].close);
            for snap in extract_snapshots(&candle) {
                prop_assert!(snap.elapsed_fraction > 0.0);
                prop_assert!(snap.elapsed_fraction <= 1.0);
                prop_assert!(snap.magnitude_pct >= 0.001);
            }
        }
    }
}

// ── 4. Model step semantics ──────────────────────────────────────────

proptest! {
    /// Binary-search lookup agrees with the reference linear scan
    /// ("probability of the last threshold met").
    #[test]
    fn lookup_matches_linear_scan(magnitude in 0.0..6.0_f64) {
        let table = ModelTable::default();

        let mut expected = table.floor_probability;
        for step in &table.steps {
            if magnitude >= step.threshold_pct {
                expected = step.probability;
            }
        }

        prop_assert_eq!(table.probability(magnitude), expected);
    }

    /// The lookup is monotone non-decreasing in magnitude.
    #[test]
    fn lookup_is_monotone(a in 0.0..6.0_f64, b in 0.0..6.0_f64) {
        let table = ModelTable::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(table.probability(lo) <= table.probability(hi));
    }
}
