//! Fixed-odds expected-value simulation.
//!
//! Takes the snapshot population, applies a concrete entry filter (the
//! conditions under which a bet would actually be placed), and projects the
//! expected value per bet for a ladder of candidate quoted odds.

use serde::{Deserialize, Serialize};

use crate::domain::Snapshot;

/// Entry conditions for the simulated strategy.
///
/// The reference strategy bets mid-candle on moves that have already cleared
/// a minimum magnitude: `0.15 <= elapsed <= 0.85` (both ends inclusive,
/// unlike bucket membership) and `magnitude >= 0.10`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryFilter {
    pub min_elapsed: f64,
    pub max_elapsed: f64,
    pub min_magnitude_pct: f64,
}

impl EntryFilter {
    pub fn accepts(&self, snap: &Snapshot) -> bool {
        snap.elapsed_fraction >= self.min_elapsed
            && snap.elapsed_fraction <= self.max_elapsed
            && snap.magnitude_pct >= self.min_magnitude_pct
    }
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            min_elapsed: 0.15,
            max_elapsed: 0.85,
            min_magnitude_pct: 0.10,
        }
    }
}

/// Projected outcome of betting at one fixed quoted odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Quoted implied win probability, in (0, 1].
    pub odds: f64,
    /// Net return on a winning unit stake: `1/odds - 1`.
    pub payout: f64,
    pub win_rate: f64,
    pub sample_count: usize,
    /// `win_rate * payout - (1 - win_rate)`.
    pub expected_value_per_bet: f64,
    /// `expected_value_per_bet * projection_bets`.
    pub projected_value: f64,
}

/// Simulate the strategy across a ladder of candidate odds.
///
/// The win rate comes from the filtered snapshot subset. An empty subset
/// means no bets and therefore no rows. Odds outside `(0, 1]` are skipped —
/// a zero or negative quote has no defined payout.
pub fn simulate(
    snapshots: &[Snapshot],
    filter: &EntryFilter,
    odds_ladder: &[f64],
    projection_bets: u32,
) -> Vec<StrategyResult> {
    let mut count = 0usize;
    let mut wins = 0usize;
    for snap in snapshots {
        if filter.accepts(snap) {
            count += 1;
            if snap.same_direction {
                wins += 1;
            }
        }
    }
    if count == 0 {
        return Vec::new();
    }
    let win_rate = wins as f64 / count as f64;

    odds_ladder
        .iter()
        .filter(|&&o| o > 0.0 && o <= 1.0)
        .map(|&odds| {
            let payout = 1.0 / odds - 1.0;
            let ev = win_rate * payout - (1.0 - win_rate);
            StrategyResult {
                odds,
                payout,
                win_rate,
                sample_count: count,
                expected_value_per_bet: ev,
                projected_value: ev * projection_bets as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(elapsed: f64, magnitude: f64, same: bool) -> Snapshot {
        Snapshot {
            elapsed_fraction: elapsed,
            magnitude_pct: magnitude,
            same_direction: same,
        }
    }

    /// Mixed population yielding exactly win_rate 0.55 under the filter,
    /// checked at even odds: payout 1.0, EV 0.10, 1000 bets → 100.0.
    #[test]
    fn even_odds_scenario() {
        let mut snaps = Vec::new();
        for i in 0..100 {
            snaps.push(snap(0.5, 0.2, i < 55));
        }
        let results = simulate(&snaps, &EntryFilter::default(), &[0.50], 1000);
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.sample_count, 100);
        assert!((r.win_rate - 0.55).abs() < 1e-12);
        assert!((r.payout - 1.0).abs() < 1e-12);
        assert!((r.expected_value_per_bet - 0.10).abs() < 1e-12);
        assert!((r.projected_value - 100.0).abs() < 1e-9);
    }

    #[test]
    fn filter_bounds_are_inclusive_on_elapsed() {
        let snaps = vec![
            snap(0.15, 0.2, true),
            snap(0.85, 0.2, true),
            snap(0.14, 0.2, true),
            snap(0.86, 0.2, true),
        ];
        let results = simulate(&snaps, &EntryFilter::default(), &[0.50], 1000);
        assert_eq!(results[0].sample_count, 2);
    }

    #[test]
    fn magnitude_floor_is_inclusive() {
        let snaps = vec![snap(0.5, 0.10, true), snap(0.5, 0.09, true)];
        let results = simulate(&snaps, &EntryFilter::default(), &[0.50], 1000);
        assert_eq!(results[0].sample_count, 1);
    }

    #[test]
    fn empty_filtered_set_produces_no_rows() {
        let snaps = vec![snap(0.05, 0.2, true)];
        assert!(simulate(&snaps, &EntryFilter::default(), &[0.50], 1000).is_empty());
    }

    #[test]
    fn degenerate_odds_are_skipped() {
        let snaps = vec![snap(0.5, 0.2, true)];
        let results = simulate(&snaps, &EntryFilter::default(), &[0.0, -0.5, 1.5, 0.45], 1000);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].odds, 0.45);
    }

    #[test]
    fn worse_odds_mean_better_ev_at_fixed_win_rate() {
        // Lower implied probability pays more, so EV rises as odds fall.
        let snaps: Vec<Snapshot> = (0..100).map(|i| snap(0.5, 0.2, i < 55)).collect();
        let results = simulate(&snaps, &EntryFilter::default(), &[0.45, 0.50, 0.55, 0.60], 1000);
        assert_eq!(results.len(), 4);
        for pair in results.windows(2) {
            assert!(pair[0].expected_value_per_bet > pair[1].expected_value_per_bet);
        }
    }
}
