//! Report rendering — text tables, JSON artifact, CSV bucket export.
//!
//! The runner's contract is the computed structures in `RunReport`; this
//! module is the thin presentation layer on top of them.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::runner::{RunError, RunReport};

/// Render the whole run as fixed-width text tables.
pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    let line = "=".repeat(75);
    let thin = "-".repeat(75);

    out.push_str(&line);
    out.push('\n');
    out.push_str(&format!(
        "Odds-gap calibration backtest (last {} days)\n",
        report.config.lookback_days
    ));
    out.push_str(&format!("Run: {}\n", &report.run_id[..16.min(report.run_id.len())]));
    out.push_str(&line);
    out.push('\n');

    for warn in &report.warnings {
        out.push_str(&format!("WARNING: {warn}\n"));
    }

    for pair in &report.pairs {
        out.push('\n');
        out.push_str(&thin);
        out.push('\n');
        out.push_str(&format!(
            "{} {} | {} candles | {} snapshots\n",
            pair.symbol_label, pair.timeframe, pair.candle_count, pair.snapshot_count
        ));
        out.push_str(&thin);
        out.push('\n');

        if pair.magnitude_rows.is_empty() {
            out.push_str("  (no reportable magnitude buckets)\n");
        } else {
            out.push_str(&format!(
                "{:>12} | {:>7} | {:>8} | {:>6} | {:>7} | verdict\n",
                "move", "n", "win", "model", "dev"
            ));
            for row in &pair.magnitude_rows {
                out.push_str(&format!(
                    "{:>5.2}-{:>5.2}% | {:>7} | {:>7.1}% | {:>5.0}% | {:>+6.1}% | {}\n",
                    row.bucket.lo,
                    row.bucket.hi,
                    row.bucket.count,
                    row.bucket.win_rate * 100.0,
                    row.comparison.model_probability * 100.0,
                    row.comparison.deviation * 100.0,
                    row.comparison.verdict.label(),
                ));
            }
        }

        if !pair.elapsed_rows.is_empty() {
            out.push_str("\n  win rate by elapsed time (big moves only):\n");
            for bucket in &pair.elapsed_rows {
                out.push_str(&format!(
                    "    {:>3.0}-{:>3.0}%: {:>5.1}% (n={})\n",
                    bucket.lo * 100.0,
                    bucket.hi * 100.0,
                    bucket.win_rate * 100.0,
                    bucket.count
                ));
            }
        }

        if !pair.strategy.is_empty() {
            let wr = pair.strategy[0].win_rate;
            let n = pair.strategy[0].sample_count;
            out.push_str(&format!(
                "\n  strategy sim: win rate {:.1}% (n={n})\n",
                wr * 100.0
            ));
            for s in &pair.strategy {
                out.push_str(&format!(
                    "    odds {:>2.0}%: EV/bet = {:+.4} | {} bets = {:+.1}\n",
                    s.odds * 100.0,
                    s.expected_value_per_bet,
                    report.config.params.projection_bets,
                    s.projected_value
                ));
            }
        }
    }

    // Final conclusion.
    let agg = &report.aggregate;
    out.push('\n');
    out.push_str(&line);
    out.push('\n');
    out.push_str("Conclusion\n");
    out.push_str(&line);
    out.push('\n');
    out.push_str(&format!(
        "  {} buckets with {}+ samples:\n",
        agg.qualifying_buckets, report.config.params.min_aggregate_samples
    ));
    out.push_str(&format!(
        "    model overestimates (actual < model - 3%): {}\n",
        agg.overestimated
    ));
    out.push_str(&format!(
        "    calibrated (within 3%):                    {}\n",
        agg.calibrated
    ));
    out.push_str(&format!(
        "    model underestimates (actual > model + 3%): {}\n",
        agg.underestimated
    ));

    match &agg.big_move {
        Some(big) => {
            out.push_str(&format!(
                "\n  big moves (0.25%+), {} buckets:\n", big.bucket_count
            ));
            out.push_str(&format!("    actual win rate: {:.1}%\n", big.avg_win_rate * 100.0));
            out.push_str(&format!(
                "    model estimate:  {:.1}%\n",
                big.avg_model_probability * 100.0
            ));
            out.push_str(&format!("    gap:             {:+.1}%\n", big.avg_deviation() * 100.0));
        }
        None => {
            out.push_str("\n  big moves (0.25%+): no qualifying buckets\n");
        }
    }

    out.push_str(&format!("\n  => {}\n", agg.recommendation.describe()));
    out
}

/// Persist the report as `report.json` under `out_dir`. Returns the path.
pub fn save_report(report: &RunReport, out_dir: &Path) -> Result<PathBuf, RunError> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join("report.json");
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// One flattened bucket row for CSV export.
#[derive(Debug, Serialize)]
struct CsvBucketRow<'a> {
    symbol: &'a str,
    timeframe: &'a str,
    lo_pct: f64,
    hi_pct: f64,
    count: usize,
    win_rate: f64,
    model_probability: f64,
    deviation: f64,
    verdict: &'static str,
}

/// Export every reportable magnitude bucket as `buckets.csv` under `out_dir`.
pub fn export_buckets_csv(report: &RunReport, out_dir: &Path) -> Result<PathBuf, RunError> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join("buckets.csv");
    let mut writer = csv::Writer::from_path(&path).map_err(|e| {
        RunError::Artifact(std::io::Error::other(e))
    })?;

    for pair in &report.pairs {
        for row in &pair.magnitude_rows {
            writer
                .serialize(CsvBucketRow {
                    symbol: &pair.symbol_label,
                    timeframe: &pair.timeframe.label,
                    lo_pct: row.bucket.lo,
                    hi_pct: row.bucket.hi,
                    count: row.bucket.count,
                    win_rate: row.bucket.win_rate,
                    model_probability: row.comparison.model_probability,
                    deviation: row.comparison.deviation,
                    verdict: row.comparison.verdict.label(),
                })
                .map_err(|e| RunError::Artifact(std::io::Error::other(e)))?;
        }
    }
    writer
        .flush()
        .map_err(|e| RunError::Artifact(std::io::Error::other(e)))?;
    Ok(path)
}
