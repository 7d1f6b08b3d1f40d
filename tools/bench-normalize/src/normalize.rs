//! Baseline-relative normalization.
//!
//! Each group is normalized independently against the record whose test
//! name matches the baseline. Numeric parse failures are not errors: the
//! affected row simply gets [`UNDEFINED`] in its normalized column.

use crate::table::{Group, NA, Table};

/// Baseline test name used when none is configured.
pub const DEFAULT_BASELINE: &str = "maxtext_fp8";

/// Normalized value of the baseline record itself.
pub const BASELINE_VALUE: &str = "1.000";

/// Normalized value when no percentage can be computed.
pub const UNDEFINED: &str = "-";

/// Column names of an output row.
pub const HEADER: [&str; 8] = [
    "test",
    "dp",
    "tp",
    "tpsp",
    "fsdp",
    "mean",
    "stddev",
    "normalized",
];

/// One row of the normalized summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    /// Test name.
    pub test: String,
    /// Data parallelism.
    pub dp: String,
    /// Tensor parallelism.
    pub tp: String,
    /// Tensor/sequence parallelism.
    pub tpsp: String,
    /// Fully-sharded data parallelism.
    pub fsdp: String,
    /// Mean, passed through unchanged.
    pub mean: String,
    /// Standard deviation, passed through unchanged.
    pub stddev: String,
    /// Percentage delta against the baseline, [`BASELINE_VALUE`], or [`UNDEFINED`].
    pub normalized: String,
}

impl OutputRow {
    /// Fields in [`HEADER`] order.
    pub fn fields(&self) -> [&str; 8] {
        [
            self.test.as_str(),
            self.dp.as_str(),
            self.tp.as_str(),
            self.tpsp.as_str(),
            self.fsdp.as_str(),
            self.mean.as_str(),
            self.stddev.as_str(),
            self.normalized.as_str(),
        ]
    }
}

/// Rows produced from a whole table, with summary counters.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Output rows in group-then-test order.
    pub rows: Vec<OutputRow>,
    /// Number of groups processed.
    pub groups: usize,
    /// Groups with no baseline record or a non-numeric baseline mean.
    pub groups_without_baseline: usize,
}

/// Parse a mean cell, returning `None` if it is not a number.
///
/// Single underscores between digits are accepted as group separators
/// (`1_000.5`).
pub fn parse_mean(value: &str) -> Option<f64> {
    let value = value.trim();
    if !value.contains('_') {
        return value.parse().ok();
    }

    let bytes = value.as_bytes();
    let is_digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    let grouped = bytes
        .iter()
        .enumerate()
        .all(|(i, &b)| b != b'_' || (i > 0 && is_digit_at(i - 1) && is_digit_at(i + 1)));
    if !grouped {
        return None;
    }
    value.replace('_', "").parse().ok()
}

/// Format a percentage delta with two decimals and a trailing `%`.
pub fn format_percent(pct: f64) -> String {
    if pct.is_nan() {
        "nan%".to_owned()
    } else {
        format!("{pct:.2}%")
    }
}

/// Baseline mean of a group, if its baseline record exists and is numeric.
fn baseline_mean(group: &Group, baseline: &str) -> Option<f64> {
    group.get(baseline).and_then(|r| parse_mean(&r.mean))
}

/// Normalize one group against `baseline`.
pub fn normalize_group(group: &Group, baseline: &str) -> Vec<OutputRow> {
    let base = baseline_mean(group, baseline);

    group
        .records
        .values()
        .map(|record| {
            let normalized = if record.mean == NA {
                UNDEFINED.to_owned()
            } else if record.test == baseline {
                base.map_or(UNDEFINED, |_| BASELINE_VALUE).to_owned()
            } else {
                match (base, parse_mean(&record.mean)) {
                    (Some(base), Some(mean)) if base != 0.0 => {
                        format_percent((mean / base - 1.0) * 100.0)
                    }
                    _ => UNDEFINED.to_owned(),
                }
            };

            OutputRow {
                test: record.test.clone(),
                dp: group.key.dp.clone(),
                tp: group.key.tp.clone(),
                tpsp: group.key.tpsp.clone(),
                fsdp: group.key.fsdp.clone(),
                mean: record.mean.clone(),
                stddev: record.stddev.clone(),
                normalized,
            }
        })
        .collect()
}

/// Normalize every group of `table` in first-seen order.
pub fn normalize_table(table: &Table, baseline: &str) -> Normalized {
    let mut out = Normalized::default();
    for group in table.groups() {
        out.groups += 1;
        if baseline_mean(group, baseline).is_none() {
            out.groups_without_baseline += 1;
        }
        out.rows.extend(normalize_group(group, baseline));
    }
    out
}
