//! Plain-text comparison table.

use crate::driver::Measurement;
use std::fmt::Write;

pub const REPORT_WIDTH: usize = 76;
const RELATIVE_WIDTH: usize = 9;
const TIME_WIDTH: usize = 11;
const RATE_WIDTH: usize = 10;
const LABEL_WIDTH: usize = REPORT_WIDTH - RELATIVE_WIDTH - TIME_WIDTH - RATE_WIDTH;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub measurement: Measurement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportLine {
    Row(ReportRow),
    Separator,
}

/// Formats nanoseconds with a scaled unit suffix (e.g., "1.44us")
pub fn format_time(ns: f64) -> String {
    if ns >= 1e9 {
        format!("{:.2}s", ns / 1e9)
    } else if ns >= 1e6 {
        format!("{:.2}ms", ns / 1e6)
    } else if ns >= 1e3 {
        format!("{:.2}us", ns / 1e3)
    } else if ns >= 1.0 {
        format!("{:.2}ns", ns)
    } else if ns >= 1e-3 {
        format!("{:.2}ps", ns * 1e3)
    } else {
        format!("{:.2}fs", ns * 1e6)
    }
}

/// Formats a per-second rate with an SI suffix (e.g., "195.06M")
pub fn format_rate(per_sec: f64) -> String {
    if per_sec >= 1e12 {
        format!("{:.2}T", per_sec / 1e12)
    } else if per_sec >= 1e9 {
        format!("{:.2}G", per_sec / 1e9)
    } else if per_sec >= 1e6 {
        format!("{:.2}M", per_sec / 1e6)
    } else if per_sec >= 1e3 {
        format!("{:.2}K", per_sec / 1e3)
    } else {
        format!("{:.2}", per_sec)
    }
}

/// Renders `lines` under `title`. With `relative`, each row also shows its
/// speed as a percentage of the first row of its group.
pub fn render(title: &str, lines: &[ReportLine], relative: bool) -> String {
    let mut out = String::new();
    let double_rule = "=".repeat(REPORT_WIDTH);
    let rule = "-".repeat(REPORT_WIDTH);

    let _ = writeln!(out, "{}", double_rule);
    let _ = writeln!(
        out,
        "{:<label$}{:>rel$}{:>time$}{:>rate$}",
        title,
        "relative",
        "time/iter",
        "iters/s",
        label = LABEL_WIDTH,
        rel = RELATIVE_WIDTH,
        time = TIME_WIDTH,
        rate = RATE_WIDTH,
    );
    let _ = writeln!(out, "{}", double_rule);

    let mut baseline: Option<f64> = None;
    for line in lines {
        match line {
            ReportLine::Separator => {
                baseline = None;
                let _ = writeln!(out, "{}", rule);
            }
            ReportLine::Row(row) => {
                let ns = row.measurement.ns_per_iter();
                let base = *baseline.get_or_insert(ns);
                let rel = if relative && ns > 0.0 {
                    format!("{:.2}%", base / ns * 100.0)
                } else {
                    String::new()
                };
                let _ = writeln!(
                    out,
                    "{:<label$}{:>rel_w$}{:>time$}{:>rate$}",
                    row.label,
                    rel,
                    format_time(ns),
                    format_rate(row.measurement.iters_per_sec()),
                    label = LABEL_WIDTH,
                    rel_w = RELATIVE_WIDTH,
                    time = TIME_WIDTH,
                    rate = RATE_WIDTH,
                );
            }
        }
    }
    out
}
