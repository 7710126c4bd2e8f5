//! Markdown rendering of an execution summary

use std::fmt::Write;

use chrono::{Local, TimeZone};

use crate::types::{AnalysisResult, ExecutionSummary, InputSummary, TimeRange};

/// Parents cheaper than this are left out of the cost section
const MIN_LISTED_PARENT_COST: f64 = 1.0;

/// Render `duration_ms` as `H hours M minutes S seconds`, dropping leading zero units
pub fn format_duration(duration_ms: u64) -> String {
    let hours = duration_ms / 3_600_000;
    let minutes = (duration_ms % 3_600_000) / 60_000;
    let seconds = (duration_ms % 60_000) / 1_000;

    if hours > 0 {
        format!("{} hours {} minutes {} seconds", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{} minutes {} seconds", minutes, seconds)
    } else {
        format!("{} seconds", seconds)
    }
}

/// Render a cost with two decimals, e.g. `12.50 USD`
pub fn format_cost(cost: f64) -> String {
    format!("{:.2} USD", cost)
}

/// Render epoch milliseconds as `%Y-%m-%d %H:%M:%S` in `tz`
pub fn format_timestamp_in<Tz: TimeZone>(ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(ms).earliest() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ms.to_string(),
    }
}

/// Render epoch milliseconds in the local timezone
pub fn format_timestamp(ms: i64) -> String {
    format_timestamp_in(ms, &Local)
}

/// Render a time range as `<start> - <end>`; unbounded ends read `Earliest` / `Now`
pub fn format_time_range(range: &TimeRange) -> String {
    let start = range
        .start
        .map_or_else(|| "Earliest".to_string(), format_timestamp);
    let end = range.end.map_or_else(|| "Now".to_string(), format_timestamp);
    format!("{} - {}", start, end)
}

/// Render the full report
pub fn render(summary: &ExecutionSummary) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, summary);
    out
}

fn write_report(out: &mut String, summary: &ExecutionSummary) -> std::fmt::Result {
    writeln!(out, "# Jenkins Execution Report")?;
    writeln!(out)?;
    write_input(out, &summary.input)?;

    match &summary.result {
        Some(result) => write_result(out, result),
        None => writeln!(out, "**No logs to analyze**"),
    }
}

fn write_input(out: &mut String, input: &InputSummary) -> std::fmt::Result {
    let tags = if input.tags.is_empty() {
        "None".to_string()
    } else {
        input.tags.join(",")
    };

    writeln!(out, "## Input")?;
    writeln!(out)?;
    writeln!(out, "- File: {}", input.file)?;
    writeln!(
        out,
        "- Filter by time range: {} ({}/{} logs)",
        format_time_range(&input.time_range),
        input.logs_after_filter_by_time,
        input.total_logs
    )?;
    writeln!(
        out,
        "- Filter by tags: {} ({}/{} logs)",
        tags, input.logs_to_analyze, input.logs_after_filter_by_time
    )?;
    writeln!(out)
}

fn write_result(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    let parents = &result.by_parent;
    let builds = |name: &str| parents.by_build_times.get(name).unwrap_or(0);

    writeln!(out, "## Analysis")?;
    writeln!(out)?;
    writeln!(out, "### Overall")?;
    writeln!(out)?;
    writeln!(
        out,
        "- Earliest Log Time: {}",
        format_timestamp(result.earliest_log_time)
    )?;
    writeln!(
        out,
        "- Latest Log Time: {}",
        format_timestamp(result.latest_log_time)
    )?;
    writeln!(out, "- Total Duration: {}", format_duration(result.total_duration))?;
    writeln!(out, "- Total Cost: {}", format_cost(result.total_cost))?;
    writeln!(out)?;

    writeln!(out, "### Analysis by Build Duration")?;
    writeln!(out)?;
    for (name, duration) in parents.by_duration.iter() {
        writeln!(
            out,
            "- {}: {} ({} builds)",
            name,
            format_duration(duration),
            builds(name)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "### Analysis by Build Cost")?;
    writeln!(out)?;
    for (name, cost) in parents.by_cost.iter() {
        if cost > MIN_LISTED_PARENT_COST {
            writeln!(
                out,
                "- {}: {} ({} builds)",
                name,
                format_cost(cost),
                builds(name)
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Analysis by Cost Tags")?;
    writeln!(out)?;
    let tags = &result.by_cost_tag;
    for tag in &tags.sorted_tags {
        let cost = tags.costs.get(tag).copied().unwrap_or(0.0);
        writeln!(out, "- {}: {}", tag, format_cost(cost))?;
    }
    Ok(())
}
