//! Analysis output types

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Inclusive time window in milliseconds since epoch.
///
/// `None` means unbounded: an absent start is the earliest log, an absent
/// end is the moment the filter runs.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeRange {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Concrete inclusive bounds, filling unbounded ends with epoch and `now_ms`
    pub fn bounds(&self, now_ms: i64) -> (i64, i64) {
        (self.start.unwrap_or(0), self.end.unwrap_or(now_ms))
    }
}

/// Group keys ranked by a metric, highest first.
///
/// Ties keep first-seen order, which for logs sorted by time is the order in
/// which each group first ran.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Ranking<V> {
    /// Keys ordered by descending value
    pub sorted_names: Vec<String>,
    /// Value per key
    pub values: HashMap<String, V>,
}

impl<V: Copy + PartialOrd> Ranking<V> {
    /// Rank `(key, value)` pairs given in first-seen order
    pub fn from_ordered(entries: Vec<(String, V)>) -> Self {
        let mut order: Vec<(String, V)> = entries.clone();
        // sort_by is stable, so equal values keep their incoming order
        order.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        Self {
            sorted_names: order.into_iter().map(|(name, _)| name).collect(),
            values: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<V> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.sorted_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_names.is_empty()
    }

    /// `(key, value)` pairs in ranked order
    pub fn iter(&self) -> impl Iterator<Item = (&str, V)> + '_ {
        self.sorted_names
            .iter()
            .filter_map(|name| self.values.get(name).map(|v| (name.as_str(), *v)))
    }
}

/// Per-parent totals, ranked three ways
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParentAnalysis {
    pub by_duration: Ranking<u64>,
    pub by_cost: Ranking<f64>,
    pub by_build_times: Ranking<u64>,
}

/// Cost per cost tag, ranked
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CostTagAnalysis {
    pub sorted_tags: Vec<String>,
    pub costs: HashMap<String, f64>,
}

impl From<Ranking<f64>> for CostTagAnalysis {
    fn from(ranking: Ranking<f64>) -> Self {
        Self {
            sorted_tags: ranking.sorted_names,
            costs: ranking.values,
        }
    }
}

/// What was fed into the analysis and how much survived each filter
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InputSummary {
    pub file: String,
    pub time_range: TimeRange,
    pub tags: Vec<String>,
    pub total_logs: usize,
    pub logs_after_filter_by_time: usize,
    pub logs_to_analyze: usize,
}

/// Aggregates over the analysed log set
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisResult {
    pub earliest_log_time: i64,
    pub latest_log_time: i64,
    pub total_duration: u64,
    pub total_cost: f64,
    pub by_parent: ParentAnalysis,
    pub by_cost_tag: CostTagAnalysis,
}

/// Complete report payload.
///
/// `result` is `None` when no log survived filtering.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExecutionSummary {
    pub input: InputSummary,
    pub result: Option<AnalysisResult>,
}
