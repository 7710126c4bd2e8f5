//! End-to-end analysis: filter the raw log, then aggregate
//!
//! This is the single entry point the CLI uses; it wires the filters and
//! aggregators to one settings document and produces an [`ExecutionSummary`].

use tracing::{debug, info, warn};

use crate::services::{CostAggregator, LogFilter, ParentAggregator, TagMatcher};
use crate::types::{
    AnalysisResult, ExecutionSummary, InputSummary, LogRecord, Result, Settings, TimeRange,
};

/// What to analyse and how to narrow it down
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// Label for the log source shown in the report
    pub file: String,
    pub time_range: TimeRange,
    /// Tags every analysed log must match
    pub tags: Vec<String>,
    /// Wall clock used for unbounded range ends
    pub now_ms: i64,
}

/// Runs the whole analysis against one settings document
pub struct ExecutionAnalyzer<'a> {
    settings: &'a Settings,
    matcher: TagMatcher,
}

impl<'a> ExecutionAnalyzer<'a> {
    /// Compile the settings' tags; warns about cost tags that can never match
    pub fn new(settings: &'a Settings) -> Result<Self> {
        let matcher = TagMatcher::from_settings(settings)?;
        for tag in settings.orphan_cost_tags() {
            warn!(tag, "cost tag has no tag definition; it will always cost 0");
        }
        Ok(Self { settings, matcher })
    }

    pub fn matcher(&self) -> &TagMatcher {
        &self.matcher
    }

    /// Filter `logs` by time then tags and aggregate what is left.
    ///
    /// Unknown requested tags fail before any record is examined.
    pub fn analyze(&self, logs: Vec<LogRecord>, request: &AnalysisRequest) -> Result<ExecutionSummary> {
        self.matcher.ensure_defined(&request.tags)?;

        let total_logs = logs.len();
        let filter = LogFilter::new(&self.matcher);

        let by_time = LogFilter::by_time(logs, request.time_range, request.now_ms)?;
        let logs_after_filter_by_time = by_time.len();

        let to_analyze = filter.by_tags(by_time, &request.tags)?;
        info!(
            total_logs,
            logs_after_filter_by_time,
            logs_to_analyze = to_analyze.len(),
            "filtered executor logs"
        );

        let input = InputSummary {
            file: request.file.clone(),
            time_range: request.time_range,
            tags: request.tags.clone(),
            total_logs,
            logs_after_filter_by_time,
            logs_to_analyze: to_analyze.len(),
        };

        let result = if to_analyze.is_empty() {
            debug!("no logs left to analyze");
            None
        } else {
            Some(self.aggregate(&to_analyze)?)
        };

        Ok(ExecutionSummary { input, result })
    }

    /// Aggregate a non-empty, time-sorted log set
    fn aggregate(&self, logs: &[LogRecord]) -> Result<AnalysisResult> {
        let costs = CostAggregator::new(self.settings, &self.matcher);
        let parents = ParentAggregator::new(&costs);
        let no_tags: [&str; 0] = [];

        Ok(AnalysisResult {
            earliest_log_time: logs.first().map_or(Ok(0), LogRecord::time)?,
            latest_log_time: logs.last().map_or(Ok(0), LogRecord::time)?,
            total_duration: costs.duration(logs, &no_tags)?,
            total_cost: costs.cost(logs, None)?,
            by_parent: parents.analyze(logs)?,
            by_cost_tag: costs.by_cost_tag(logs)?,
        })
    }
}
