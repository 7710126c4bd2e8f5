//! Log filtering by time window and tags

use tracing::debug;

use crate::services::TagMatcher;
use crate::types::{LogRecord, Result, TimeRange};

/// Reduces the raw log to the set the report analyses
pub struct LogFilter<'a> {
    matcher: &'a TagMatcher,
}

impl<'a> LogFilter<'a> {
    pub fn new(matcher: &'a TagMatcher) -> Self {
        Self { matcher }
    }

    /// Keep logs with `start <= Time <= end`, sorted ascending by `Time`.
    ///
    /// Every record's `Time` is validated, including those outside the
    /// window; a malformed one fails the whole filter.
    pub fn by_time(logs: Vec<LogRecord>, range: TimeRange, now_ms: i64) -> Result<Vec<LogRecord>> {
        let (start, end) = range.bounds(now_ms);

        let mut kept: Vec<(i64, LogRecord)> = Vec::with_capacity(logs.len());
        for log in logs {
            let time = log.time()?;
            if time >= start && time <= end {
                kept.push((time, log));
            }
        }

        // Stable, so logs sharing a timestamp keep file order
        kept.sort_by_key(|(time, _)| *time);

        debug!(start, end, kept = kept.len(), "filtered logs by time");
        Ok(kept.into_iter().map(|(_, log)| log).collect())
    }

    /// Keep logs matching every named tag; an empty list keeps everything.
    ///
    /// Names are checked against the settings before any record is looked at.
    pub fn by_tags<S: AsRef<str>>(&self, logs: Vec<LogRecord>, tags: &[S]) -> Result<Vec<LogRecord>> {
        self.matcher.ensure_defined(tags)?;
        if tags.is_empty() {
            return Ok(logs);
        }

        let mut kept = Vec::with_capacity(logs.len());
        for log in logs {
            if self.matcher.matches_all(&log, tags)? == Some(true) {
                kept.push(log);
            }
        }

        debug!(kept = kept.len(), "filtered logs by tags");
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReportError, Settings};

    fn log(time: &str, label: &str) -> LogRecord {
        LogRecord::from_pairs(&[
            ("Time", time),
            ("Duration", "1000"),
            ("Computer", "c1"),
            ("Parent", "org/job"),
            ("Label", label),
        ])
    }

    fn matcher() -> TagMatcher {
        let settings: Settings = serde_json::from_str(
            r#"{
                "tags": {
                    "windows": { "matchField": "Label", "matchPattern": "win" },
                    "large": { "matchField": "Label", "matchPattern": "-xl$" }
                }
            }"#,
        )
        .unwrap();
        TagMatcher::from_settings(&settings).unwrap()
    }

    fn times(logs: &[LogRecord]) -> Vec<i64> {
        logs.iter().map(|l| l.time().unwrap()).collect()
    }

    // ========== by_time() tests ==========

    #[test]
    fn test_by_time_inclusive_bounds_and_sorted() {
        let logs = vec![
            log("300", "a"),
            log("100", "a"),
            log("50", "a"),
            log("200", "a"),
            log("301", "a"),
        ];
        let result = LogFilter::by_time(logs, TimeRange::new(Some(100), Some(300)), 1_000).unwrap();
        assert_eq!(times(&result), vec![100, 200, 300]);
    }

    #[test]
    fn test_by_time_unbounded_end_is_now() {
        let logs = vec![log("500", "a"), log("1500", "a")];
        let result = LogFilter::by_time(logs, TimeRange::unbounded(), 1_000).unwrap();
        assert_eq!(times(&result), vec![500]);
    }

    #[test]
    fn test_by_time_stable_for_equal_timestamps() {
        let logs = vec![log("10", "first"), log("5", "x"), log("10", "second")];
        let result = LogFilter::by_time(logs, TimeRange::unbounded(), 1_000).unwrap();
        assert_eq!(result[1].get("Label"), Some("first"));
        assert_eq!(result[2].get("Label"), Some("second"));
    }

    #[test]
    fn test_by_time_non_numeric_time_fails() {
        let logs = vec![log("100", "a"), log("soon", "a")];
        let result = LogFilter::by_time(logs, TimeRange::new(Some(0), Some(50)), 1_000);
        assert!(matches!(result, Err(ReportError::InvalidNumber { .. })));
    }

    #[test]
    fn test_by_time_empty_input() {
        let result = LogFilter::by_time(Vec::new(), TimeRange::unbounded(), 1_000).unwrap();
        assert!(result.is_empty());
    }

    // ========== by_tags() tests ==========

    #[test]
    fn test_by_tags_empty_list_is_identity() {
        let matcher = matcher();
        let filter = LogFilter::new(&matcher);
        let logs = vec![log("3", "linux"), log("1", "win"), log("2", "mac")];
        let none: [&str; 0] = [];
        let result = filter.by_tags(logs.clone(), &none).unwrap();
        assert_eq!(result, logs);
    }

    #[test]
    fn test_by_tags_logical_and() {
        let matcher = matcher();
        let filter = LogFilter::new(&matcher);
        let logs = vec![log("1", "win-xl"), log("2", "win"), log("3", "linux-xl")];

        let windows = filter.by_tags(logs.clone(), &["windows"]).unwrap();
        assert_eq!(times(&windows), vec![1, 2]);

        let both = filter.by_tags(logs, &["windows", "large"]).unwrap();
        assert_eq!(times(&both), vec![1]);
    }

    #[test]
    fn test_by_tags_unknown_tag_fails_before_filtering() {
        let matcher = matcher();
        let filter = LogFilter::new(&matcher);
        // The malformed record would fail matching; the tag check comes first
        let logs = vec![LogRecord::from_pairs(&[("Time", "1")])];
        let result = filter.by_tags(logs, &["windows", "gpu"]);
        assert!(matches!(result, Err(ReportError::UnknownTag(name)) if name == "gpu"));
    }
}
