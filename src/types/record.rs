//! Executor log records

use std::sync::Arc;

use super::{ReportError, Result};

/// Column holding the start time in milliseconds since epoch
pub const TIME_FIELD: &str = "Time";
/// Column holding the build duration in milliseconds
pub const DURATION_FIELD: &str = "Duration";
/// Column holding the executor host; empty when the build never ran
pub const COMPUTER_FIELD: &str = "Computer";
/// Column holding the job path of the build
pub const PARENT_FIELD: &str = "Parent";

/// One row of the executor log.
///
/// Fields are kept as the raw strings from the CSV; numeric accessors parse
/// on demand and report the source line when a value is malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    line: u64,
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl LogRecord {
    /// Build a record from a shared header row and this row's values
    pub fn new(line: u64, headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self {
            line,
            headers,
            values,
        }
    }

    /// Build a standalone record from `(field, value)` pairs (line 0)
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let headers: Arc<[String]> = pairs.iter().map(|(k, _)| k.to_string()).collect();
        let values = pairs.iter().map(|(_, v)| v.to_string()).collect();
        Self::new(0, headers, values)
    }

    /// Source line in the CSV file (1-based, header is line 1)
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Raw value of a field, `None` if the log has no such column
    pub fn get(&self, field: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == field)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// Raw value of a field the analysis cannot do without
    pub fn require(&self, field: &str) -> Result<&str> {
        self.get(field).ok_or_else(|| ReportError::MissingField {
            line: self.line,
            field: field.to_string(),
        })
    }

    /// Start time in milliseconds since epoch
    pub fn time(&self) -> Result<i64> {
        self.parse_field(TIME_FIELD)
    }

    /// Build duration in milliseconds
    pub fn duration(&self) -> Result<u64> {
        self.parse_field(DURATION_FIELD)
    }

    /// Raw job path of the build
    pub fn parent(&self) -> Result<&str> {
        self.require(PARENT_FIELD)
    }

    /// Whether the build actually ran on an executor.
    ///
    /// Records without a `Computer` are kept by the filters but never count
    /// towards duration, cost or build totals.
    pub fn is_eligible(&self) -> bool {
        self.get(COMPUTER_FIELD).is_some_and(|c| !c.is_empty())
    }

    fn parse_field<T: std::str::FromStr>(&self, field: &str) -> Result<T> {
        let raw = self.require(field)?;
        raw.trim()
            .parse::<T>()
            .map_err(|_| ReportError::InvalidNumber {
                line: self.line,
                field: field.to_string(),
                value: raw.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_existing_and_missing_field() {
        let record = LogRecord::from_pairs(&[("Time", "1000"), ("Label", "win-node")]);
        assert_eq!(record.get("Label"), Some("win-node"));
        assert_eq!(record.get("Computer"), None);
    }

    #[test]
    fn test_numeric_fields() {
        let record = LogRecord::from_pairs(&[("Time", "1700000000000"), ("Duration", " 42 ")]);
        assert_eq!(record.time().unwrap(), 1_700_000_000_000);
        assert_eq!(record.duration().unwrap(), 42);
    }

    #[test]
    fn test_non_numeric_time_reports_line() {
        let headers: Arc<[String]> = vec!["Time".to_string()].into();
        let record = LogRecord::new(12, headers, vec!["yesterday".to_string()]);
        match record.time() {
            Err(ReportError::InvalidNumber { line, field, value }) => {
                assert_eq!(line, 12);
                assert_eq!(field, "Time");
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_duration_is_error() {
        let record = LogRecord::from_pairs(&[("Time", "1")]);
        assert!(matches!(
            record.duration(),
            Err(ReportError::MissingField { .. })
        ));
    }

    #[test]
    fn test_eligibility() {
        assert!(LogRecord::from_pairs(&[("Computer", "c1")]).is_eligible());
        assert!(!LogRecord::from_pairs(&[("Computer", "")]).is_eligible());
        assert!(!LogRecord::from_pairs(&[("Time", "1")]).is_eligible());
    }
}
