use thiserror::Error;

/// executors-report error types
#[derive(Error, Debug)]
pub enum ReportError {
    /// Invalid or inconsistent configuration (missing files, bad arguments)
    #[error("config error: {0}")]
    Config(String),

    /// A tag was requested that the settings document does not define
    #[error("config error: tag '{0}' is not defined in the settings file")]
    UnknownTag(String),

    /// A tag's matchPattern is not a valid regular expression
    #[error("config error: tag '{tag}' has an invalid matchPattern: {source}")]
    InvalidPattern {
        tag: String,
        #[source]
        source: regex::Error,
    },

    /// A log record lacks a field the analysis needs
    #[error("data error: record at line {line} has no '{field}' field")]
    MissingField { line: u64, field: String },

    /// A numeric log field could not be parsed
    #[error("data error: record at line {line} has non-numeric {field} '{value}'")]
    InvalidNumber {
        line: u64,
        field: String,
        value: String,
    },

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings document is not valid JSON or has the wrong shape
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// Executor log is not valid CSV
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    /// Whether this error comes from bad log data rather than bad configuration
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ReportError::MissingField { .. } | ReportError::InvalidNumber { .. }
        )
    }
}

/// Result type alias for executors-report
pub type Result<T> = std::result::Result<T, ReportError>;
