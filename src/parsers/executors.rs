//! Executor log CSV parser

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::types::{LogRecord, Result};

/// Read every row of the executor log at `path`.
///
/// The first row names the columns. Whitespace around fields is trimmed and
/// rows must have as many fields as the header.
pub fn read_executors_logs(path: &Path) -> Result<Vec<LogRecord>> {
    let file = File::open(path)?;
    let logs = parse_executors_logs(file)?;
    debug!(path = %path.display(), count = logs.len(), "read executor logs");
    Ok(logs)
}

/// Parse executor log CSV from any reader
pub fn parse_executors_logs<R: Read>(reader: R) -> Result<Vec<LogRecord>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers: Arc<[String]> = reader.headers()?.iter().map(String::from).collect();

    let mut logs = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        let values = row.iter().map(String::from).collect();
        logs.push(LogRecord::new(line, Arc::clone(&headers), values));
    }

    Ok(logs)
}
