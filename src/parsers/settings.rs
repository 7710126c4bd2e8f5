//! Settings JSON parser

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::types::{Result, Settings};

/// Read and parse the settings document at `path`
pub fn read_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)?;
    debug!(
        path = %path.display(),
        tags = settings.tags.len(),
        costs = settings.costs.len(),
        "read settings"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReportError;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_read_fixture() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/settings.json");
        let settings = read_settings(&path).unwrap();
        assert_eq!(settings.tags.len(), 4);
        let order: Vec<&str> = settings.costs.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(order, vec!["linux", "windows", "gpu"]);
        assert_eq!(
            settings.tag("pull-request").unwrap().match_pattern,
            "/job/PR-\\d+$"
        );
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"tags\": ").unwrap();
        let result = read_settings(file.path());
        assert!(matches!(result, Err(ReportError::Settings(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = read_settings(Path::new("tests/fixtures/nope.json"));
        assert!(matches!(result, Err(ReportError::Io(_))));
    }
}
