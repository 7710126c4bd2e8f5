pub mod markdown;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;

use crate::parsers::{read_executors_logs, read_settings};
use crate::services::{now_millis, parse_time_range, AnalysisRequest, ExecutionAnalyzer};
use crate::types::{ExecutionSummary, ReportError, Settings};

/// Generate a duration and cost report from Jenkins executor logs
#[derive(Parser, Debug)]
#[command(name = "executors-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the executor log CSV file
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Path to the settings JSON file
    #[arg(short, long, value_name = "JSON", default_value = "settings.json")]
    pub settings: PathBuf,

    /// Comma-separated list of tags every analysed log must match
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Time range to analyse: <start>[:<end>], e.g. -7d or -2d:-1d
    #[arg(short, long, allow_hyphen_values = true)]
    pub range: Option<String>,

    /// Output the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let summary = self.summarize()?;
        print!("{}", self.render(&summary)?);
        Ok(())
    }

    /// Validate inputs, load them and run the analysis
    pub fn summarize(&self) -> anyhow::Result<ExecutionSummary> {
        let settings = self.initialize()?;
        let analyzer = ExecutionAnalyzer::new(&settings)?;

        let tags = self.tag_list();
        analyzer.matcher().ensure_defined(&tags)?;

        let logs = read_executors_logs(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        info!(count = logs.len(), "loaded executor logs");

        let now_ms = now_millis();
        let request = AnalysisRequest {
            file: self.input.display().to_string(),
            time_range: parse_time_range(self.range.as_deref(), now_ms),
            tags,
            now_ms,
        };

        Ok(analyzer.analyze(logs, &request)?)
    }

    pub fn render(&self, summary: &ExecutionSummary) -> anyhow::Result<String> {
        if self.json {
            let mut json = serde_json::to_string_pretty(summary)?;
            json.push('\n');
            Ok(json)
        } else {
            Ok(markdown::render(summary))
        }
    }

    /// Check both files exist, then load the settings
    fn initialize(&self) -> Result<Settings, ReportError> {
        if !self.input.exists() {
            return Err(ReportError::Config(format!(
                "input file '{}' does not exist",
                self.input.display()
            )));
        }
        if !self.settings.exists() {
            return Err(ReportError::Config(format!(
                "settings file '{}' does not exist",
                self.settings.display()
            )));
        }
        read_settings(&self.settings)
    }

    /// Requested tag names, trimmed, with empty entries dropped
    fn tag_list(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}
