//! Filtering and aggregation over executor logs

pub mod aggregator;
pub mod analyzer;
pub mod filter;
pub mod matcher;
pub mod parent;
pub mod time_range;

pub use aggregator::CostAggregator;
pub use analyzer::{AnalysisRequest, ExecutionAnalyzer};
pub use filter::LogFilter;
pub use matcher::{CompiledTag, TagMatcher};
pub use parent::{extract_actual_parent, ParentAggregator};
pub use time_range::{normalize, now_millis, parse_relative, parse_time_range, TimeBound};
