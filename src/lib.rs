//! Jenkins executor log analysis
//!
//! Filters an executor log by time window and tags, then totals build
//! duration and cost per parent job and per cost tag.

pub mod cli;
pub mod logging;
pub mod parsers;
pub mod services;
pub mod types;
