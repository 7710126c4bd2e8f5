//! Duration and cost aggregation over log sets

use crate::services::TagMatcher;
use crate::types::{CostTagAnalysis, LogRecord, Ranking, Result, Settings};

/// Milliseconds per billed hour
pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Computes build duration and cost from the settings' tags and rates.
///
/// Cost is summed per cost tag: a build matching two cost tags is billed
/// under both.
pub struct CostAggregator<'a> {
    settings: &'a Settings,
    matcher: &'a TagMatcher,
}

impl<'a> CostAggregator<'a> {
    pub fn new(settings: &'a Settings, matcher: &'a TagMatcher) -> Self {
        Self { settings, matcher }
    }

    /// Total `Duration` of eligible logs matching every tag in `tags`.
    ///
    /// Unlike [`LogFilter::by_tags`](crate::services::LogFilter::by_tags), an
    /// undefined tag is not an error here: it matches nothing, so the result
    /// is 0. Cost tags without a tag definition take this path.
    pub fn duration<S: AsRef<str>>(&self, logs: &[LogRecord], tags: &[S]) -> Result<u64> {
        if tags.iter().any(|t| !self.matcher.contains(t.as_ref())) {
            return Ok(0);
        }

        let mut total: u64 = 0;
        for log in logs.iter().filter(|l| l.is_eligible()) {
            if self.matcher.matches_all(log, tags)? == Some(true) {
                total = total.saturating_add(log.duration()?);
            }
        }
        Ok(total)
    }

    /// Cost of `logs`, for one cost tag or (with `None`) summed over all of them.
    ///
    /// A tag with no rate, or a `null` rate, costs nothing.
    pub fn cost(&self, logs: &[LogRecord], tag: Option<&str>) -> Result<f64> {
        let Some(tag) = tag else {
            let mut total = 0.0;
            for rate in &self.settings.costs {
                total += self.cost(logs, Some(rate.tag.as_str()))?;
            }
            return Ok(total);
        };

        let Some(hourly) = self.settings.rate(tag).and_then(|r| r.hourly) else {
            return Ok(0.0);
        };

        let duration = self.duration(logs, &[tag])?;
        Ok(hourly * duration as f64 / MS_PER_HOUR)
    }

    /// Cost per cost tag, highest first; ties keep settings order
    pub fn by_cost_tag(&self, logs: &[LogRecord]) -> Result<CostTagAnalysis> {
        let mut costs = Vec::with_capacity(self.settings.costs.len());
        for rate in &self.settings.costs {
            costs.push((rate.tag.clone(), self.cost(logs, Some(rate.tag.as_str()))?));
        }
        Ok(Ranking::from_ordered(costs).into())
    }
}
