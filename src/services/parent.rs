//! Per-parent-job aggregation
//!
//! Pull-request builds (`.../job/PR-123`) roll up into their base job.

use std::collections::HashMap;
use std::slice;

use crate::services::CostAggregator;
use crate::types::{LogRecord, ParentAnalysis, Ranking, Result};

/// Strip a trailing `/job/PR-<digits>` segment from a job path.
///
/// # Examples
/// ```
/// use executors_report::services::parent::extract_actual_parent;
///
/// assert_eq!(extract_actual_parent("foo/bar/job/PR-42"), "foo/bar");
/// assert_eq!(extract_actual_parent("foo/bar"), "foo/bar");
/// ```
pub fn extract_actual_parent(parent: &str) -> &str {
    if let Some(idx) = parent.rfind("/job/PR-") {
        let number = &parent[idx + "/job/PR-".len()..];
        if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
            return &parent[..idx];
        }
    }
    parent
}

#[derive(Debug, Default)]
struct ParentTotals {
    duration: u64,
    cost: f64,
    builds: u64,
}

fn rank<V: Copy + PartialOrd>(
    groups: &[(String, ParentTotals)],
    metric: impl Fn(&ParentTotals) -> V,
) -> Ranking<V> {
    Ranking::from_ordered(
        groups
            .iter()
            .map(|(name, totals)| (name.clone(), metric(totals)))
            .collect(),
    )
}

/// Groups eligible logs by parent job and ranks the groups
pub struct ParentAggregator<'a> {
    costs: &'a CostAggregator<'a>,
}

impl<'a> ParentAggregator<'a> {
    pub fn new(costs: &'a CostAggregator<'a>) -> Self {
        Self { costs }
    }

    /// Duration, cost and build count per parent, each ranked highest first.
    ///
    /// Each log is costed on its own across every cost tag, so a build
    /// matching several cost tags is billed once per tag. Ties rank by first
    /// appearance in `logs`.
    pub fn analyze(&self, logs: &[LogRecord]) -> Result<ParentAnalysis> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, ParentTotals)> = Vec::new();

        for log in logs.iter().filter(|l| l.is_eligible()) {
            let parent = extract_actual_parent(log.parent()?);
            let duration = log.duration()?;
            let cost = self.costs.cost(slice::from_ref(log), None)?;

            let slot = match index.get(parent) {
                Some(&slot) => slot,
                None => {
                    groups.push((parent.to_string(), ParentTotals::default()));
                    index.insert(parent.to_string(), groups.len() - 1);
                    groups.len() - 1
                }
            };
            let totals = &mut groups[slot].1;
            totals.duration = totals.duration.saturating_add(duration);
            totals.cost += cost;
            totals.builds += 1;
        }

        Ok(ParentAnalysis {
            by_duration: rank(&groups, |t| t.duration),
            by_cost: rank(&groups, |t| t.cost),
            by_build_times: rank(&groups, |t| t.builds),
        })
    }
}
