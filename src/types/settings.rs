//! Settings document: tag predicates and hourly cost rates

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// A named predicate over one log field
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TagDefinition {
    /// Name of the log column to test
    #[serde(rename = "matchField")]
    pub match_field: String,
    /// Regular expression searched for anywhere in the column value
    #[serde(rename = "matchPattern")]
    pub match_pattern: String,
}

/// Hourly rate billed for builds matching a tag
#[derive(Debug, Clone, PartialEq)]
pub struct CostRate {
    pub tag: String,
    /// `None` when the settings give `null`; billed as zero
    pub hourly: Option<f64>,
}

/// Parsed settings document
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub tags: HashMap<String, TagDefinition>,
    /// Cost rates in declaration order
    #[serde(default, deserialize_with = "deserialize_cost_rates")]
    pub costs: Vec<CostRate>,
}

impl Settings {
    pub fn tag(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(name)
    }

    pub fn rate(&self, tag: &str) -> Option<&CostRate> {
        self.costs.iter().find(|c| c.tag == tag)
    }

    /// Cost tags that have no matching tag definition.
    ///
    /// These never match any log, so they always contribute zero cost.
    pub fn orphan_cost_tags(&self) -> Vec<&str> {
        self.costs
            .iter()
            .filter(|c| !self.tags.contains_key(&c.tag))
            .map(|c| c.tag.as_str())
            .collect()
    }
}

/// Read the `costs` object keeping key order, which breaks ranking ties.
fn deserialize_cost_rates<'de, D>(deserializer: D) -> Result<Vec<CostRate>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedRates;

    impl<'de> Visitor<'de> for OrderedRates {
        type Value = Vec<CostRate>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of tag name to hourly cost")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut rates: Vec<CostRate> = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((tag, hourly)) = map.next_entry::<String, Option<f64>>()? {
                // Later duplicates win, like a JSON object would
                if let Some(existing) = rates.iter_mut().find(|r| r.tag == tag) {
                    existing.hourly = hourly;
                } else {
                    rates.push(CostRate { tag, hourly });
                }
            }
            Ok(rates)
        }
    }

    deserializer.deserialize_map(OrderedRates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "tags": {
            "windows": { "matchField": "Label", "matchPattern": "win" },
            "linux": { "matchField": "Label", "matchPattern": "^linux" }
        },
        "costs": {
            "windows": 10.0,
            "linux": null,
            "gpu": 3.5
        }
    }"#;

    #[test]
    fn test_parse_tags() {
        let settings: Settings = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(settings.tags.len(), 2);
        let windows = settings.tag("windows").unwrap();
        assert_eq!(windows.match_field, "Label");
        assert_eq!(windows.match_pattern, "win");
    }

    #[test]
    fn test_costs_keep_declaration_order() {
        let settings: Settings = serde_json::from_str(SAMPLE).unwrap();
        let order: Vec<&str> = settings.costs.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(order, vec!["windows", "linux", "gpu"]);
        assert_eq!(settings.rate("windows").unwrap().hourly, Some(10.0));
        assert_eq!(settings.rate("linux").unwrap().hourly, None);
        assert!(settings.rate("arm").is_none());
    }

    #[test]
    fn test_orphan_cost_tags() {
        let settings: Settings = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(settings.orphan_cost_tags(), vec!["gpu"]);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(settings.tags.is_empty());
        assert!(settings.costs.is_empty());
    }

    #[test]
    fn test_non_numeric_rate_rejected() {
        let result: std::result::Result<Settings, _> =
            serde_json::from_str(r#"{ "costs": { "windows": "ten" } }"#);
        assert!(result.is_err());
    }
}
