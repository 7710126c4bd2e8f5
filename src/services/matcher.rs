//! Tag predicate evaluation

use std::collections::HashMap;

use regex::Regex;

use crate::types::{LogRecord, ReportError, Result, Settings, TagDefinition};

/// A tag definition with its pattern compiled
#[derive(Debug, Clone)]
pub struct CompiledTag {
    field: String,
    pattern: Regex,
}

impl CompiledTag {
    pub fn compile(name: &str, definition: &TagDefinition) -> Result<Self> {
        let pattern =
            Regex::new(&definition.match_pattern).map_err(|source| ReportError::InvalidPattern {
                tag: name.to_string(),
                source,
            })?;
        Ok(Self {
            field: definition.match_field.clone(),
            pattern,
        })
    }

    /// Whether the pattern occurs anywhere in the record's `matchField`.
    ///
    /// A record without that column is a data error, not a mismatch.
    pub fn matches(&self, record: &LogRecord) -> Result<bool> {
        let value = record.require(&self.field)?;
        Ok(self.pattern.is_match(value))
    }
}

/// All tags from the settings, compiled once up front
#[derive(Debug, Clone, Default)]
pub struct TagMatcher {
    tags: HashMap<String, CompiledTag>,
}

impl TagMatcher {
    /// Compile every tag in `settings`; an invalid pattern fails the whole set
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let tags = settings
            .tags
            .iter()
            .map(|(name, def)| CompiledTag::compile(name, def).map(|tag| (name.clone(), tag)))
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { tags })
    }

    pub fn get(&self, name: &str) -> Option<&CompiledTag> {
        self.tags.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Fail with [`ReportError::UnknownTag`] on the first name with no definition
    pub fn ensure_defined<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        match names.iter().find(|n| !self.contains(n.as_ref())) {
            Some(missing) => Err(ReportError::UnknownTag(missing.as_ref().to_string())),
            None => Ok(()),
        }
    }

    /// Whether `record` satisfies every named tag.
    ///
    /// Returns `None` when a name has no definition; callers decide whether
    /// that is an error or simply no match.
    pub fn matches_all<S: AsRef<str>>(
        &self,
        record: &LogRecord,
        names: &[S],
    ) -> Result<Option<bool>> {
        for name in names {
            let Some(tag) = self.get(name.as_ref()) else {
                return Ok(None);
            };
            if !tag.matches(record)? {
                return Ok(Some(false));
            }
        }
        Ok(Some(true))
    }
}
