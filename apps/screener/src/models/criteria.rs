use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;

/// Ordered judging criteria chosen by the recruiter for one run.
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriteriaList(Vec<String>);

impl CriteriaList {
    /// Parses a comma-separated criteria string: each entry is trimmed and
    /// capitalized (first letter upper, rest lower); empty entries are dropped
    /// and a repeated name keeps only its first position.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let criteria = Self::from_names(
            input
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(capitalize),
        );

        if criteria.is_empty() {
            return Err(AppError::Validation(
                "at least one judging criterion is required".to_string(),
            ));
        }

        Ok(criteria)
    }

    /// Wraps names that are already normalized (e.g. read back from a CSV header).
    /// Repeats are dropped so each criterion owns exactly one score column.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique = IndexSet::new();
        for name in names.into_iter().map(Into::into) {
            if unique.contains(&name) {
                warn!(criterion = %name, "dropping repeated judging criterion");
            } else {
                unique.insert(name);
            }
        }
        Self(unique.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a CriteriaList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for CriteriaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
