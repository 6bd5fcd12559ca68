use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Overall 0-100 suitability rating, or the sentinel when the reviewer left it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitScore {
    Score(u32),
    NotAvailable,
}

impl FitScore {
    pub const SENTINEL: &'static str = "N/A";
}

impl fmt::Display for FitScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitScore::Score(v) => write!(f, "{v}"),
            FitScore::NotAvailable => f.write_str(Self::SENTINEL),
        }
    }
}

impl Serialize for FitScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FitScore::Score(v) => serializer.serialize_u32(*v),
            FitScore::NotAvailable => serializer.serialize_str(Self::SENTINEL),
        }
    }
}

/// Structured review of one resume, parsed from the reviewer's reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    /// Empty when the block carried no `<name.pdf>` tag.
    pub file_name: String,
    pub fit_score: FitScore,
    /// One entry per requested criterion, in the recruiter's order.
    pub criterion_scores: IndexMap<String, u32>,
    /// Requested criteria the reviewer never scored; their value above is 0.
    pub missing_criteria: Vec<String>,
}

impl ReviewRecord {
    pub fn score(&self, criterion: &str) -> Option<u32> {
        self.criterion_scores.get(criterion).copied()
    }

    /// Scores in criteria order.
    #[cfg(test)]
    pub fn score_values(&self) -> Vec<u32> {
        self.criterion_scores.values().copied().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_criteria.is_empty() && self.fit_score != FitScore::NotAvailable
    }
}

/// The critic session's take on one reviewed resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticVerdict {
    pub file_name: String,
    /// `None` when the agreement line is missing or unreadable.
    pub agrees: Option<bool>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ReviewRecord {
        let mut scores = IndexMap::new();
        scores.insert("Communication".to_string(), 80);
        scores.insert("Leadership".to_string(), 0);
        ReviewRecord {
            file_name: "a.pdf".to_string(),
            fit_score: FitScore::Score(77),
            criterion_scores: scores,
            missing_criteria: vec!["Leadership".to_string()],
        }
    }

    #[test]
    fn test_fit_score_display() {
        assert_eq!(FitScore::Score(77).to_string(), "77");
        assert_eq!(FitScore::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn test_fit_score_serializes_number_or_sentinel() {
        assert_eq!(serde_json::to_string(&FitScore::Score(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&FitScore::NotAvailable).unwrap(),
            "\"N/A\""
        );
    }

    #[test]
    fn test_score_values_follow_map_order() {
        assert_eq!(record().score_values(), vec![80, 0]);
        assert_eq!(record().score("Communication"), Some(80));
        assert_eq!(record().score("Unknown"), None);
    }

    #[test]
    fn test_record_with_missing_criteria_is_incomplete() {
        assert!(!record().is_complete());
    }
}
