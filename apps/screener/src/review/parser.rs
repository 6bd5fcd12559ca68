//! Response Parser: turns the reviewer's free-text reply into `ReviewRecord`s.
//!
//! Best effort by construction. The reply comes from a sampling model, so a
//! malformed block never aborts the batch; missing pieces degrade to the
//! `N/A` fit score, an empty file name, or a zero criterion score, and every
//! degradation is logged and recorded on the record.
//!
//! Block grammar (one per resume, closed by `</resume>`):
//!
//! ```text
//! <name.pdf>
//! Fit_Score: 77/100
//! * Communication: 80
//! * Coding: 90
//! Positives: ...
//! Negatives: ...
//! </resume>
//! ```

use std::collections::HashMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::llm_client::prompts::RESUME_CLOSE_TAG;
use crate::models::{CriteriaList, FitScore, ReviewRecord};

const PDF_TAG_END: &str = ".pdf>";

/// `Fit_Score: <digits>/100`
static FIT_SCORE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Fit_Score: (\d+)/100").expect("Failed to compile fit score regex")
});

/// `* <criterion name>: <digits>`; the `: ` separator must match exactly.
static CRITERION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\* (.+?): (\d+)").expect("Failed to compile criterion score regex")
});

// ────────────────────────────────────────────────────────────────────────────
// Block splitting and tags (shared with the critic parser)
// ────────────────────────────────────────────────────────────────────────────

/// Splits a reply on the closing delimiter and drops blank blocks, which
/// includes whatever trails the last real block.
pub fn split_blocks(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(RESUME_CLOSE_TAG)
        .filter(|block| !block.trim().is_empty())
}

/// Reads the `<name.pdf>` tag that opens a block.
///
/// Takes the text before the first `.pdf>`, drops everything up to and
/// including the opening `<`, and re-appends `.pdf`. Returns `None` when the
/// block has no such tag or the name inside it is blank.
pub fn block_file_name(block: &str) -> Option<String> {
    let block = block.trim_matches(|c| c == '\n' || c == '\r');
    let (prefix, _) = block.split_once(PDF_TAG_END)?;
    let name = match prefix.rfind('<') {
        Some(open) => &prefix[open + 1..],
        None => prefix,
    }
    .trim();

    if name.is_empty() {
        None
    } else {
        Some(format!("{name}.pdf"))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Reviewer reply
// ────────────────────────────────────────────────────────────────────────────

/// Parses every resume block of a reviewer reply, in reply order.
///
/// Each record carries exactly one score per requested criterion, in the
/// recruiter's order; scores for names outside `criteria` are discarded.
pub fn parse_review_response(raw: &str, criteria: &CriteriaList) -> Vec<ReviewRecord> {
    split_blocks(raw)
        .enumerate()
        .map(|(index, block)| parse_block(index, block, criteria))
        .collect()
}

fn parse_block(index: usize, block: &str, criteria: &CriteriaList) -> ReviewRecord {
    let file_name = block_file_name(block).unwrap_or_else(|| {
        warn!(block = index, "review block has no <file.pdf> tag");
        String::new()
    });

    let fit_score = extract_fit_score(block).unwrap_or_else(|| {
        warn!(block = index, file = %file_name, "review block has no Fit_Score line");
        FitScore::NotAvailable
    });

    let extracted = extract_criterion_scores(block);

    let mut criterion_scores = IndexMap::with_capacity(criteria.len());
    let mut missing_criteria = Vec::new();
    for name in criteria {
        let score = match extracted.get(name.as_str()) {
            Some(&score) => score,
            None => {
                missing_criteria.push(name.clone());
                0
            }
        };
        criterion_scores.insert(name.clone(), score);
    }

    if !missing_criteria.is_empty() {
        warn!(
            block = index,
            file = %file_name,
            missing = ?missing_criteria,
            "reviewer omitted criteria; scoring them 0"
        );
    }

    for unused in extracted
        .keys()
        .filter(|name| !criteria.iter().any(|c| c.as_str() == **name))
    {
        warn!(block = index, file = %file_name, criterion = %unused, "ignoring unrequested criterion");
    }

    ReviewRecord {
        file_name,
        fit_score,
        criterion_scores,
        missing_criteria,
    }
}

fn extract_fit_score(block: &str) -> Option<FitScore> {
    let caps = FIT_SCORE_PATTERN.captures(block)?;
    let score = caps[1].parse::<u32>().ok()?;
    if score > 100 {
        warn!(score, "fit score above 100 kept as reported");
    }
    Some(FitScore::Score(score))
}

/// Collects every bulleted `name: score` pair. A later duplicate wins.
fn extract_criterion_scores(block: &str) -> HashMap<&str, u32> {
    let mut scores = HashMap::new();
    for caps in CRITERION_PATTERN.captures_iter(block) {
        let (Some(name), Some(digits)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        match digits.as_str().parse::<u32>() {
            Ok(score) => {
                scores.insert(name.as_str(), score);
            }
            Err(_) => warn!(criterion = name.as_str(), "criterion score out of range, dropped"),
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> CriteriaList {
        CriteriaList::from_names(["Communication", "Coding", "Leadership"])
    }

    fn block(name: &str, fit: u32, scores: &[(&str, u32)]) -> String {
        let mut text = format!("<{name}>\nFit_Score: {fit}/100\nJudging Criteria Scores\n");
        for (criterion, score) in scores {
            text.push_str(&format!("* {criterion}: {score}\n"));
        }
        text.push_str("Positives: solid projects\nNegatives: little teamwork\n</resume>\n");
        text
    }

    #[test]
    fn test_single_block_example() {
        let raw = "<a.pdf>\nFit_Score: 77/100\n* Communication: 80\n* Coding: 90\n</resume>";
        let records = parse_review_response(raw, &criteria());

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.file_name, "a.pdf");
        assert_eq!(record.fit_score, FitScore::Score(77));
        let scores: Vec<(&str, u32)> = record
            .criterion_scores
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(
            scores,
            vec![("Communication", 80), ("Coding", 90), ("Leadership", 0)]
        );
        assert_eq!(record.missing_criteria, vec!["Leadership".to_string()]);
    }

    #[test]
    fn test_n_blocks_yield_n_records_with_full_criteria() {
        let raw = [
            block("alice.pdf", 81, &[("Communication", 70), ("Coding", 88), ("Leadership", 60)]),
            block("bob.pdf", 64, &[("Coding", 75)]),
            block("carol.pdf", 92, &[]),
        ]
        .concat();

        let records = parse_review_response(&raw, &criteria());
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.criterion_scores.len(), criteria().len());
        }
        let names: Vec<_> = records.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["alice.pdf", "bob.pdf", "carol.pdf"]);
        assert!(records[0].is_complete());
    }

    #[test]
    fn test_scores_follow_criteria_order_not_reply_order() {
        let raw = block("a.pdf", 50, &[("Leadership", 3), ("Communication", 1), ("Coding", 2)]);
        let record = &parse_review_response(&raw, &criteria())[0];
        let keys: Vec<_> = record.criterion_scores.keys().cloned().collect();
        assert_eq!(keys, vec!["Communication", "Coding", "Leadership"]);
        assert_eq!(record.score_values(), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_fit_score_is_sentinel() {
        let raw = "<a.pdf>\n* Coding: 90\n</resume>";
        let records = parse_review_response(raw, &criteria());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fit_score, FitScore::NotAvailable);
        assert_eq!(records[0].score("Coding"), Some(90));
    }

    #[test]
    fn test_unrequested_criterion_is_dropped() {
        let raw = block("a.pdf", 60, &[("Coding", 70), ("Charisma", 99)]);
        let record = &parse_review_response(&raw, &criteria())[0];
        assert!(!record.criterion_scores.contains_key("Charisma"));
        assert_eq!(record.criterion_scores.len(), 3);
    }

    #[test]
    fn test_missing_criterion_defaults_to_zero_and_is_recorded() {
        let raw = block("a.pdf", 60, &[("Communication", 70)]);
        let record = &parse_review_response(&raw, &criteria())[0];
        assert_eq!(record.score("Coding"), Some(0));
        assert_eq!(record.score("Leadership"), Some(0));
        assert_eq!(
            record.missing_criteria,
            vec!["Coding".to_string(), "Leadership".to_string()]
        );
    }

    #[test]
    fn test_genuine_zero_is_not_reported_missing() {
        let raw = block("a.pdf", 60, &[("Communication", 0), ("Coding", 0), ("Leadership", 0)]);
        let record = &parse_review_response(&raw, &criteria())[0];
        assert_eq!(record.score_values(), vec![0, 0, 0]);
        assert!(record.missing_criteria.is_empty());
    }

    #[test]
    fn test_separator_deviation_drops_criterion() {
        let raw = "<a.pdf>\nFit_Score: 70/100\n* Coding : 90\n* communication: 80\n</resume>";
        let record = &parse_review_response(raw, &criteria())[0];
        assert_eq!(record.score("Coding"), Some(0));
        assert_eq!(record.score("Communication"), Some(0));
        assert_eq!(record.missing_criteria.len(), 3);
    }

    #[test]
    fn test_duplicate_criterion_last_wins() {
        let raw = "<a.pdf>\nFit_Score: 70/100\n* Coding: 10\n* Coding: 85\n</resume>";
        let record = &parse_review_response(raw, &criteria())[0];
        assert_eq!(record.score("Coding"), Some(85));
    }

    #[test]
    fn test_duplicate_criteria_still_one_score_per_criterion() {
        let criteria = CriteriaList::parse("coding, Coding, leadership").unwrap();
        let raw = "<a.pdf>\nFit_Score: 77/100\n* Coding: 90\n</resume>";

        let record = &parse_review_response(raw, &criteria)[0];

        assert_eq!(record.criterion_scores.len(), criteria.len());
        assert_eq!(record.score_values(), vec![90, 0]);
        assert_eq!(record.missing_criteria, vec!["Leadership".to_string()]);
    }

    #[test]
    fn test_trailing_remainder_and_blank_blocks_discarded() {
        let raw = format!(
            "{}\n   \n</resume>\n\n",
            block("a.pdf", 70, &[("Coding", 80)])
        );
        assert_eq!(parse_review_response(&raw, &criteria()).len(), 1);
    }

    #[test]
    fn test_empty_reply_yields_no_records() {
        assert!(parse_review_response("", &criteria()).is_empty());
        assert!(parse_review_response("\n\n", &criteria()).is_empty());
    }

    #[test]
    fn test_block_without_tag_is_tolerated() {
        let raw = "Fit_Score: 40/100\n* Coding: 50\n</resume>";
        let records = parse_review_response(raw, &criteria());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name, "");
        assert_eq!(records[0].fit_score, FitScore::Score(40));
        assert_eq!(records[0].score("Coding"), Some(50));
    }

    #[test]
    fn test_overflowing_score_is_dropped() {
        let raw = "<a.pdf>\nFit_Score: 99999999999/100\n* Coding: 99999999999\n</resume>";
        let record = &parse_review_response(raw, &criteria())[0];
        assert_eq!(record.fit_score, FitScore::NotAvailable);
        assert_eq!(record.score("Coding"), Some(0));
    }

    #[test]
    fn test_block_file_name_variants() {
        assert_eq!(block_file_name("\n<jane doe.pdf>\nFit"), Some("jane doe.pdf".to_string()));
        assert_eq!(
            block_file_name("Here is my review:\n<x.pdf>\n"),
            Some("x.pdf".to_string())
        );
        assert_eq!(block_file_name("<notes.txt>\nFit"), None);
        assert_eq!(block_file_name("<.pdf>"), None);
    }
}
