//! Critic Parser: reads the second opinion the critic session gives on each review.
//!
//! Same block framing and tolerance as the reviewer parser. Expected block:
//!
//! ```text
//! <name.pdf>
//! Fit_Score_Agreement: True
//! My_Comment: The score is fair given ...
//! </resume>
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::models::CriticVerdict;
use crate::review::parser::{block_file_name, split_blocks};

static AGREEMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Fit_Score_Agreement: (True|False|T|F)\b")
        .expect("Failed to compile agreement regex")
});

/// Everything after `My_Comment:` up to the end of the block.
static COMMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)My_Comment:(.*)").expect("Failed to compile comment regex")
});

/// Parses every block of a critic reply, in reply order.
pub fn parse_critic_response(raw: &str) -> Vec<CriticVerdict> {
    split_blocks(raw)
        .enumerate()
        .map(|(index, block)| {
            let file_name = block_file_name(block).unwrap_or_default();

            let agrees = AGREEMENT_PATTERN
                .captures(block)
                .map(|caps| matches!(&caps[1], "True" | "T"));
            if agrees.is_none() {
                warn!(block = index, file = %file_name, "critic block has no readable Fit_Score_Agreement");
            }

            let comment = COMMENT_PATTERN
                .captures(block)
                .map(|caps| caps[1].trim().to_string())
                .filter(|c| !c.is_empty());

            CriticVerdict {
                file_name,
                agrees,
                comment,
            }
        })
        .collect()
}
