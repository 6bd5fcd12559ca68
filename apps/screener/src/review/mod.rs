// Screening round: prompts, model requests, and parsing of both replies.
// All model calls go through llm_client; nothing here talks HTTP directly.

pub mod critic;
pub mod parser;
pub mod prompts;
pub mod requester;

pub use requester::{run_review, ReviewOutcome, ReviewRequest};
