//! Review Requester: runs one screening round against the model.
//!
//! Flow: reviewer session (JD + resumes + criteria) → critic session (JD +
//! resumes + reviewer reply) → parse both replies.
//!
//! Each session is created here and dropped when the round ends; the round
//! holds no state between runs.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::ingest::ResumeDocument;
use crate::llm_client::{ChatSession, GenerationConfig, GenerativeModel};
use crate::models::{CriteriaList, CriticVerdict, ReviewRecord};
use crate::review::critic::parse_critic_response;
use crate::review::parser::parse_review_response;
use crate::review::prompts::{critic_message, critic_system, reviewer_message, reviewer_system};

/// Inputs of one screening round.
pub struct ReviewRequest<'a> {
    pub job_description: &'a str,
    pub resumes: &'a ResumeDocument,
    pub criteria: &'a CriteriaList,
    pub config: GenerationConfig,
}

/// Raw replies of both sessions plus their parsed forms.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub reviewer_reply: String,
    pub critic_reply: String,
    pub records: Vec<ReviewRecord>,
    pub verdicts: Vec<CriticVerdict>,
}

impl ReviewOutcome {
    pub fn verdict_for(&self, file_name: &str) -> Option<&CriticVerdict> {
        self.verdicts.iter().find(|v| v.file_name == file_name)
    }
}

/// Runs the reviewer, then the critic, then parses both replies.
/// Model failures propagate; parse problems degrade per block.
pub async fn run_review(
    model: &dyn GenerativeModel,
    request: &ReviewRequest<'_>,
) -> Result<ReviewOutcome, AppError> {
    if request.resumes.is_empty() {
        return Err(AppError::Validation(
            "no PDF resumes found to review".to_string(),
        ));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job description is empty".to_string(),
        ));
    }

    let tagged = request.resumes.tagged();

    info!(
        "Requesting review of {} resumes on {} criteria",
        request.resumes.len(),
        request.criteria.len()
    );
    let mut reviewer = ChatSession::start(
        model,
        "reviewer",
        reviewer_system(),
        request.config.clone(),
    );
    let reviewer_reply = reviewer
        .send_message(reviewer_message(
            request.job_description,
            &tagged,
            &request.criteria.to_string(),
        ))
        .await?;

    info!("Requesting critic pass on the review");
    let mut critic = ChatSession::start(model, "critic", critic_system(), request.config.clone());
    let critic_reply = critic
        .send_message(critic_message(
            request.job_description,
            &tagged,
            &reviewer_reply,
        ))
        .await?;

    let records = parse_review_response(&reviewer_reply, request.criteria);
    let verdicts = parse_critic_response(&critic_reply);

    for record in &records {
        if !record.file_name.is_empty() && !request.resumes.contains(&record.file_name) {
            warn!(file = %record.file_name, "reviewer scored a file that was not submitted");
        }
    }
    if records.len() != request.resumes.len() {
        warn!(
            "reviewer returned {} blocks for {} resumes",
            records.len(),
            request.resumes.len()
        );
    }
    info!(
        "Parsed {} review records and {} critic verdicts",
        records.len(),
        verdicts.len()
    );

    Ok(ReviewOutcome {
        reviewer_reply,
        critic_reply,
        records,
        verdicts,
    })
}
