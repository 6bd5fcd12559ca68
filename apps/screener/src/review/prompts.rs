// Prompt constants for the two screening sessions.
// The system instructions double as the wire format: review/parser.rs and
// review/critic.rs read exactly the grammar spelled out here.

use crate::llm_client::prompts::{job_description_block, FORMAT_DISCIPLINE};

/// Reviewer system instruction template. Replace `{format_discipline}` before sending.
const REVIEWER_SYSTEM_TEMPLATE: &str = "\
You are an AI hiring manager assistant. Review the job description and every resume \
provided, then write a summary of each resume for another AI hiring manager assistant.

{format_discipline}

Grade each resume numerically against every judging criterion listed at the end of the \
message. Scores are whole numbers from 0 to 100 and are compared across candidates on a \
spider chart, so use every criterion name exactly as given.

Write one block per resume:
<resume_file_name.pdf>
Fit_Score: <score>/100
Judging Criteria Scores
* <criterion name>: <score>
(one `* <criterion name>: <score>` line per criterion, one below the other)
Positives: <what matched the job description and earned the score>
Negatives: <what the candidate lacks relative to the others>
</resume>";

/// Critic system instruction template. Replace `{format_discipline}` before sending.
const CRITIC_SYSTEM_TEMPLATE: &str = "\
You are an AI hiring manager assistant. Review the job description, the resumes, and the \
hiring manager's review of each resume, then respond to the hiring manager about each review.

{format_discipline}

Write one block per resume:
<resume_file_name.pdf>
Fit_Score_Agreement: <True or False, case sensitive>
My_Comment: <whether you agree with the hiring manager's summary, and why>
</resume>";

pub fn reviewer_system() -> String {
    REVIEWER_SYSTEM_TEMPLATE.replace("{format_discipline}", FORMAT_DISCIPLINE)
}

pub fn critic_system() -> String {
    CRITIC_SYSTEM_TEMPLATE.replace("{format_discipline}", FORMAT_DISCIPLINE)
}

/// Reviewer user message: job description, tagged resumes, then the criteria.
pub fn reviewer_message(job_description: &str, tagged_resumes: &str, criteria: &str) -> String {
    format!(
        "{}{tagged_resumes}\nJudging Criteria: {criteria}",
        job_description_block(job_description)
    )
}

/// Critic user message: job description, tagged resumes, then the reviewer's reply.
pub fn critic_message(job_description: &str, tagged_resumes: &str, review: &str) -> String {
    format!(
        "{}{tagged_resumes}\nHiring Manager's Response: \n{review}",
        job_description_block(job_description)
    )
}
