// Shared prompt fragments used by both screening sessions.
// Session-specific instructions live in review/prompts.rs.

/// Closing delimiter that ends every resume block, in the uploaded document
/// and in the model replies.
pub const RESUME_CLOSE_TAG: &str = "</resume>";

/// Reminds the model that its reply is parsed by position and punctuation.
pub const FORMAT_DISCIPLINE: &str = "\
    Follow the format below exactly. Do not drop any bracket such as <> or the closing \
    </resume> tag, and do not change spacing or punctuation, because the reply is parsed \
    mechanically and any deviation loses data.";

/// Wraps the job description in the tags both sessions expect.
pub fn job_description_block(job_description: &str) -> String {
    format!("<Job Description>\n{job_description}\n</Job Description>\n")
}
