use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::errors::AppError;
use crate::models::CriteriaList;
use crate::render::read_criteria_header;

/// Screen a directory of PDF resumes against a job description with a
/// reviewer and a critic model, then chart and tabulate the scores.
#[derive(Debug, Parser)]
#[command(name = "screener", version, about)]
pub struct Cli {
    /// Directory holding the PDF resumes
    #[arg(long, default_value = "ENGINEERING")]
    pub resumes: PathBuf,

    /// Comma-separated judging criteria; prompted on stdin when omitted
    #[arg(long)]
    pub criteria: Option<String>,

    /// Reuse the criteria columns of a scores CSV from an earlier run
    #[arg(long, conflicts_with = "criteria")]
    pub criteria_from: Option<PathBuf>,

    /// Plain-text job description file
    #[arg(long, default_value = "job_description.txt")]
    pub job_description: PathBuf,

    /// Scores CSV output path (overwritten)
    #[arg(long, default_value = "resume_scores.csv")]
    pub csv: PathBuf,

    /// Spider chart HTML output path; a temporary file when omitted
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Open the spider chart in the default browser
    #[arg(long)]
    pub open: bool,

    /// Sampling temperature for both sessions
    #[arg(long, value_parser = parse_temperature)]
    pub temperature: Option<f32>,

    /// Print the raw reviewer and critic replies
    #[arg(long)]
    pub show_replies: bool,
}

impl Cli {
    /// Criteria from `--criteria`, an earlier CSV, or the recruiter on stdin.
    pub fn criteria(&self) -> Result<CriteriaList, AppError> {
        if let Some(raw) = &self.criteria {
            return CriteriaList::parse(raw);
        }
        if let Some(path) = &self.criteria_from {
            let criteria = read_criteria_header(path)?;
            if criteria.is_empty() {
                return Err(AppError::Validation(format!(
                    "{} has no criteria columns",
                    path.display()
                )));
            }
            return Ok(criteria);
        }
        let stdin = io::stdin();
        prompt_criteria(&mut stdin.lock(), &mut io::stdout())
    }
}

fn prompt_criteria(input: &mut impl BufRead, output: &mut impl Write) -> Result<CriteriaList, AppError> {
    let stdout_err = |e| AppError::io("<stdout>", e);
    write!(output, "Enter judgement criteria (CSV): ").map_err(stdout_err)?;
    output.flush().map_err(stdout_err)?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| AppError::io("<stdin>", e))?;
    CriteriaList::parse(&line)
}

fn parse_temperature(raw: &str) -> Result<f32, String> {
    let value: f32 = raw.parse().map_err(|_| format!("'{raw}' is not a number"))?;
    if (0.0..=2.0).contains(&value) {
        Ok(value)
    } else {
        Err("temperature must be between 0.0 and 2.0".to_string())
    }
}
