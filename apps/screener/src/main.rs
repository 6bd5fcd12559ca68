mod cli;
mod config;
mod errors;
mod ingest;
mod llm_client;
mod models;
mod render;
mod review;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::ingest::load_resume_dir;
use crate::llm_client::{GenerationConfig, LlmClient};
use crate::review::{run_review, ReviewOutcome, ReviewRequest};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on a missing GEMINI_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging; stdout is reserved for the summary
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli, config).await {
        error!("Screening run failed: {e:#}");
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let criteria = cli.criteria()?;
    info!("Judging criteria: {criteria}");

    let job_description = std::fs::read_to_string(&cli.job_description).with_context(|| {
        format!(
            "Failed to read job description from {}",
            cli.job_description.display()
        )
    })?;

    let resumes = load_resume_dir(&cli.resumes)?;
    info!(
        "Loaded {} resumes from {}",
        resumes.len(),
        cli.resumes.display()
    );

    let llm = LlmClient::new(&config)?;
    info!("LLM client initialized (model: {})", llm.model());

    let mut generation = GenerationConfig::reviewer();
    if let Some(temperature) = cli.temperature {
        generation = generation.with_temperature(temperature);
    }

    let outcome = run_review(
        &llm,
        &ReviewRequest {
            job_description: &job_description,
            resumes: &resumes,
            criteria: &criteria,
            config: generation,
        },
    )
    .await?;

    if cli.show_replies {
        println!("===== Reviewer =====\n{}", outcome.reviewer_reply);
        println!("===== Critic =====\n{}", outcome.critic_reply);
    }

    render::write_scores_csv(&cli.csv, &criteria, &outcome.records)?;

    let chart_path = match &cli.chart {
        Some(path) => path.clone(),
        None => temp_chart_path()?,
    };
    let title = format!(
        "Resume screening {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );
    render::write_chart(
        &chart_path,
        &render::project_traces(&outcome.records, &criteria),
        &title,
    )?;
    if cli.open {
        render::open_in_browser(&chart_path);
    }

    print_summary(&outcome, &cli.csv, &chart_path);
    Ok(())
}

fn temp_chart_path() -> Result<PathBuf> {
    let (_, path) = tempfile::Builder::new()
        .prefix("resume-scores-")
        .suffix(".html")
        .tempfile()
        .context("Failed to create a temporary chart file")?
        .keep()
        .context("Failed to keep the temporary chart file")?;
    Ok(path)
}

fn print_summary(outcome: &ReviewOutcome, csv_path: &Path, chart_path: &Path) {
    for record in &outcome.records {
        let name = if record.file_name.is_empty() {
            "<untagged>"
        } else {
            record.file_name.as_str()
        };
        let marker = if record.is_complete() { "" } else { " (incomplete review)" };
        println!("{name}: fit {}{marker}", record.fit_score);

        let scores: Vec<String> = record
            .criterion_scores
            .iter()
            .map(|(criterion, score)| format!("{criterion} {score}"))
            .collect();
        println!("  scores: {}", scores.join(", "));
        if !record.missing_criteria.is_empty() {
            println!("  not scored by reviewer: {}", record.missing_criteria.join(", "));
        }

        match outcome.verdict_for(&record.file_name) {
            Some(verdict) => {
                let stance = match verdict.agrees {
                    Some(true) => "agrees",
                    Some(false) => "disagrees",
                    None => "no stance",
                };
                println!(
                    "  critic {stance}: {}",
                    verdict.comment.as_deref().unwrap_or("(no comment)")
                );
            }
            None => println!("  critic: no verdict"),
        }
    }

    println!("Scores CSV: {}", csv_path.display());
    println!("Spider chart: {}", chart_path.display());
}
