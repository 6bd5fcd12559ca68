use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-002";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const MAX_LLM_ATTEMPTS: u32 = 10;

/// Runtime configuration loaded from environment variables.
/// Fails at startup if the API key is missing. Run inputs (directories,
/// criteria, output paths) come from the command line instead, see `cli.rs`.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout_secs: u64,
    /// 1 means a single attempt, no retry.
    pub llm_max_attempts: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let llm_max_attempts: u32 = parse_or(&lookup, "LLM_MAX_ATTEMPTS", 1)?;
        if !(1..=MAX_LLM_ATTEMPTS).contains(&llm_max_attempts) {
            anyhow::bail!("LLM_MAX_ATTEMPTS must be between 1 and {MAX_LLM_ATTEMPTS}");
        }

        Ok(Config {
            gemini_api_key: lookup("GEMINI_API_KEY")
                .filter(|k| !k.trim().is_empty())
                .context("Required environment variable 'GEMINI_API_KEY' is not set")?
                .trim()
                .to_string(),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            llm_timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", 300)?,
            llm_max_attempts,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
