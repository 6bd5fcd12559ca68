/// LLM Client: the single point of entry for all Gemini API calls in the screener.
///
/// No other module talks to the Generative Language API directly. Callers hold a
/// `ChatSession` (see `session.rs`) that owns the conversation for one request
/// lifecycle and sends through the `GenerativeModel` trait implemented here.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;
pub mod session;

pub use session::ChatSession;

const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Gave up after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling parameters sent with every request of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl GenerationConfig {
    /// Reviewer/critic defaults: 0.5 temperature, 0.95 nucleus, top-40, 8192 tokens, plain text.
    pub fn reviewer() -> Self {
        Self {
            temperature: 0.5,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            response_mime_type: "text/plain".to_string(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Conversation role as the Gemini API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self::turn(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::turn(Role::Model, text)
    }

    fn turn(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    /// Concatenates every text part of this turn.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: &'a [Content],
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: [SystemPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct SystemPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    /// Extracts the text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(Content::text)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// A text model that continues a conversation. Implemented by `LlmClient`;
/// tests substitute scripted models.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        contents: &[Content],
        config: &GenerationConfig,
    ) -> Result<String, LlmError>;
}

const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Backoff before retry number `attempt` (1-based): 1s, 2s, 4s, ... capped at a minute.
fn retry_delay(attempt: u32) -> Duration {
    let millis = 1u64
        .checked_shl(attempt.saturating_sub(1))
        .map_or(MAX_RETRY_DELAY_MS, |factor| factor.saturating_mul(1000));
    Duration::from_millis(millis.min(MAX_RETRY_DELAY_MS))
}

/// The Gemini client used by every session in the screener.
/// Wraps `models/{model}:generateContent` with optional retry on 429/5xx.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_attempts: u32,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.llm_timeout_secs))
                .build()?,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
            max_attempts: config.llm_max_attempts.max(1),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Makes a raw call to the API, returning the full response object.
    /// With more than one attempt configured, retries 429 and 5xx responses
    /// with exponential backoff (1s, 2s, 4s, ...).
    pub async fn call(
        &self,
        system_instruction: &str,
        contents: &[Content],
        config: &GenerationConfig,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: [SystemPart {
                    text: system_instruction,
                }],
            },
            contents,
            generation_config: config,
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let delay = retry_delay(attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(self.endpoint())
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: error_message(body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: error_message(body),
                });
            }

            let body = response.text().await?;
            let llm_response: LlmResponse = serde_json::from_str(&body)?;

            if let Some(usage) = &llm_response.usage_metadata {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                    usage.prompt_token_count, usage.candidates_token_count
                );
            }
            if let Some(reason) = llm_response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .filter(|r| *r != "STOP")
            {
                warn!("LLM finished with reason {reason}; reply may be truncated");
            }

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::Exhausted {
            attempts: self.max_attempts,
        }))
    }
}

#[async_trait]
impl GenerativeModel for LlmClient {
    async fn generate(
        &self,
        system_instruction: &str,
        contents: &[Content],
        config: &GenerationConfig,
    ) -> Result<String, LlmError> {
        self.call(system_instruction, contents, config)
            .await?
            .text()
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of a Google error body, falling back to the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<GoogleError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
