//! Chat-completions summarizer client.
//!
//! Sends `{model, messages, max_tokens, temperature}` and reads
//! `choices[0].message.content`. Every failure mode collapses into
//! [`SummaryOutcome::Unavailable`]; nothing here returns an error to the caller.

use anyhow::{Context, Result};
use async_trait::async_trait;
use docsight_core::SummarizerConfig;
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const PROMPT_PREFIX: &str = "Please provide a concise summary of the following document:\n\n";

/// Longest response body kept in a log line.
const MAX_LOGGED_BODY: usize = 2048;

/// Why no summary was produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryFailure {
    /// No API key configured; the request was never sent.
    #[error("summarizer API key not configured")]
    NotConfigured,

    #[error("summarizer request timed out")]
    Timeout,

    #[error("summarizer request failed: {0}")]
    Network(String),

    #[error("summarizer returned status {status}")]
    Status { status: u16, body: String },

    /// Auth header name or key value cannot be sent over HTTP.
    #[error("summarizer misconfigured: {0}")]
    Misconfigured(String),

    #[error("malformed summarizer response: {0}")]
    Malformed(String),

    /// The model answered with nothing but whitespace.
    #[error("summarizer returned an empty summary")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summary(String),
    Unavailable(SummaryFailure),
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// One summarization attempt, bounded by the client's timeout.
    async fn summarize(&self, text: &str) -> SummaryOutcome;

    /// Whether a credential is present at all.
    fn is_configured(&self) -> bool;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct ChatCompletionsClient {
    config: SummarizerConfig,
    client: reqwest::Client,
}

impl fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("api_url", &self.config.api_url)
            .field("model", &self.config.model)
            .field("configured", &self.config.is_configured())
            .finish()
    }
}

impl ChatCompletionsClient {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        Self::with_timeout(config, timeout)
    }

    fn with_timeout(config: SummarizerConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { config, client })
    }

    fn auth_header(&self, api_key: &str) -> Result<(HeaderName, HeaderValue), SummaryFailure> {
        let name = HeaderName::from_bytes(self.config.auth_header.as_bytes())
            .map_err(|e| SummaryFailure::Misconfigured(format!("invalid auth header name: {}", e)))?;

        let raw = if name == AUTHORIZATION {
            format!("Bearer {}", api_key)
        } else {
            api_key.to_string()
        };
        let mut value = HeaderValue::from_str(&raw)
            .map_err(|e| SummaryFailure::Misconfigured(format!("invalid API key value: {}", e)))?;
        value.set_sensitive(true);

        Ok((name, value))
    }

    async fn request_summary(&self, api_key: &str, text: &str) -> Result<String, SummaryFailure> {
        let (header_name, header_value) = self.auth_header(api_key)?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: format!("{}{}", PROMPT_PREFIX, text),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header(header_name, header_value)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let payload = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            return Err(SummaryFailure::Status {
                status: status.as_u16(),
                body: truncate(&payload),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&payload)
            .map_err(|e| SummaryFailure::Malformed(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SummaryFailure::Malformed("response has no choices".to_string()))?
            .message
            .content
            .ok_or_else(|| SummaryFailure::Malformed("choice has no content".to_string()))?;

        let summary = content.trim();
        if summary.is_empty() {
            return Err(SummaryFailure::Empty);
        }

        Ok(summary.to_string())
    }
}

#[async_trait]
impl Summarizer for ChatCompletionsClient {
    async fn summarize(&self, text: &str) -> SummaryOutcome {
        let api_key = match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!("Summarizer API key not configured, skipping AI summary");
                return SummaryOutcome::Unavailable(SummaryFailure::NotConfigured);
            }
        };

        tracing::info!(
            api_url = %self.config.api_url,
            model = %self.config.model,
            text_len = text.len(),
            "Requesting document summary"
        );
        let start = std::time::Instant::now();

        match self.request_summary(api_key, text).await {
            Ok(summary) => {
                tracing::info!(
                    summary_len = summary.len(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Received document summary"
                );
                SummaryOutcome::Summary(summary)
            }
            Err(failure) => {
                match &failure {
                    SummaryFailure::Status { status, body } => tracing::error!(
                        status = *status,
                        body = %body,
                        "Summarizer API request failed"
                    ),
                    SummaryFailure::Timeout => tracing::error!(
                        timeout_secs = self.config.timeout_secs,
                        "Summarizer API request timed out"
                    ),
                    other => tracing::error!(error = %other, "Summarizer API request failed"),
                }
                SummaryOutcome::Unavailable(failure)
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

fn classify_transport_error(err: reqwest::Error) -> SummaryFailure {
    if err.is_timeout() {
        SummaryFailure::Timeout
    } else {
        SummaryFailure::Network(err.to_string())
    }
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_LOGGED_BODY {
        return body.to_string();
    }
    let mut end = MAX_LOGGED_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
