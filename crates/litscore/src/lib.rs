//! Literacy assessment of free-text answers through a chat-completion API.
//!
//! `litscore` shows a writing prompt, takes the user's answer and asks a
//! language model to grade it against a fixed rubric (grammar, spelling,
//! vocabulary, coherence, structure, relevance) with an overall rating from
//! 0 to 10. The whole exchange is one request per answer: no retries, no
//! streaming, no history.
//!
//! # Getting started
//!
//! ```ignore
//! use litscore::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load(None)?;
//!     let analyzer = config.build_analyzer()?;
//!     let bank = config.prompt_bank()?;
//!
//!     println!("{}", bank.pick());
//!     let outcome = analyzer.analyze_answer("Books open doors to other lives.").await;
//!     println!("{}", outcome.message());
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! - **Prompts:** [`PromptBank`](prompts::PromptBank) and the stock list in
//!   [`prompts::DEFAULT_PROMPTS`].
//! - **Rubric:** [`rubric::DEFAULT_RUBRIC`] and
//!   [`build_messages`](rubric::build_messages).
//! - **Calling the model:** [`OpenAiClient`] implements
//!   [`CompletionProvider`](provider::CompletionProvider); swap in any other
//!   implementor to change backends.
//! - **Assessing an answer:** [`LiteracyAnalyzer`](analyzer::LiteracyAnalyzer)
//!   rejects blank answers locally and folds failures into
//!   [`AssessmentError`](error::AssessmentError).
//! - **Front ends:** [`ui::UiState`] is the state shared with a renderer and
//!   [`session::Session`] drives it from the async side.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod prelude;
pub mod prompts;
pub mod provider;
pub mod rating;
pub mod rubric;
pub mod session;
pub mod ui;

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::AssessmentError;
use crate::provider::{CompletionFuture, CompletionProvider};

// ── Constants ──────────────────────────────────────────────────────

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for assessments.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    // Always sent when set, including 0.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

// ── Message types ──────────────────────────────────────────────────

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorBody>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    message: String,
}

/// Error envelope some providers wrap non-2xx bodies in.
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

/// Token usage statistics, logged at debug level.
#[derive(Deserialize, Debug)]
struct UsageInfo {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Settings for [`OpenAiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: OPENAI_CHAT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            temperature: 0.0,
        }
    }
}

/// Async HTTP client for OpenAI-compatible chat completion endpoints.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: ClientConfig) -> Result<Self, AssessmentError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("litscore/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssessmentError::Unexpected(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: config.api_key,
            endpoint: config.endpoint,
            model: config.model,
            temperature: config.temperature,
        })
    }

    /// The request body this client sends for `messages`.
    pub fn build_request(&self, messages: Vec<Message>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(self.temperature),
        }
    }

    /// Send a chat completion request and return the first choice's text.
    pub async fn chat(&self, body: &ChatRequest) -> Result<String, AssessmentError> {
        debug!(
            "LLM request: model={}, messages={}, temp={:?}",
            body.model,
            body.messages.len(),
            body.temperature,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|env| env.error.message)
                .unwrap_or(text);
            return Err(AssessmentError::from_status(status, detail));
        }

        let parsed: RawChatResponse = serde_json::from_str(&text)
            .map_err(|e| AssessmentError::Unexpected(format!("failed to parse response: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(AssessmentError::Api {
                status: status.as_u16(),
                message: err.message,
            });
        }

        if let Some(ref usage) = parsed.usage {
            debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens.unwrap_or(0),
                usage.completion_tokens.unwrap_or(0),
                usage.total_tokens.unwrap_or(0),
            );
        }

        let choice = parsed
            .choices
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| AssessmentError::Unexpected("response had no choices".into()))?;
        debug!("Finish reason: {}", choice.finish_reason.as_deref().unwrap_or("none"));
        choice
            .message
            .content
            .ok_or_else(|| AssessmentError::Unexpected("response had no content".into()))
    }
}

impl CompletionProvider for OpenAiClient {
    fn complete(&self, messages: Vec<Message>) -> CompletionFuture<'_> {
        Box::pin(async move {
            let body = self.build_request(messages);
            self.chat(&body).await
        })
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
