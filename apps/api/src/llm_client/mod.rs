/// LLM Client: the single point of entry for all model API calls in Unleash.
///
/// ARCHITECTURAL RULE: No other module may call the Groq API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: llama-3.1-8b-instant, temperature 0.7, max_tokens 1000 (fixed)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all LLM calls in Unleash.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "llama-3.1-8b-instant";
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One text completion per call. Implementations make exactly one attempt.
///
/// Carried in `AppState` as `Arc<dyn CompletionClient>` so tests can swap in
/// a deterministic stub.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Result of a single pipeline step that called the model.
///
/// Callers can tell a failed call apart from model-authored text, while
/// `render()` keeps the user-visible `Error: <message>` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed(String),
    Failed(String),
}

impl StepOutcome {
    pub fn render(&self) -> String {
        match self {
            StepOutcome::Completed(text) => text.clone(),
            StepOutcome::Failed(message) => format!("Error: {message}"),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

/// Sends one prompt and folds any failure into `StepOutcome::Failed`.
/// Never retries.
pub async fn ask(client: &dyn CompletionClient, prompt: &str) -> StepOutcome {
    match client.complete(prompt).await {
        Ok(text) => StepOutcome::Completed(text),
        Err(e) => {
            warn!("LLM call failed: {e}");
            StepOutcome::Failed(e.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the trimmed text of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
    }
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorBody,
}

#[derive(Debug, Deserialize)]
struct GroqErrorBody {
    message: String,
}

/// Chat-completions client for the Groq OpenAI-compatible API.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GroqClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            // No explicit timeout: a stalled call blocks the rest of the review.
            client: Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: parse_error_message(body),
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn parse_error_message(body: String) -> String {
    serde_json::from_str::<GroqError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
