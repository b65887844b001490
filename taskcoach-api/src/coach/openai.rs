/// OpenAI-compatible advice generator
///
/// Production [`AdviceGenerator`] implementation that posts a
/// chat-completions request to a configured OpenAI-compatible endpoint.
/// The selected system prompt is sent as the system message and the task
/// context plus consultation text as the user message.
///
/// # Failure Handling
///
/// Every transport, timeout, status, or decode failure is mapped to a
/// [`CoachError`] and logged here; callers only ever see the opaque
/// unavailable error the consultation service derives from it. No retries
/// are attempted.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use super::{build_user_prompt, AdviceGenerator, AdviceRequest, CoachError};
use crate::config::AiConfig;
use async_trait::async_trait;

/// Sampling temperature for advice generation
const TEMPERATURE: f32 = 0.7;

/// Advice text used when the upstream reply carries no content
const EMPTY_RESPONSE_ADVICE: &str = "Could not generate advice. Please try again.";

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

/// One chat message
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

/// Chat-completions response body (only the fields we read)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Advice generator backed by an OpenAI-compatible endpoint
pub struct OpenAiGenerator {
    http: Client,
    config: AiConfig,
}

impl OpenAiGenerator {
    /// Creates a generator from AI endpoint configuration
    ///
    /// The request timeout is baked into the HTTP client, so a hung
    /// upstream cannot stall a consultation past the configured bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: AiConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl AdviceGenerator for OpenAiGenerator {
    async fn generate_advice(&self, request: &AdviceRequest) -> Result<String, CoachError> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(request.system_prompt.clone()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(build_user_prompt(request)),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: TEMPERATURE,
        };

        debug!(task_id = request.task_id, model = %self.config.model, "Requesting advice");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(task_id = request.task_id, "AI request failed: {}", e);
                if e.is_timeout() {
                    CoachError::Timeout
                } else {
                    CoachError::Upstream(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                task_id = request.task_id,
                status = %status,
                "AI endpoint returned an error status"
            );
            return Err(CoachError::Upstream(format!("status {}", status)));
        }

        let reply: ChatResponse = response.json().await.map_err(|e| {
            error!(task_id = request.task_id, "Failed to decode AI response: {}", e);
            CoachError::InvalidResponse(e.to_string())
        })?;

        let advice = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| EMPTY_RESPONSE_ADVICE.to_string());

        Ok(advice)
    }
}
