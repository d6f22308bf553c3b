//! Client for OpenAI-compatible chat completion endpoints.

use grimoire_core::context::ChatMessage;
use grimoire_core::error::DomainError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

/// Connection and sampling settings.
#[derive(Clone, PartialEq)]
pub struct ChatConfig {
    /// Model identifier.
    pub model: String,
    /// Bearer token.
    pub api_key: String,
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

/// Errors from the chat endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The request never got a response.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The response body was not a chat completion.
    #[error("response parsing failed: {0}")]
    ResponseParsing(String),
}

impl From<ChatError> for DomainError {
    fn from(err: ChatError) -> Self {
        DomainError::Oracle(err.to_string())
    }
}

/// The first choice of a completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatCompletion {
    /// Message content; empty if the model returned none.
    pub content: String,
    /// Reasoning content, for models that expose it.
    pub reasoning: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    reasoning_content: Option<String>,
}

/// Chat completion client. Every request asks for a JSON object answer.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    config: ChatConfig,
}

impl ChatClient {
    /// Creates a client for `config`.
    #[must_use]
    pub fn new(config: ChatConfig) -> Self {
        debug!(model = %config.model, url = %config.base_url, "created chat client");
        Self {
            http: Client::new(),
            config,
        }
    }

    /// The configured model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Sends `messages` and returns the first choice.
    ///
    /// # Errors
    ///
    /// Returns `ChatError` if the request fails, the endpoint answers with an
    /// error status, or the body cannot be parsed.
    #[instrument(skip(self, messages), fields(model = %self.config.model, messages = messages.len()))]
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, ChatError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "chat request failed");
                ChatError::Http(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(%status, %message, "chat endpoint returned an error");
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::ResponseParsing(e.to_string()))?;
        let completion = body
            .choices
            .into_iter()
            .next()
            .map(|choice| ChatCompletion {
                content: choice.message.content.unwrap_or_default(),
                reasoning: choice.message.reasoning_content.unwrap_or_default(),
            })
            .unwrap_or_default();
        debug!(
            content = completion.content.len(),
            reasoning = completion.reasoning.len(),
            "chat completion received"
        );
        Ok(completion)
    }
}
