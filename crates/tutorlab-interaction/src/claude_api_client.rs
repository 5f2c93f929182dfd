//! ClaudeApiClient - Direct REST API implementation of `ModelClient`.
//!
//! Calls the Claude REST API directly. Configuration comes from
//! environment variables; the request timeout makes a hung call
//! indistinguishable from any other model failure, which is what the
//! engine's fallback policy expects.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tutorlab_core::error::{Result, TutorLabError};
use tutorlab_core::model::{CompletionRequest, ModelClient, ModelMessage, ModelRole};

const BASE_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model for in-session persona replies.
pub const DEFAULT_REPLY_MODEL: &str = "claude-3-5-haiku-20241022";
/// Default model for end-of-session scoring.
pub const DEFAULT_SCORING_MODEL: &str = "claude-3-5-sonnet-20241022";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Claude HTTP API.
#[derive(Clone)]
pub struct ClaudeApiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl ClaudeApiClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, model, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom request timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TutorLabError::service(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Builds the conversation-reply client from environment variables.
    ///
    /// Reads `ANTHROPIC_API_KEY` (required) and `TUTORLAB_REPLY_MODEL`
    /// (defaults to [`DEFAULT_REPLY_MODEL`]).
    pub fn conversation_from_env() -> Result<Self> {
        let api_key = require_api_key()?;
        let model = env::var("TUTORLAB_REPLY_MODEL").unwrap_or_else(|_| DEFAULT_REPLY_MODEL.into());
        Self::new(api_key, model)
    }

    /// Builds the scoring client from environment variables.
    ///
    /// Reads `ANTHROPIC_API_KEY` (required) and `TUTORLAB_SCORING_MODEL`
    /// (defaults to [`DEFAULT_SCORING_MODEL`]).
    pub fn scoring_from_env() -> Result<Self> {
        let api_key = require_api_key()?;
        let model =
            env::var("TUTORLAB_SCORING_MODEL").unwrap_or_else(|_| DEFAULT_SCORING_MODEL.into());
        Self::new(api_key, model)
    }

    async fn send_request(&self, body: &CreateMessageRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(BASE_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    TutorLabError::service("Claude API request timed out")
                } else {
                    TutorLabError::service(format!("Claude API request failed: {err}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read Claude error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: CreateMessageResponse = response.json().await.map_err(|err| {
            TutorLabError::service(format!("failed to parse Claude response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait::async_trait]
impl ModelClient for ClaudeApiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let messages: Vec<Message<'_>> = request.messages.iter().map(Message::from).collect();

        let body = CreateMessageRequest {
            model: &self.model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: request.system.as_deref(),
        };

        tracing::debug!(model = %self.model, messages = body.messages.len(), "sending completion request");
        self.send_request(&body).await
    }
}

fn require_api_key() -> Result<String> {
    env::var("ANTHROPIC_API_KEY").map_err(|_| {
        TutorLabError::config("ANTHROPIC_API_KEY environment variable is not set")
    })
}

#[derive(Serialize)]
struct CreateMessageRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ModelMessage> for Message<'a> {
    fn from(message: &'a ModelMessage) -> Self {
        Self {
            role: match message.role {
                ModelRole::User => "user",
                ModelRole::Assistant => "assistant",
            },
            content: &message.content,
        }
    }
}

#[derive(Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlockResponse>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlockResponse {
    #[serde(rename = "text")]
    Text { text: String },
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    r#type: String,
    message: String,
}

fn extract_text_response(response: CreateMessageResponse) -> Result<String> {
    response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlockResponse::Text { text } => Some(text),
        })
        .ok_or_else(|| {
            TutorLabError::service("Claude API returned no text in the response content")
        })
}

fn map_http_error(status: StatusCode, body: String) -> TutorLabError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.clone());

    TutorLabError::service(format!("Claude API error ({}): {message}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let messages = vec![
            ModelMessage::user("Let's work on this math problem together."),
            ModelMessage::assistant("Okay... where do I start?"),
            ModelMessage::user("Please continue."),
        ];
        let wire: Vec<Message<'_>> = messages.iter().map(Message::from).collect();
        let body = CreateMessageRequest {
            model: "claude-3-5-haiku-20241022",
            messages: wire,
            max_tokens: 300,
            temperature: 0.7,
            system: Some("You are a student."),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "claude-3-5-haiku-20241022");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][1]["role"], "assistant");
        assert_eq!(value["max_tokens"], 300);
        assert_eq!(value["system"], "You are a student.");
    }

    #[test]
    fn test_request_body_omits_absent_system() {
        let body = CreateMessageRequest {
            model: "m",
            messages: vec![],
            max_tokens: 1000,
            temperature: 0.0,
            system: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("system").is_none());
    }

    #[test]
    fn test_extract_text_response_takes_first_text_block() {
        let response = CreateMessageResponse {
            content: vec![ContentBlockResponse::Text {
                text: "Hi, I'm ready to work on this.".into(),
            }],
        };
        assert_eq!(
            extract_text_response(response).unwrap(),
            "Hi, I'm ready to work on this."
        );
    }

    #[test]
    fn test_extract_text_response_fails_on_empty_content() {
        let response = CreateMessageResponse { content: vec![] };
        let err = extract_text_response(response).unwrap_err();
        assert!(err.is_service());
    }

    #[test]
    fn test_map_http_error_prefers_api_message() {
        let body = r#"{"error": {"type": "overloaded_error", "message": "Overloaded"}}"#;
        let err = map_http_error(StatusCode::SERVICE_UNAVAILABLE, body.to_string());
        assert!(err.to_string().contains("Overloaded"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream hiccup".to_string());
        assert!(err.to_string().contains("upstream hiccup"));
    }
}
