//! Model client boundary.
//!
//! The external language model is treated as a black box: a prompt goes in,
//! text comes out, and any transport or provider failure surfaces as a
//! [`TutorLabError::Service`](crate::error::TutorLabError). Concrete clients
//! live in `tutorlab-interaction`.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Conversational role as the external model sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelRole {
    User,
    Assistant,
}

/// One message in the model's conversation window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMessage {
    pub role: ModelRole,
    pub content: String,
}

impl ModelMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ModelRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ModelRole::Assistant,
            content: content.into(),
        }
    }
}

/// A single completion request against the external model.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Optional system prompt sent alongside the conversation.
    pub system: Option<String>,
    /// Conversation window, expected to alternate and to start and end
    /// with [`ModelRole::User`].
    pub messages: Vec<ModelMessage>,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// Request profile for in-session persona replies.
    pub fn conversation(system: String, messages: Vec<ModelMessage>) -> Self {
        Self {
            system: Some(system),
            messages,
            max_tokens: 300,
            temperature: 0.7,
        }
    }

    /// Request profile for end-of-session scoring. Deterministic sampling,
    /// larger budget for the per-category feedback.
    pub fn scoring(prompt: String) -> Self {
        Self {
            system: None,
            messages: vec![ModelMessage::user(prompt)],
            max_tokens: 1000,
            temperature: 0.0,
        }
    }
}

/// An abstract client for the external language model.
///
/// Implementations own transport, authentication, and timeout concerns.
/// The call either yields the model's text output or fails with a
/// `Service` error; callers decide the fallback policy.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
