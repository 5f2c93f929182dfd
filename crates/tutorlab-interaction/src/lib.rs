//! Model client implementations for TutorLab.

pub mod claude_api_client;

pub use claude_api_client::{ClaudeApiClient, DEFAULT_REPLY_MODEL, DEFAULT_SCORING_MODEL};
