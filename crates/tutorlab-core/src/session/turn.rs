//! Transcript turn types.
//!
//! This module contains types for representing messages in a tutoring
//! conversation, including sender roles and turn content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the sender of a turn in a tutoring conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    /// The human tutor being trained.
    Tutor,
    /// The AI-simulated student.
    Learner,
}

/// A single turn in a session transcript.
///
/// Turns are immutable once appended; their append order defines the
/// conversation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who sent this turn.
    pub sender: SenderRole,
    /// The text content of the turn.
    pub content: String,
    /// Timestamp when the turn was appended.
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Creates a turn stamped with the current time.
    pub fn new(sender: SenderRole, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
