//! Session domain model.
//!
//! This module contains the core Session entity that represents one
//! tutoring-practice conversation in the application's domain layer.

use super::turn::{SenderRole, Turn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents one tutoring-practice session.
///
/// A session contains:
/// - The tutor's display name and the problem being tutored
/// - The persona key of the simulated student
/// - The canonical ordered transcript of turns
/// - An active flag and creation/end timestamps
///
/// This is the "pure" domain model that business logic operates on.
/// It is owned exclusively by the session registry and mutated only
/// through the `SessionEngine` operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Display name of the tutor running the session
    pub tutor_name: String,
    /// The problem statement being tutored
    pub problem: String,
    /// Key of the simulated-student persona (e.g. `anxious_alex`)
    pub persona_key: String,
    /// Ordered transcript of turns
    pub transcript: Vec<Turn>,
    /// Whether the session is still accepting turns
    pub active: bool,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the session was ended, if it has been
    pub ended_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a new active session with an empty transcript.
    pub fn new(
        id: impl Into<String>,
        tutor_name: impl Into<String>,
        problem: impl Into<String>,
        persona_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            tutor_name: tutor_name.into(),
            problem: problem.into(),
            persona_key: persona_key.into(),
            transcript: Vec::new(),
            active: true,
            created_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Appends a turn to the transcript.
    pub fn push_turn(&mut self, sender: SenderRole, content: impl Into<String>) {
        self.transcript.push(Turn::new(sender, content));
    }

    /// Marks the session ended and stamps the end time.
    ///
    /// `ended` is terminal; calling this twice keeps the first end time.
    pub fn close(&mut self) {
        if self.active {
            self.active = false;
            self.ended_at = Some(Utc::now());
        }
    }
}
