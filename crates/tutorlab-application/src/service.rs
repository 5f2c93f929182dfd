//! Tutoring session use case.
//!
//! `TutoringService` is the seam a transport layer (HTTP routes, CLI)
//! calls into. It owns the `SessionEngine` and maps its results onto the
//! wire-shaped response types the session endpoints serialize.

use serde::Serialize;
use tutorlab_core::error::Result;
use tutorlab_core::persona::PersonaInfo;
use tutorlab_core::scoring::ScoreReport;
use tutorlab_core::session::{SenderRole, SessionEngine};

/// Response payload for session start.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStartedResponse {
    pub session_id: String,
    pub initial_response: String,
    pub persona_info: PersonaInfo,
}

/// Response payload for a posted message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub response: String,
    pub session_active: bool,
}

/// Application service for tutoring-practice sessions.
pub struct TutoringService {
    engine: SessionEngine,
}

impl TutoringService {
    pub fn new(engine: SessionEngine) -> Self {
        Self { engine }
    }

    /// Starts a new session against the given persona.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown persona key, `InvalidArgument` for a
    /// missing problem statement. A model outage is not an error; the
    /// opening reply degrades to the persona's fallback line.
    pub async fn start_session(
        &self,
        tutor_name: &str,
        problem: &str,
        persona_key: &str,
    ) -> Result<SessionStartedResponse> {
        let started = self.engine.start(tutor_name, problem, persona_key).await?;
        Ok(SessionStartedResponse {
            session_id: started.session_id,
            initial_response: started.opening_response,
            persona_info: started.persona,
        })
    }

    /// Posts one message into the session and returns the learner's reply.
    pub async fn post_message(
        &self,
        session_id: &str,
        sender: SenderRole,
        message: &str,
    ) -> Result<MessageResponse> {
        let outcome = self.engine.advance(session_id, sender, message).await?;
        Ok(MessageResponse {
            response: outcome.reply,
            session_active: outcome.still_active,
        })
    }

    /// Ends the session and returns its score report.
    ///
    /// Always yields a complete report for a live session: scoring
    /// failures resolve to the deterministic default.
    pub async fn end_session(&self, session_id: &str) -> Result<ScoreReport> {
        self.engine.end(session_id).await
    }

    /// Lists the personas available for new sessions.
    pub async fn available_personas(&self) -> Result<Vec<PersonaInfo>> {
        self.engine.list_personas().await
    }
}
