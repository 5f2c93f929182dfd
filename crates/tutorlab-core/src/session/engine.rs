//! Session state machine.
//!
//! `SessionEngine` owns the three session-affecting operations: `start`,
//! `advance`, and `end`. Each performs exactly one external model call.
//! Model failures during conversational turns are absorbed into a fallback
//! reply (tutoring continuity outweighs strict propagation); failures
//! during end-of-session scoring are absorbed into the deterministic
//! default report, so a tutor always gets session closure.

use super::model::Session;
use super::registry::SessionRegistry;
use super::turn::SenderRole;
use crate::adapter;
use crate::error::{Result, TutorLabError};
use crate::model::{CompletionRequest, ModelClient};
use crate::persona::{self, PersonaInfo};
use crate::prompt::{
    GROUP_FALLBACKS, GROUP_PERSONAS, PersonaPromptParams, PromptBuilder, ScoringPromptParams,
    TemplateStore,
};
use crate::scoring::{self, CategoryRegistry, ScoreReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Fallback reply when the model is unavailable and the persona has no
/// dedicated fallback line.
const GENERIC_FALLBACK_REPLY: &str = "I need help with this problem.";

/// Result of starting a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    pub session_id: String,
    pub opening_response: String,
    pub persona: PersonaInfo,
}

/// Result of one conversational turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub reply: String,
    pub still_active: bool,
}

/// The session lifecycle state machine.
///
/// Dependencies are injected once at construction: the session registry,
/// the two model clients (conversation replies and scoring use different
/// request profiles and possibly different models), the template store,
/// and the category registry. No ambient globals, no lazy singletons.
pub struct SessionEngine {
    registry: Arc<SessionRegistry>,
    responder: Arc<dyn ModelClient>,
    scorer: Arc<dyn ModelClient>,
    templates: Arc<dyn TemplateStore>,
    prompts: PromptBuilder,
    categories: CategoryRegistry,
}

impl SessionEngine {
    pub fn new(
        registry: Arc<SessionRegistry>,
        responder: Arc<dyn ModelClient>,
        scorer: Arc<dyn ModelClient>,
        templates: Arc<dyn TemplateStore>,
        categories: CategoryRegistry,
    ) -> Self {
        let prompts = PromptBuilder::new(templates.clone());
        Self {
            registry,
            responder,
            scorer,
            templates,
            prompts,
            categories,
        }
    }

    /// Starts a session: creates it in the active state with a synthetic
    /// opening tutor turn, asks the model for the persona's opening reply,
    /// and appends that reply as a learner turn.
    ///
    /// An unknown persona key fails with `NotFound` before the session is
    /// created. A model failure does not fail the operation: the opening
    /// reply degrades to the persona's fallback line.
    pub async fn start(
        &self,
        tutor_name: &str,
        problem: &str,
        persona_key: &str,
    ) -> Result<SessionStarted> {
        // Strict persona policy: resolve the prompt before creating any
        // session state, so an unknown key leaves no trace behind.
        let system_prompt = self
            .prompts
            .build_persona_prompt(PersonaPromptParams {
                problem,
                persona_key,
            })
            .await?;

        let session_id = Uuid::new_v4().to_string();
        let mut session = Session::new(&session_id, tutor_name, problem, persona_key);
        session.push_turn(
            SenderRole::Tutor,
            format!("I need help with this problem: {problem}"),
        );

        let handle = self.registry.insert(session).await;
        let mut session = handle.lock().await;

        let reply = self.persona_reply(&session, system_prompt).await;
        session.push_turn(SenderRole::Learner, reply.clone());

        tracing::info!(session_id = %session.id, persona = persona_key, "session started");

        Ok(SessionStarted {
            session_id: session.id.clone(),
            opening_response: reply,
            persona: PersonaInfo::from_key(persona_key),
        })
    }

    /// Advances the conversation by one exchange: appends the caller's
    /// turn, asks the model for the persona's reply over the full adapted
    /// history, and appends the reply as a learner turn.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session id is unknown
    /// - `InvalidArgument` if the session has already ended
    ///
    /// A model failure is not an error: the reply degrades to the
    /// persona's fallback line and the session continues.
    pub async fn advance(
        &self,
        session_id: &str,
        sender: SenderRole,
        content: &str,
    ) -> Result<TurnOutcome> {
        let handle = self.registry.get(session_id).await?;
        // Held across the model call: turns for one session serialize.
        let mut session = handle.lock().await;

        if !session.active {
            return Err(TutorLabError::invalid_argument(format!(
                "session '{session_id}' has already ended"
            )));
        }

        let system_prompt = self
            .prompts
            .build_persona_prompt(PersonaPromptParams {
                problem: &session.problem,
                persona_key: &session.persona_key,
            })
            .await?;

        session.push_turn(sender, content);

        let reply = self.persona_reply(&session, system_prompt).await;
        session.push_turn(SenderRole::Learner, reply.clone());

        Ok(TurnOutcome {
            reply,
            still_active: session.active,
        })
    }

    /// Ends the session and produces its score report.
    ///
    /// The session is marked inactive and stamped before scoring, so a
    /// scoring failure still leaves the session properly closed. Scoring
    /// failures at any stage (prompt build, model call, parse, validation)
    /// are absorbed into the deterministic default report.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session id is unknown
    /// - `InvalidArgument` if the session has already ended
    pub async fn end(&self, session_id: &str) -> Result<ScoreReport> {
        let handle = self.registry.get(session_id).await?;
        let mut session = handle.lock().await;

        if !session.active {
            return Err(TutorLabError::invalid_argument(format!(
                "session '{session_id}' has already ended"
            )));
        }

        session.close();

        let report = match self.score_session(&session).await {
            Ok(report) => report,
            Err(err) => {
                if err.is_scoring_recoverable() {
                    tracing::warn!(session_id = %session.id, %err, "scoring failed, returning default report");
                } else {
                    tracing::error!(session_id = %session.id, %err, "scoring pipeline error, returning default report");
                }
                self.categories.default_report()
            }
        };

        tracing::info!(session_id = %session.id, "session ended");
        Ok(report)
    }

    /// Lists the personas available for new sessions.
    pub async fn list_personas(&self) -> Result<Vec<PersonaInfo>> {
        let keys = self.templates.list(GROUP_PERSONAS).await?;
        Ok(keys.into_iter().map(PersonaInfo::from_key).collect())
    }

    /// Number of sessions in the registry.
    pub async fn session_count(&self) -> usize {
        self.registry.count().await
    }

    async fn persona_reply(&self, session: &Session, system_prompt: String) -> String {
        let messages = adapter::adapt(&session.transcript);
        let request = CompletionRequest::conversation(system_prompt, messages);

        match self.responder.complete(request).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(session_id = %session.id, %err, "model unavailable, using fallback reply");
                self.fallback_reply(&session.persona_key).await
            }
        }
    }

    async fn fallback_reply(&self, persona_key: &str) -> String {
        match self.templates.load(GROUP_FALLBACKS, persona_key).await {
            Ok(line) => line.trim().to_string(),
            Err(_) => GENERIC_FALLBACK_REPLY.to_string(),
        }
    }

    async fn score_session(&self, session: &Session) -> Result<ScoreReport> {
        let persona_name = persona::display_name(&session.persona_key);
        let category_list = self.categories.describe();

        let prompt = self
            .prompts
            .build_scoring_prompt(ScoringPromptParams {
                transcript: &session.transcript,
                problem: &session.problem,
                persona_name: &persona_name,
                category_list: &category_list,
            })
            .await?;

        let raw = self.scorer.complete(CompletionRequest::scoring(prompt)).await?;
        scoring::parse(&raw, &self.categories.keys())
    }
}
