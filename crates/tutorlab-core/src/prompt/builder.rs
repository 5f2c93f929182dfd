//! Prompt composition.
//!
//! Builds the two prompts the engine sends to the external model: the
//! persona system prompt for in-session replies, and the scoring prompt
//! for end-of-session evaluation. Skeletons and persona bodies come from
//! the injected [`TemplateStore`]; this module only validates parameters,
//! renders the transcript, and substitutes.

use super::template::{
    GROUP_PERSONAS, GROUP_PROMPTS, KEY_BASE_STUDENT, KEY_SCORING, TemplateStore, substitute,
};
use crate::error::{Result, TutorLabError};
use crate::session::{SenderRole, Turn};
use std::sync::Arc;

/// Typed parameters for the persona system prompt.
#[derive(Debug, Clone, Copy)]
pub struct PersonaPromptParams<'a> {
    /// The problem statement the session is about.
    pub problem: &'a str,
    /// Key of the persona the simulated student adopts.
    pub persona_key: &'a str,
}

/// Typed parameters for the scoring prompt.
#[derive(Debug, Clone, Copy)]
pub struct ScoringPromptParams<'a> {
    /// The full session transcript.
    pub transcript: &'a [Turn],
    /// The problem statement the session was about.
    pub problem: &'a str,
    /// Display name of the persona (e.g. "Anxious Alex").
    pub persona_name: &'a str,
    /// Rendered category list, one bullet per category.
    pub category_list: &'a str,
}

/// Composes persona and scoring prompts from templates.
pub struct PromptBuilder {
    templates: Arc<dyn TemplateStore>,
}

impl PromptBuilder {
    pub fn new(templates: Arc<dyn TemplateStore>) -> Self {
        Self { templates }
    }

    /// Builds the system prompt that puts the model in character.
    ///
    /// Unknown persona keys are a hard error: the `NotFound` from the
    /// template store propagates unchanged. Silently substituting a
    /// different persona would corrupt the validity of the final score.
    pub async fn build_persona_prompt(&self, params: PersonaPromptParams<'_>) -> Result<String> {
        if params.problem.trim().is_empty() {
            return Err(TutorLabError::invalid_argument(
                "'problem' parameter is required",
            ));
        }
        if params.persona_key.trim().is_empty() {
            return Err(TutorLabError::invalid_argument(
                "'persona_key' parameter is required",
            ));
        }

        let persona_body = self
            .templates
            .load(GROUP_PERSONAS, params.persona_key)
            .await?;
        let skeleton = self.templates.load(GROUP_PROMPTS, KEY_BASE_STUDENT).await?;

        Ok(substitute(
            &skeleton,
            &[("problem", params.problem), ("persona", &persona_body)],
        ))
    }

    /// Builds the end-of-session scoring prompt.
    ///
    /// All four inputs must be non-empty; the first missing one is named
    /// in the `InvalidArgument` error.
    pub async fn build_scoring_prompt(&self, params: ScoringPromptParams<'_>) -> Result<String> {
        if params.transcript.is_empty() {
            return Err(TutorLabError::invalid_argument(
                "'transcript' parameter is required",
            ));
        }
        if params.problem.trim().is_empty() {
            return Err(TutorLabError::invalid_argument(
                "'problem' parameter is required",
            ));
        }
        if params.persona_name.trim().is_empty() {
            return Err(TutorLabError::invalid_argument(
                "'persona_name' parameter is required",
            ));
        }
        if params.category_list.trim().is_empty() {
            return Err(TutorLabError::invalid_argument(
                "'category_list' parameter is required",
            ));
        }

        let conversation = render_transcript(params.transcript);
        let skeleton = self.templates.load(GROUP_PROMPTS, KEY_SCORING).await?;

        Ok(substitute(
            &skeleton,
            &[
                ("conversation", &conversation),
                ("problem", params.problem),
                ("persona_name", params.persona_name),
                ("categories", params.category_list),
            ],
        ))
    }
}

/// Renders the transcript as role-labeled blocks for the scoring prompt.
fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| {
            let label = match turn.sender {
                SenderRole::Tutor => "TUTOR",
                SenderRole::Learner => "LEARNER",
            };
            format!("{label}:\n{}", turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
