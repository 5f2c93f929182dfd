//! Prompt templates and composition.

pub mod builder;
pub mod template;

pub use builder::{PersonaPromptParams, PromptBuilder, ScoringPromptParams};
pub use template::{
    GROUP_FALLBACKS, GROUP_PERSONAS, GROUP_PROMPTS, KEY_BASE_STUDENT, KEY_SCORING, TemplateStore,
    substitute,
};
