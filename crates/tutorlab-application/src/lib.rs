//! Application layer for TutorLab.
//!
//! Wires the core session engine to the infrastructure (templates,
//! category configuration) and interaction (model clients) crates, and
//! exposes the use-case surface a transport layer calls.

pub mod service;

pub use service::{MessageResponse, SessionStartedResponse, TutoringService};

use std::env;
use std::sync::Arc;
use tutorlab_core::model::ModelClient;
use tutorlab_core::prompt::TemplateStore;
use tutorlab_core::scoring::CategoryRegistry;
use tutorlab_core::session::{SessionEngine, SessionRegistry};
use tutorlab_infrastructure::{DirTemplateStore, EmbeddedTemplateLibrary};
use tutorlab_interaction::ClaudeApiClient;

/// Builds a `TutoringService` from explicit dependencies.
///
/// This is the constructor tests and embedders use; [`bootstrap`] is the
/// environment-driven convenience on top of it.
pub fn build_service(
    responder: Arc<dyn ModelClient>,
    scorer: Arc<dyn ModelClient>,
    templates: Arc<dyn TemplateStore>,
    categories: CategoryRegistry,
) -> TutoringService {
    let engine = SessionEngine::new(
        Arc::new(SessionRegistry::new()),
        responder,
        scorer,
        templates,
        categories,
    );
    TutoringService::new(engine)
}

/// Builds the default production stack from the environment.
///
/// - Model clients from `ANTHROPIC_API_KEY` (+ optional
///   `TUTORLAB_REPLY_MODEL` / `TUTORLAB_SCORING_MODEL`)
/// - Templates from `TUTORLAB_TEMPLATE_DIR` when set, otherwise the
///   embedded library
/// - Categories from `TUTORLAB_CATEGORIES_FILE` when set, otherwise the
///   embedded default configuration
pub async fn bootstrap() -> anyhow::Result<TutoringService> {
    let responder: Arc<dyn ModelClient> = Arc::new(ClaudeApiClient::conversation_from_env()?);
    let scorer: Arc<dyn ModelClient> = Arc::new(ClaudeApiClient::scoring_from_env()?);

    let templates: Arc<dyn TemplateStore> = match env::var("TUTORLAB_TEMPLATE_DIR") {
        Ok(dir) => {
            tracing::info!(%dir, "using directory template store");
            Arc::new(DirTemplateStore::new(dir))
        }
        Err(_) => Arc::new(EmbeddedTemplateLibrary::new()),
    };

    let categories = match env::var("TUTORLAB_CATEGORIES_FILE") {
        Ok(path) => tutorlab_infrastructure::registry_from_path(&path).await?,
        Err(_) => tutorlab_infrastructure::default_registry()?,
    };

    Ok(build_service(responder, scorer, templates, categories))
}
