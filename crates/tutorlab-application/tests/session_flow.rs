//! End-to-end session flow against the embedded templates and default
//! category configuration, with scripted model clients standing in for
//! the Claude API.

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tutorlab_application::{TutoringService, build_service};
use tutorlab_core::error::{Result, TutorLabError};
use tutorlab_core::model::{CompletionRequest, ModelClient};
use tutorlab_core::session::SenderRole;
use tutorlab_infrastructure::{EmbeddedTemplateLibrary, default_registry};

struct ScriptedModel {
    script: Mutex<VecDeque<Result<String>>>,
}

impl ScriptedModel {
    fn replying(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
        })
    }
}

#[async_trait::async_trait]
impl ModelClient for ScriptedModel {
    async fn complete(&self, _request: CompletionRequest) -> Result<String> {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(TutorLabError::service("model unavailable")))
    }
}

fn service(responder: Arc<ScriptedModel>, scorer: Arc<ScriptedModel>) -> TutoringService {
    build_service(
        responder,
        scorer,
        Arc::new(EmbeddedTemplateLibrary::new()),
        default_registry().unwrap(),
    )
}

const NESTED_REPORT: &str = r#"<category_evaluation>...</category_evaluation>
{
  "categories": {
    "explanation_clarity": {"score": 4, "feedback": "Clear step-by-step breakdown."},
    "patience_encouragement": {"score": 5, "feedback": "Consistently supportive tone."},
    "active_questioning": {"score": 3, "feedback": "Could probe understanding more."},
    "adaptability": {"score": 4, "feedback": "Adjusted pace after confusion."},
    "mathematical_accuracy": {"score": 5, "feedback": "All algebra was correct."}
  },
  "session_summary": "A well-run session with room for more checking questions."
}"#;

#[tokio::test]
async fn full_session_produces_validated_report() {
    let responder = ScriptedModel::replying(&[
        "I think I know this but I'm not sure... is it okay if I try?",
        "Um, subtract 3 from both sides? So 2x = 4... wait, is that right?",
    ]);
    let scorer = ScriptedModel::replying(&[NESTED_REPORT]);
    let service = service(responder, scorer);

    let started = service
        .start_session("Jordan", "Solve 2x+3=7", "anxious_alex")
        .await
        .unwrap();
    assert_eq!(started.persona_info.name, "Anxious Alex");
    assert!(started.initial_response.contains("is it okay if I try"));

    let posted = service
        .post_message(&started.session_id, SenderRole::Tutor, "What's the first step?")
        .await
        .unwrap();
    assert!(posted.session_active);
    assert!(posted.response.contains("subtract 3"));

    let report = service.end_session(&started.session_id).await.unwrap();
    assert_eq!(report.categories.len(), 5);
    assert_eq!(report.categories["explanation_clarity"].score, 4);
    assert_eq!(report.categories["mathematical_accuracy"].score, 5);
    assert_eq!(
        report.session_summary,
        "A well-run session with room for more checking questions."
    );
}

#[tokio::test]
async fn model_outage_never_interrupts_the_session() {
    let service = service(ScriptedModel::failing(), ScriptedModel::failing());

    let started = service
        .start_session("Jordan", "Solve 2x+3=7", "struggling_sam")
        .await
        .unwrap();
    assert_eq!(
        started.initial_response,
        "I'm sorry, I'm really confused right now. Can you help me understand?"
    );

    let posted = service
        .post_message(&started.session_id, SenderRole::Tutor, "Let's try together.")
        .await
        .unwrap();
    assert!(posted.session_active);

    let report = service.end_session(&started.session_id).await.unwrap();
    assert_eq!(report.categories.len(), 5);
    for (_, entry) in &report.categories {
        assert_eq!(entry.score, 3);
        assert!(entry.feedback.starts_with("Unable to evaluate"));
    }
    assert_eq!(
        report.session_summary,
        "Session completed. Unable to generate detailed analysis."
    );
}

#[tokio::test]
async fn unknown_persona_is_rejected_before_session_creation() {
    let service = service(ScriptedModel::failing(), ScriptedModel::failing());
    let err = service
        .start_session("Jordan", "Solve 2x+3=7", "confident_carl")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn response_payloads_serialize_with_wire_field_names() {
    let responder = ScriptedModel::replying(&["Okay, I'll try!"]);
    let service = service(responder, ScriptedModel::failing());

    let started = service
        .start_session("Jordan", "Solve 2x+3=7", "methodical_maya")
        .await
        .unwrap();

    let value = serde_json::to_value(&started).unwrap();
    assert!(value.get("session_id").is_some());
    assert_eq!(value["initial_response"], "Okay, I'll try!");
    assert_eq!(value["persona_info"]["key"], "methodical_maya");
    assert_eq!(value["persona_info"]["name"], "Methodical Maya");
}

#[tokio::test]
async fn available_personas_lists_embedded_set() {
    let service = service(ScriptedModel::failing(), ScriptedModel::failing());
    let personas = service.available_personas().await.unwrap();
    let keys: Vec<&str> = personas.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "anxious_alex",
            "methodical_maya",
            "overconfident_olivia",
            "struggling_sam"
        ]
    );
}
