//! Conversation model adapter.
//!
//! The external model enforces a strict user/assistant alternation contract:
//! the conversation window must start and end with a `user` message. The
//! canonical transcript has no such constraint (it opens with a synthetic
//! tutor turn, but a learner reply is usually the last turn when the tutor
//! is about to speak). This adapter reconciles the two on a derived copy,
//! never mutating the transcript itself.

use crate::model::{ModelMessage, ModelRole};
use crate::session::{SenderRole, Turn};

/// Synthetic opener inserted when the transcript does not begin with a tutor turn.
pub const SYNTHETIC_OPENER: &str = "Let's work on this math problem together.";

/// Synthetic continuation appended when the transcript ends with a learner turn.
pub const SYNTHETIC_CONTINUATION: &str = "Please continue.";

/// Maps a transcript onto the model's conversation window.
///
/// Tutor turns become `user` messages, all other senders become
/// `assistant`. A synthetic `user` opener and/or continuation is inserted
/// so the result always starts and ends with `user`; a transcript that
/// already satisfies the contract passes through with role mapping only.
pub fn adapt(turns: &[Turn]) -> Vec<ModelMessage> {
    let mut messages: Vec<ModelMessage> = turns
        .iter()
        .map(|turn| ModelMessage {
            role: match turn.sender {
                SenderRole::Tutor => ModelRole::User,
                _ => ModelRole::Assistant,
            },
            content: turn.content.clone(),
        })
        .collect();

    if messages.first().map(|m| m.role) != Some(ModelRole::User) {
        messages.insert(0, ModelMessage::user(SYNTHETIC_OPENER));
    }

    if messages.last().map(|m| m.role) != Some(ModelRole::User) {
        messages.push(ModelMessage::user(SYNTHETIC_CONTINUATION));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(sender: SenderRole, content: &str) -> Turn {
        Turn::new(sender, content)
    }

    #[test]
    fn test_empty_transcript_gets_synthetic_opener() {
        let messages = adapt(&[]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, ModelRole::User);
        assert_eq!(messages[0].content, SYNTHETIC_OPENER);
    }

    #[test]
    fn test_well_formed_transcript_is_role_mapping_only() {
        let turns = vec![
            turn(SenderRole::Tutor, "What's the first step?"),
            turn(SenderRole::Learner, "Um, subtract 3?"),
            turn(SenderRole::Tutor, "Exactly, try it."),
        ];
        let messages = adapt(&turns);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, ModelRole::User);
        assert_eq!(messages[1].role, ModelRole::Assistant);
        assert_eq!(messages[2].role, ModelRole::User);
        assert_eq!(messages[2].content, "Exactly, try it.");
    }

    #[test]
    fn test_learner_opening_gets_prepended_user() {
        let turns = vec![turn(SenderRole::Learner, "Hi, I'm stuck.")];
        let messages = adapt(&turns);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, SYNTHETIC_OPENER);
        assert_eq!(messages[1].role, ModelRole::Assistant);
        assert_eq!(messages[2].content, SYNTHETIC_CONTINUATION);
    }

    #[test]
    fn test_learner_tail_gets_continuation() {
        let turns = vec![
            turn(SenderRole::Tutor, "Try x=2."),
            turn(SenderRole::Learner, "Okay... is that right?"),
        ];
        let messages = adapt(&turns);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages.last().unwrap().role, ModelRole::User);
        assert_eq!(messages.last().unwrap().content, SYNTHETIC_CONTINUATION);
    }

    #[test]
    fn test_adapt_starts_and_ends_with_user_for_all_shapes() {
        let shapes: Vec<Vec<Turn>> = vec![
            vec![],
            vec![turn(SenderRole::Tutor, "a")],
            vec![turn(SenderRole::Learner, "b")],
            vec![turn(SenderRole::Tutor, "a"), turn(SenderRole::Learner, "b")],
            vec![turn(SenderRole::Learner, "b"), turn(SenderRole::Tutor, "a")],
        ];

        for turns in shapes {
            let messages = adapt(&turns);
            assert_eq!(messages.first().unwrap().role, ModelRole::User);
            assert_eq!(messages.last().unwrap().role, ModelRole::User);
        }
    }
}
