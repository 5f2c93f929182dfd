//! Score report types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The evaluation of one category: a 1-5 score plus written feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u8,
    pub feedback: String,
}

/// The structured evaluation produced at session end.
///
/// Covers exactly the registered category keys, plus a session summary.
/// Produced once per session and not mutated afterward. The category map
/// is a `BTreeMap` so serialization order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub categories: BTreeMap<String, CategoryScore>,
    pub session_summary: String,
}

impl ScoreReport {
    /// Creates a report with no category entries yet.
    pub(crate) fn empty(session_summary: impl Into<String>) -> Self {
        Self {
            categories: BTreeMap::new(),
            session_summary: session_summary.into(),
        }
    }
}
