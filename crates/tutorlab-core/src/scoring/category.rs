//! Scoring categories and the category registry.
//!
//! Categories are loaded once from static configuration and define the
//! required keys of every score report. The registry is immutable after
//! construction.

use super::report::{CategoryScore, ScoreReport};
use crate::error::{Result, TutorLabError};
use serde::{Deserialize, Serialize};

/// Midpoint of the 1-5 scoring scale, used by the fallback report.
pub const MIDPOINT_SCORE: u8 = 3;

/// Fixed summary used when end-of-session scoring cannot be produced.
pub const FALLBACK_SUMMARY: &str = "Session completed. Unable to generate detailed analysis.";

/// One scoring dimension a tutor is evaluated on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringCategory {
    /// Stable identifier (e.g. `explanation_clarity`)
    pub key: String,
    /// Human-readable display label
    pub label: String,
    /// Optional longer description shown to the scoring model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The ordered set of scoring categories.
///
/// Order is the configuration order and is preserved everywhere the
/// categories are rendered.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<ScoringCategory>,
}

impl CategoryRegistry {
    /// Creates a registry from an already-loaded category list.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the list is empty: a scoring pipeline without
    /// categories cannot produce a meaningful report.
    pub fn new(categories: Vec<ScoringCategory>) -> Result<Self> {
        if categories.is_empty() {
            return Err(TutorLabError::config(
                "scoring category configuration yielded zero categories",
            ));
        }
        Ok(Self { categories })
    }

    /// All categories, in configuration order.
    pub fn categories(&self) -> &[ScoringCategory] {
        &self.categories
    }

    /// The category keys, in configuration order.
    pub fn keys(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.key.clone()).collect()
    }

    /// Renders the bullet list embedded verbatim in the scoring prompt.
    ///
    /// One line per category: `- key: label - description`, with the
    /// description omitted when absent. Stable for identical input.
    pub fn describe(&self) -> String {
        self.categories
            .iter()
            .map(|c| match &c.description {
                Some(description) => format!("- {}: {} - {}", c.key, c.label, description),
                None => format!("- {}: {}", c.key, c.label),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The deterministic report returned when scoring fails.
    ///
    /// Every category scored at the midpoint with a generic
    /// per-category feedback line; building it here guarantees the
    /// fallback can never miss a registered key.
    pub fn default_report(&self) -> ScoreReport {
        let mut report = ScoreReport::empty(FALLBACK_SUMMARY);
        for category in &self.categories {
            report.categories.insert(
                category.key.clone(),
                CategoryScore {
                    score: MIDPOINT_SCORE,
                    feedback: format!("Unable to evaluate {}.", category.label.to_lowercase()),
                },
            );
        }
        report
    }
}
