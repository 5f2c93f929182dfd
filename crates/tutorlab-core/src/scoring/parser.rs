//! Score parser and validator.
//!
//! The scoring model replies with free-form text that is expected to
//! contain one JSON report object. This module extracts that object with a
//! string-aware balanced-brace scanner, parses it into one of the two
//! accepted shapes, and validates the result against the registered
//! category keys. Pure functions, no I/O: identical input always produces
//! an identical report.

use super::report::{CategoryScore, ScoreReport};
use crate::error::{Result, TutorLabError};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Locates the first balanced JSON object substring in `text`.
///
/// Scans from the first `{` and tracks brace depth, skipping braces inside
/// JSON strings (escape-aware), so nested braces in feedback text cannot
/// cause over-matching.
///
/// # Errors
///
/// Returns `Parse` if the text contains no `{`, or if the braces never
/// balance before the text ends.
pub fn extract_json_object(text: &str) -> Result<&str> {
    let start = text
        .find('{')
        .ok_or_else(|| TutorLabError::parse("no JSON object found in model output"))?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    Err(TutorLabError::parse(
        "unbalanced braces in model output, JSON object never closed",
    ))
}

/// The two report shapes the scoring model is known to emit.
///
/// Variants are tried in declaration order; the nested shape is the
/// current contract, the flat shape is the legacy layout older prompt
/// revisions produced.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReport {
    Nested {
        categories: BTreeMap<String, RawCategoryScore>,
        session_summary: String,
    },
    Legacy {
        scores: BTreeMap<String, i64>,
        feedback: LegacyFeedback,
        #[serde(default)]
        session_summary: Option<String>,
    },
}

/// Category entry with optional fields so validation can name exactly
/// which field is missing instead of failing shape detection.
#[derive(Debug, Deserialize)]
struct RawCategoryScore {
    #[serde(default)]
    score: Option<i64>,
    #[serde(default)]
    feedback: Option<String>,
}

/// Legacy feedback: either one shared string or a per-category map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyFeedback {
    PerCategory(BTreeMap<String, String>),
    Shared(String),
}

/// Parses raw model text into a validated [`ScoreReport`].
///
/// # Errors
///
/// - `Parse` when no JSON object can be extracted or the JSON is malformed
/// - `Validation` when a required category key or field is missing, a
///   score is outside 1-5, or the object matches neither accepted shape
pub fn parse(raw_text: &str, required_keys: &[String]) -> Result<ScoreReport> {
    let json = extract_json_object(raw_text)?;

    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|err| TutorLabError::parse(format!("malformed JSON in model output: {err}")))?;

    let raw: RawReport = serde_json::from_value(value)
        .map_err(|_| TutorLabError::validation("unrecognized report shape"))?;

    match raw {
        RawReport::Nested {
            categories,
            session_summary,
        } => validate_nested(categories, session_summary, required_keys),
        RawReport::Legacy {
            scores,
            feedback,
            session_summary,
        } => convert_legacy(scores, feedback, session_summary, required_keys),
    }
}

fn validate_nested(
    categories: BTreeMap<String, RawCategoryScore>,
    session_summary: String,
    required_keys: &[String],
) -> Result<ScoreReport> {
    let mut report = ScoreReport::empty(session_summary);

    for key in required_keys {
        let entry = categories.get(key).ok_or_else(|| {
            TutorLabError::validation(format!("missing category '{key}' in report"))
        })?;
        let score = entry.score.ok_or_else(|| {
            TutorLabError::validation(format!("missing score for category '{key}'"))
        })?;
        let feedback = entry.feedback.clone().ok_or_else(|| {
            TutorLabError::validation(format!("missing feedback for category '{key}'"))
        })?;

        report
            .categories
            .insert(key.clone(), build_entry(key, score, feedback)?);
    }

    Ok(report)
}

fn convert_legacy(
    scores: BTreeMap<String, i64>,
    feedback: LegacyFeedback,
    session_summary: Option<String>,
    required_keys: &[String],
) -> Result<ScoreReport> {
    let summary = session_summary.unwrap_or_else(|| "Session completed.".to_string());
    let mut report = ScoreReport::empty(summary);

    for key in required_keys {
        let score = *scores.get(key).ok_or_else(|| {
            TutorLabError::validation(format!("missing score for category '{key}' in legacy report"))
        })?;
        let feedback_text = match &feedback {
            LegacyFeedback::Shared(text) => text.clone(),
            LegacyFeedback::PerCategory(map) => map
                .get(key)
                .cloned()
                .ok_or_else(|| {
                    TutorLabError::validation(format!(
                        "missing feedback for category '{key}' in legacy report"
                    ))
                })?,
        };

        report
            .categories
            .insert(key.clone(), build_entry(key, score, feedback_text)?);
    }

    Ok(report)
}

fn build_entry(key: &str, score: i64, feedback: String) -> Result<CategoryScore> {
    if !(1..=5).contains(&score) {
        return Err(TutorLabError::validation(format!(
            "score {score} for category '{key}' is outside 1-5"
        )));
    }
    if feedback.trim().is_empty() {
        return Err(TutorLabError::validation(format!(
            "empty feedback for category '{key}'"
        )));
    }
    Ok(CategoryScore {
        score: score as u8,
        feedback,
    })
}
