//! Scoring categories, reports, and model-output parsing.

pub mod category;
pub mod parser;
pub mod report;

pub use category::{CategoryRegistry, FALLBACK_SUMMARY, MIDPOINT_SCORE, ScoringCategory};
pub use parser::{extract_json_object, parse};
pub use report::{CategoryScore, ScoreReport};
