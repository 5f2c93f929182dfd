//! Core domain logic for TutorLab: tutoring-practice sessions against an
//! AI-simulated student, scored per category when the session ends.
//!
//! This crate is transport-free. The external model is reached only
//! through the [`model::ModelClient`] trait and templates only through
//! [`prompt::TemplateStore`]; concrete implementations live in the
//! `tutorlab-interaction` and `tutorlab-infrastructure` crates.

pub mod adapter;
pub mod error;
pub mod model;
pub mod persona;
pub mod prompt;
pub mod scoring;
pub mod session;

// Re-export common error type
pub use error::{Result, TutorLabError};
