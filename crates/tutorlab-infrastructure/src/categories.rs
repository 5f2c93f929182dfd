//! Scoring category configuration.
//!
//! Categories come from a TOML document (embedded default or a file on
//! disk) and are loaded once at startup into the core `CategoryRegistry`.

use serde::Deserialize;
use std::path::Path;
use tutorlab_core::error::{Result, TutorLabError};
use tutorlab_core::scoring::{CategoryRegistry, ScoringCategory};

/// Compiled-in default category configuration.
const DEFAULT_CATEGORIES_TOML: &str = include_str!("../config/categories.toml");

#[derive(Debug, Deserialize)]
struct CategoriesFile {
    #[serde(default)]
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    key: String,
    label: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<CategoryEntry> for ScoringCategory {
    fn from(entry: CategoryEntry) -> Self {
        Self {
            key: entry.key,
            label: entry.label,
            description: entry.description,
        }
    }
}

/// Parses a registry from TOML text.
///
/// # Errors
///
/// Returns `Config` for malformed TOML or a document that yields zero
/// categories.
pub fn registry_from_toml(text: &str) -> Result<CategoryRegistry> {
    let file: CategoriesFile = toml::from_str(text)
        .map_err(|err| TutorLabError::config(format!("malformed category TOML: {err}")))?;

    CategoryRegistry::new(file.categories.into_iter().map(Into::into).collect())
}

/// Loads the registry from a TOML file on disk.
pub async fn registry_from_path(path: impl AsRef<Path>) -> Result<CategoryRegistry> {
    let text = tokio::fs::read_to_string(path.as_ref()).await?;
    registry_from_toml(&text)
}

/// The registry built from the embedded default configuration.
pub fn default_registry() -> Result<CategoryRegistry> {
    registry_from_toml(DEFAULT_CATEGORIES_TOML)
}
