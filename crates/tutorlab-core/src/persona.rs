//! Persona helpers.
//!
//! A persona is a named behavioral profile the simulated student adopts.
//! Sessions reference personas by key; the behavior text itself lives in
//! the template store under [`GROUP_PERSONAS`](crate::prompt::GROUP_PERSONAS)
//! so it can never desync from its source.

use serde::{Deserialize, Serialize};

/// Display information for a persona, derived from its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaInfo {
    /// Stable key (e.g. `anxious_alex`)
    pub key: String,
    /// Title-cased display name (e.g. `Anxious Alex`)
    pub name: String,
}

impl PersonaInfo {
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        let name = display_name(&key);
        Self { key, name }
    }
}

/// Derives a display name from a persona key: underscores become spaces
/// and each word is title-cased (`anxious_alex` -> `Anxious Alex`).
pub fn display_name(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_title_cases_words() {
        assert_eq!(display_name("anxious_alex"), "Anxious Alex");
        assert_eq!(display_name("overconfident_olivia"), "Overconfident Olivia");
    }

    #[test]
    fn test_display_name_single_word() {
        assert_eq!(display_name("maya"), "Maya");
    }

    #[test]
    fn test_persona_info_from_key() {
        let info = PersonaInfo::from_key("struggling_sam");
        assert_eq!(info.key, "struggling_sam");
        assert_eq!(info.name, "Struggling Sam");
    }
}
