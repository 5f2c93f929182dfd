//! Template store trait and placeholder substitution.
//!
//! Templates are keyed text bodies grouped by purpose (persona
//! descriptions, prompt skeletons, fallback lines). Concrete stores live in
//! `tutorlab-infrastructure`; this module defines the contract plus the
//! substitution rules shared by all of them.

use crate::error::Result;

/// Logical group holding persona description templates.
pub const GROUP_PERSONAS: &str = "personas";
/// Logical group holding prompt skeleton templates.
pub const GROUP_PROMPTS: &str = "prompts";
/// Logical group holding per-persona fallback reply lines.
pub const GROUP_FALLBACKS: &str = "fallbacks";

/// Key of the base student-roleplay prompt skeleton (in [`GROUP_PROMPTS`]).
pub const KEY_BASE_STUDENT: &str = "base_student";
/// Key of the scoring prompt skeleton (in [`GROUP_PROMPTS`]).
pub const KEY_SCORING: &str = "scoring";

/// An abstract, key-addressable store of text templates.
///
/// Read-only at runtime. `load` fails with `NotFound` when the group has no
/// template for the key; no fallback substitution happens at this layer —
/// that is a policy decision made by callers.
#[async_trait::async_trait]
pub trait TemplateStore: Send + Sync {
    /// Loads the raw template body for `key` within `group`.
    async fn load(&self, group: &str, key: &str) -> Result<String>;

    /// Enumerates the available keys under `group`, sorted
    /// lexicographically for determinism.
    async fn list(&self, group: &str) -> Result<Vec<String>>;
}

/// Replaces every `{{name}}` placeholder with the bound value.
///
/// Partial substitution contract: placeholders without a binding remain
/// verbatim in the output. Callers must supply every binding the template
/// expects or accept literal placeholder text in the result.
pub fn substitute(template: &str, bindings: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in bindings {
        let placeholder = format!("{{{{{name}}}}}");
        out = out.replace(&placeholder, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_replaces_all_occurrences() {
        let out = substitute(
            "Problem: {{problem}}. Again: {{problem}}.",
            &[("problem", "2x+3=7")],
        );
        assert_eq!(out, "Problem: 2x+3=7. Again: 2x+3=7.");
    }

    #[test]
    fn test_substitute_leaves_unbound_placeholders_verbatim() {
        let out = substitute("{{known}} and {{unknown}}", &[("known", "yes")]);
        assert_eq!(out, "yes and {{unknown}}");
    }

    #[test]
    fn test_substitute_with_no_bindings_is_identity() {
        let template = "plain text with {{placeholder}}";
        assert_eq!(substitute(template, &[]), template);
    }
}
