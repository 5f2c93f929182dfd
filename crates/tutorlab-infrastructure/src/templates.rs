//! Template store implementations.
//!
//! Two stores back the core `TemplateStore` trait:
//!
//! - [`EmbeddedTemplateLibrary`]: compiled-in defaults, always available
//! - [`DirTemplateStore`]: a `<base>/<group>/<key>.md` directory layout
//!   that overrides the embedded set per key and falls back to it when a
//!   file is absent, so a partially-populated directory still serves
//!   complete prompt sets

use std::collections::HashMap;
use std::path::PathBuf;
use tutorlab_core::error::{Result, TutorLabError};
use tutorlab_core::prompt::{
    GROUP_FALLBACKS, GROUP_PERSONAS, GROUP_PROMPTS, KEY_BASE_STUDENT, KEY_SCORING, TemplateStore,
};

/// Compiled-in default template set.
///
/// Carries the prompt skeletons, the four stock personas, and their
/// fallback reply lines.
pub struct EmbeddedTemplateLibrary {
    entries: HashMap<(&'static str, &'static str), &'static str>,
}

impl Default for EmbeddedTemplateLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddedTemplateLibrary {
    pub fn new() -> Self {
        let mut entries: HashMap<(&'static str, &'static str), &'static str> = HashMap::new();

        entries.insert(
            (GROUP_PROMPTS, KEY_BASE_STUDENT),
            include_str!("../templates/prompts/base_student.md"),
        );
        entries.insert(
            (GROUP_PROMPTS, KEY_SCORING),
            include_str!("../templates/prompts/scoring.md"),
        );

        entries.insert(
            (GROUP_PERSONAS, "anxious_alex"),
            include_str!("../templates/personas/anxious_alex.md"),
        );
        entries.insert(
            (GROUP_PERSONAS, "methodical_maya"),
            include_str!("../templates/personas/methodical_maya.md"),
        );
        entries.insert(
            (GROUP_PERSONAS, "overconfident_olivia"),
            include_str!("../templates/personas/overconfident_olivia.md"),
        );
        entries.insert(
            (GROUP_PERSONAS, "struggling_sam"),
            include_str!("../templates/personas/struggling_sam.md"),
        );

        entries.insert(
            (GROUP_FALLBACKS, "anxious_alex"),
            include_str!("../templates/fallbacks/anxious_alex.md"),
        );
        entries.insert(
            (GROUP_FALLBACKS, "methodical_maya"),
            include_str!("../templates/fallbacks/methodical_maya.md"),
        );
        entries.insert(
            (GROUP_FALLBACKS, "overconfident_olivia"),
            include_str!("../templates/fallbacks/overconfident_olivia.md"),
        );
        entries.insert(
            (GROUP_FALLBACKS, "struggling_sam"),
            include_str!("../templates/fallbacks/struggling_sam.md"),
        );

        Self { entries }
    }

    fn lookup(&self, group: &str, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|((g, k), _)| *g == group && *k == key)
            .map(|(_, body)| *body)
    }

    fn keys_in(&self, group: &str) -> Vec<String> {
        self.entries
            .keys()
            .filter(|(g, _)| *g == group)
            .map(|(_, k)| k.to_string())
            .collect()
    }
}

#[async_trait::async_trait]
impl TemplateStore for EmbeddedTemplateLibrary {
    async fn load(&self, group: &str, key: &str) -> Result<String> {
        self.lookup(group, key)
            .map(|body| body.to_string())
            .ok_or_else(|| TutorLabError::not_found("template", format!("{group}/{key}")))
    }

    async fn list(&self, group: &str) -> Result<Vec<String>> {
        let mut keys = self.keys_in(group);
        keys.sort();
        Ok(keys)
    }
}

/// Directory-backed template store.
///
/// Directory structure:
/// ```text
/// base_dir/
/// ├── personas/
/// │   ├── anxious_alex.md
/// │   └── ...
/// ├── prompts/
/// │   └── scoring.md
/// └── fallbacks/
///     └── ...
/// ```
///
/// Keys missing on disk resolve against the embedded library.
pub struct DirTemplateStore {
    base_dir: PathBuf,
    embedded: EmbeddedTemplateLibrary,
}

impl DirTemplateStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            embedded: EmbeddedTemplateLibrary::new(),
        }
    }

    fn path_for(&self, group: &str, key: &str) -> PathBuf {
        self.base_dir.join(group).join(format!("{key}.md"))
    }
}

#[async_trait::async_trait]
impl TemplateStore for DirTemplateStore {
    async fn load(&self, group: &str, key: &str) -> Result<String> {
        let path = self.path_for(group, key);
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(body),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(group, key, "template not on disk, using embedded default");
                self.embedded.load(group, key).await
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self, group: &str) -> Result<Vec<String>> {
        let mut keys = self.embedded.keys_in(group);

        let dir = self.base_dir.join(group);
        match tokio::fs::read_dir(&dir).await {
            Ok(mut entries) => {
                while let Some(entry) = entries.next_entry().await? {
                    let path = entry.path();
                    if path.extension().and_then(|ext| ext.to_str()) == Some("md") {
                        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                            keys.push(stem.to_string());
                        }
                    }
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        keys.sort();
        keys.dedup();
        Ok(keys)
    }
}
