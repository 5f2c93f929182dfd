//! Infrastructure for TutorLab: template stores and static configuration.
//!
//! Everything here is read-only at runtime. The core crate defines the
//! contracts (`TemplateStore`, `CategoryRegistry`); this crate supplies
//! the embedded defaults and the file-backed variants.

pub mod categories;
pub mod templates;

pub use categories::{default_registry, registry_from_path, registry_from_toml};
pub use templates::{DirTemplateStore, EmbeddedTemplateLibrary};
