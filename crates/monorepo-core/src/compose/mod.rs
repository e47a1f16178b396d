//! Manifest composition
//!
//! Pure: builds `package.json` documents in memory, never touches disk.

pub mod document;
pub mod rules;

pub use document::ManifestDocument;
pub use rules::{compose_manifest, compose_root_manifest, rules_for, ManifestRule, SHARED_LIBRARIES};
