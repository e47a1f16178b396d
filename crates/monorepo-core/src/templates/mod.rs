//! Template catalog, bundled overlays, and version checks
//!
//! This module provides:
//! - The static template registry keyed by member kind, type and reserved name
//! - Literal template bodies
//! - Overlay import of bundled starter sources
//! - Version compatibility checking for the bundled templates

pub mod contents;
pub mod overlay;
pub mod registry;
pub mod version;

use crate::preset::WorkspacePreset;
use std::path::{Path, PathBuf};

pub use overlay::{apply_overlays, Overlay, OverlayArea, OverlayManifest, OverlayReport};
pub use registry::{
    lookup_templates, workspace_templates, RenderedContent, TemplateContent, TemplateContext,
    TemplateUnit,
};
pub use version::check_compatibility;

/// Locate the bundled template directory.
///
/// An explicit path always wins, even if it does not exist (loading it then
/// fails loudly). Otherwise the first existing directory among the preset's
/// environment variable, `templates/` next to the executable, and the source
/// checkout. Returns `None` when none exists; the overlay phase is skipped.
pub fn resolve_template_dir<P: WorkspacePreset>(
    preset: &P,
    explicit: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(path) = std::env::var(preset.template_dir_env()) {
        if !path.trim().is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(dir.join("templates"));
    }
    candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates"));

    candidates.into_iter().find(|dir| dir.is_dir())
}
