//! Bundled starter sources copied over generated members
//!
//! The template directory holds a `template.yaml` listing which template
//! folder overlays which member. Overlays only add or replace source files;
//! a member's `package.json` is never touched.

use crate::error::{Result, ScaffoldError};
use crate::materialize;
use crate::member::MemberKind;
use crate::naming;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// File name of the overlay manifest inside the template directory
pub const OVERLAY_MANIFEST: &str = "template.yaml";

/// Files an overlay may never replace
const PROTECTED_FILES: &[&str] = &["package.json", OVERLAY_MANIFEST];

/// Workspace area an overlay targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayArea {
    Apps,
    Packages,
}

impl OverlayArea {
    pub fn dir_name(&self) -> &'static str {
        match self {
            OverlayArea::Apps => MemberKind::Application.area(),
            OverlayArea::Packages => MemberKind::SharedPackage.area(),
        }
    }
}

/// One template folder mapped onto one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    /// Folder name inside the template directory
    pub template: String,

    pub area: OverlayArea,

    /// Member directory name the files land in
    pub member: String,
}

/// Root overlay manifest (templates/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayManifest {
    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Applied in order
    #[serde(default)]
    pub overlays: Vec<Overlay>,
}

impl OverlayManifest {
    pub fn load(template_dir: &Path) -> Result<Self> {
        let path = template_dir.join(OVERLAY_MANIFEST);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ScaffoldError::TemplateManifest {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;
        Self::parse(&path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let invalid = |message: String| ScaffoldError::TemplateManifest {
            path: path.to_path_buf(),
            message,
        };

        let manifest: Self = serde_yaml::from_str(content).map_err(|e| invalid(e.to_string()))?;
        for overlay in &manifest.overlays {
            if !is_relative_below(&overlay.template) {
                return Err(invalid(format!(
                    "template '{}' must be a relative path inside the template directory",
                    overlay.template
                )));
            }
            naming::validate_name("Overlay member", &overlay.member)
                .map_err(|e| invalid(e.to_string()))?;
        }
        Ok(manifest)
    }
}

/// Non-empty and made only of normal components (no `..`, root or prefix)
fn is_relative_below(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Outcome of applying all overlays
#[derive(Debug, Default)]
pub struct OverlayReport {
    /// Written files, relative to the workspace root
    pub copied: Vec<PathBuf>,

    /// Overlays whose source or target member was missing
    pub skipped: Vec<String>,
}

/// Copy every overlay's files into its member directory under `workspace_root`
pub fn apply_overlays(
    template_dir: &Path,
    manifest: &OverlayManifest,
    workspace_root: &Path,
) -> Result<OverlayReport> {
    let mut report = OverlayReport::default();

    for overlay in &manifest.overlays {
        let source = template_dir.join(&overlay.template);
        let member_rel = Path::new(overlay.area.dir_name()).join(&overlay.member);
        let target = workspace_root.join(&member_rel);

        if !source.is_dir() || !target.is_dir() {
            report.skipped.push(format!(
                "{} -> {}",
                overlay.template,
                member_rel.display()
            ));
            continue;
        }

        for file in overlay_files(&source)? {
            materialize::copy_file(&source.join(&file), &target.join(&file))?;
            report.copied.push(member_rel.join(&file));
        }
    }

    Ok(report)
}

/// Files below `source`, relative to it, in a stable order
fn overlay_files(source: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| source.to_path_buf());
            ScaffoldError::write(path, io::Error::from(e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_protected(entry.file_name().to_str().unwrap_or_default()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(source) {
            files.push(relative.to_path_buf());
        }
    }

    Ok(files)
}

fn is_protected(file_name: &str) -> bool {
    PROTECTED_FILES.contains(&file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
version: "0.1.0"
overlays:
  - template: node
    area: apps
    member: worker
  - template: db
    area: packages
    member: db
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = OverlayManifest::parse(Path::new("template.yaml"), MANIFEST).unwrap();
        assert_eq!(manifest.version, "0.1.0");
        assert_eq!(manifest.overlays.len(), 2);
        assert_eq!(manifest.overlays[0].area, OverlayArea::Apps);
        assert_eq!(manifest.overlays[1].area.dir_name(), "packages");
    }

    #[test]
    fn test_malformed_manifest() {
        let err = OverlayManifest::parse(Path::new("template.yaml"), "overlays: 3").unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateManifest { .. }));
    }

    #[test]
    fn test_traversal_in_manifest_rejected() {
        for (template, member) in [
            ("../outside", "worker"),
            ("/etc", "worker"),
            ("node", "../../escape"),
            ("node", "a/b"),
            ("", "worker"),
        ] {
            let yaml = format!(
                "version: \"0.1.0\"\noverlays:\n  - template: \"{}\"\n    area: apps\n    member: \"{}\"\n",
                template, member
            );
            assert!(
                matches!(
                    OverlayManifest::parse(Path::new("template.yaml"), &yaml),
                    Err(ScaffoldError::TemplateManifest { .. })
                ),
                "{} -> {}",
                template,
                member
            );
        }
    }

    #[test]
    fn test_nested_template_folder_allowed() {
        let yaml = "version: \"0.1.0\"\noverlays:\n  - template: starters/nest\n    area: apps\n    member: api\n";
        assert!(OverlayManifest::parse(Path::new("template.yaml"), yaml).is_ok());
    }

    #[test]
    fn test_apply_overlays_never_touches_manifest() {
        let templates = TempDir::new().unwrap();
        let workspace = TempDir::new().unwrap();

        let node = templates.path().join("node");
        fs::create_dir_all(node.join("src/jobs")).unwrap();
        fs::write(node.join("src/jobs/generate-posts.ts"), "export {};").unwrap();
        fs::write(node.join("package.json"), "{\"name\":\"overlay\"}").unwrap();

        let worker = workspace.path().join("apps/worker");
        fs::create_dir_all(&worker).unwrap();
        fs::write(worker.join("package.json"), "{\"name\":\"@apps/worker\"}").unwrap();

        let manifest = OverlayManifest::parse(Path::new("template.yaml"), MANIFEST).unwrap();
        let report = apply_overlays(templates.path(), &manifest, workspace.path()).unwrap();

        assert_eq!(
            report.copied,
            vec![PathBuf::from("apps/worker/src/jobs/generate-posts.ts")]
        );
        // db template folder does not exist
        assert_eq!(report.skipped, vec!["db -> packages/db".to_string()]);
        assert_eq!(
            fs::read_to_string(worker.join("package.json")).unwrap(),
            "{\"name\":\"@apps/worker\"}"
        );
        assert!(worker.join("src/jobs/generate-posts.ts").exists());
    }
}
