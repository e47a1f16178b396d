//! Workspace preset trait
//!
//! A preset fixes everything about a generated workspace that is not derived
//! from the user's input: the canonical member lists, the package manager,
//! where bundled templates are looked up, and what to tell the user at the end.

use crate::member::MemberType;
use crate::runtime::CommandSpec;
use std::path::Path;

/// Configuration trait for workspace flavours
pub trait WorkspacePreset: Clone + Send + Sync + 'static {
    /// Internal name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Shared tooling packages, created first and in this order
    fn base_packages(&self) -> &'static [&'static str];

    /// Shared library packages, created after the base packages
    fn helper_packages(&self) -> &'static [&'static str];

    /// Default applications, one per application type
    fn default_apps(&self) -> &'static [(&'static str, MemberType)];

    /// Environment variable overriding the bundled template directory
    fn template_dir_env(&self) -> &'static str;

    /// Package manager binary queried for its version
    fn package_manager(&self) -> &'static str {
        "pnpm"
    }

    /// Version written to `packageManager` when the query fails
    fn fallback_package_manager_version(&self) -> &'static str;

    /// File marking a directory as a scaffolded workspace root
    fn marker_file(&self) -> &'static str {
        ".monorepo"
    }

    /// Third-party generator to run before a member's own files are written
    fn external_generator(&self, _member_type: MemberType, _member_dir: &Path) -> Option<CommandSpec> {
        None
    }

    /// Generate the "next steps" instructions after workspace creation
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}

/// Turbo + pnpm TypeScript monorepo
#[derive(Debug, Clone, Copy, Default)]
pub struct TurboPreset;

impl WorkspacePreset for TurboPreset {
    fn name(&self) -> &'static str {
        "turbo-ts-cli"
    }

    fn display_name(&self) -> &'static str {
        "Turbo monorepo"
    }

    fn base_packages(&self) -> &'static [&'static str] {
        &["eslint-config", "typescript-config", "docker"]
    }

    fn helper_packages(&self) -> &'static [&'static str] {
        &["db", "types", "queue"]
    }

    fn default_apps(&self) -> &'static [(&'static str, MemberType)] {
        &[
            ("web", MemberType::WebFramework),
            ("worker", MemberType::NodeService),
            ("api", MemberType::ApiFramework),
        ]
    }

    fn template_dir_env(&self) -> &'static str {
        "TURBO_TS_TEMPLATE_DIR"
    }

    fn fallback_package_manager_version(&self) -> &'static str {
        "9.15.4"
    }

    fn external_generator(&self, member_type: MemberType, member_dir: &Path) -> Option<CommandSpec> {
        if member_type != MemberType::WebFramework {
            return None;
        }
        let area_dir = member_dir.parent()?;
        let name = member_dir.file_name()?.to_str()?;

        Some(
            CommandSpec::new("pnpm")
                .args(["dlx", "create-next-app@latest", name])
                .args([
                    "--typescript",
                    "--eslint",
                    "--tailwind",
                    "--app",
                    "--src-dir",
                    "--import-alias",
                    "@/*",
                    "--use-pnpm",
                    "--turbo",
                    "--yes",
                ])
                .current_dir(area_dir),
        )
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }
        steps.push("pnpm install".to_string());
        steps.push("pnpm dev".to_string());
        steps.push("pnpm db:init   (once the database container is up)".to_string());

        steps
    }
}
