//! Monorepo Core - Declarative scaffolding for Turbo + pnpm TypeScript monorepos
//!
//! A workspace is described as data: a name, a fixed set of shared packages,
//! and a set of applications. Every member's `package.json` is composed from a
//! base document plus layered rules, every source file comes from a static
//! template catalog, and only then is anything written to disk.
//!
//! # Architecture
//!
//! - **Layer 1: Pure composition** - naming, the template registry and the
//!   manifest composer. No I/O.
//! - **Layer 2: Materialization** - `Scaffolder` writes a planned workspace,
//!   runs external generators through a `CommandRunner`, and overlays bundled
//!   starter sources
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use monorepo_core::{ScaffoldOptions, Scaffolder, SystemRunner, TurboPreset};
//!
//! let scaffolder = Scaffolder::new(&TurboPreset, &SystemRunner, ScaffoldOptions::default());
//! let root = scaffolder.scaffold_workspace(Path::new("."), "shop-app")?;
//! ```

pub mod compose;
pub mod error;
pub mod materialize;
pub mod member;
pub mod naming;
pub mod preset;
pub mod runtime;
pub mod templates;
pub mod workspace;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use compose::{compose_manifest, compose_root_manifest, ManifestDocument};
pub use error::{Result, ScaffoldError};
pub use member::{MemberKind, MemberSpec, MemberType, ReservedPackage, WorkspaceSpec};
pub use naming::{derive_resource_name, ResourceName};
pub use preset::{TurboPreset, WorkspacePreset};
pub use runtime::{CommandRunner, CommandSpec, SystemRunner};
pub use templates::{lookup_templates, TemplateUnit};
pub use workspace::{plan_member, plan_workspace, ScaffoldOptions, Scaffolder};

#[cfg(feature = "tui")]
pub use tui::run;

/// CLI version - used for template compatibility checking
/// Each binary should define its own version, but this provides a fallback
pub const DEFAULT_CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
