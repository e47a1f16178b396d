//! Static template catalog
//!
//! Units are keyed by member kind and type, and for shared packages also by
//! reserved package name. A lookup returns the generic units for the
//! kind/type pair followed by the name-specific ones; a name-specific unit
//! with the same target path replaces the generic unit in place.

use super::contents;
use crate::error::Result;
use crate::member::{MemberKind, MemberType, ReservedPackage, WorkspaceSpec};
use crate::naming;
use serde_json::Value;

/// Content of a single template unit
#[derive(Debug, Clone, Copy)]
pub enum TemplateContent {
    /// Written as-is
    Text(&'static str),
    /// Text with `{{placeholder}}` substitution
    Parameterized(&'static str),
    /// Structured document serialized by the materializer
    Structured(fn() -> Value),
}

/// A static or parameter-bound file fragment
#[derive(Debug, Clone, Copy)]
pub struct TemplateUnit {
    /// Path relative to the member (or workspace) directory
    pub target: &'static str,
    pub content: TemplateContent,
}

impl TemplateUnit {
    const fn text(target: &'static str, body: &'static str) -> Self {
        Self {
            target,
            content: TemplateContent::Text(body),
        }
    }

    const fn param(target: &'static str, body: &'static str) -> Self {
        Self {
            target,
            content: TemplateContent::Parameterized(body),
        }
    }

    const fn structured(target: &'static str, build: fn() -> Value) -> Self {
        Self {
            target,
            content: TemplateContent::Structured(build),
        }
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self.content, TemplateContent::Parameterized(_))
    }

    /// Render into file content using the substitution context
    pub fn render(&self, context: &TemplateContext) -> RenderedContent {
        match self.content {
            TemplateContent::Text(body) => RenderedContent::Text(body.to_string()),
            TemplateContent::Parameterized(body) => RenderedContent::Text(context.apply(body)),
            TemplateContent::Structured(build) => RenderedContent::Structured(build()),
        }
    }
}

/// Rendered unit, ready for the materializer
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedContent {
    Text(String),
    Structured(Value),
}

/// The single substitution context handed to parameterized units
#[derive(Debug, Clone)]
pub struct TemplateContext {
    values: Vec<(&'static str, String)>,
}

impl TemplateContext {
    pub fn new(workspace: &WorkspaceSpec, member_name: Option<&str>) -> Result<Self> {
        let resource = workspace.resource_name();
        let mut values = vec![
            ("workspace_name", workspace.name().to_string()),
            ("resource_name", resource.to_string()),
            ("database_url", naming::database_url(resource)?),
        ];
        if let Some(member) = member_name {
            values.push(("member_name", member.to_string()));
        }
        Ok(Self { values })
    }

    /// Literal placeholder replacement; unknown placeholders are left intact
    pub fn apply(&self, body: &str) -> String {
        self.values
            .iter()
            .fold(body.to_string(), |acc, (key, value)| {
                acc.replace(&format!("{{{{{}}}}}", key), value)
            })
    }
}

/// Lookup key for the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TemplateKey {
    kind: MemberKind,
    member_type: MemberType,
    name: Option<ReservedPackage>,
}

const fn key(kind: MemberKind, member_type: MemberType, name: Option<ReservedPackage>) -> TemplateKey {
    TemplateKey {
        kind,
        member_type,
        name,
    }
}

use crate::member::MemberKind::{Application, SharedPackage};
use crate::member::MemberType::{
    ApiFramework, ConfigPackage, LibraryPackage, NodeService, WebFramework,
};

const NODE_SERVICE: &[TemplateUnit] = &[
    TemplateUnit::text("eslint.config.js", contents::ESLINT_CONFIG_JS),
    TemplateUnit::structured("tsconfig.json", contents::member_tsconfig_json),
    TemplateUnit::text("tsup.config.ts", contents::TSUP_CONFIG_INDEX_TS),
    TemplateUnit::param("src/index.ts", contents::WORKER_INDEX_TS),
];

const API_FRAMEWORK: &[TemplateUnit] = &[
    TemplateUnit::text("eslint.config.js", contents::ESLINT_CONFIG_JS),
    TemplateUnit::structured("tsconfig.json", contents::member_tsconfig_json),
    TemplateUnit::text("tsup.config.ts", contents::TSUP_CONFIG_MAIN_TS),
    TemplateUnit::param("src/main.ts", contents::NEST_MAIN_TS),
    TemplateUnit::text("src/app.module.ts", contents::NEST_APP_MODULE_TS),
];

const WEB_FRAMEWORK: &[TemplateUnit] = &[
    TemplateUnit::text("eslint.config.js", contents::ESLINT_CONFIG_JS),
    TemplateUnit::structured("tsconfig.json", contents::next_tsconfig_json),
    TemplateUnit::text("next.config.ts", contents::NEXT_CONFIG_TS),
    TemplateUnit::param("src/app/layout.tsx", contents::NEXT_LAYOUT_TSX),
    TemplateUnit::param("src/app/page.tsx", contents::NEXT_PAGE_TSX),
    TemplateUnit::param(".env", contents::DATABASE_ENV),
];

const LIBRARY_PACKAGE: &[TemplateUnit] = &[
    TemplateUnit::text("eslint.config.js", contents::ESLINT_CONFIG_JS),
    TemplateUnit::structured("tsconfig.json", contents::member_tsconfig_json),
    TemplateUnit::text("tsup.config.ts", contents::TSUP_CONFIG_INDEX_TS),
];

const DATABASE_PACKAGE: &[TemplateUnit] = &[
    TemplateUnit::text("prisma/schema.prisma", contents::PRISMA_SCHEMA),
    TemplateUnit::text("src/index.ts", contents::DB_INDEX_TS),
    TemplateUnit::param(".env", contents::DATABASE_ENV),
];

const QUEUE_PACKAGE: &[TemplateUnit] = &[TemplateUnit::param(
    "src/index.ts",
    contents::QUEUE_INDEX_TS,
)];

const TYPES_PACKAGE: &[TemplateUnit] = &[TemplateUnit::text(
    "src/index.ts",
    contents::TYPES_INDEX_TS,
)];

const ESLINT_CONFIG_PACKAGE: &[TemplateUnit] = &[TemplateUnit::text(
    "index.js",
    contents::ESLINT_CONFIG_INDEX_JS,
)];

const TYPESCRIPT_CONFIG_PACKAGE: &[TemplateUnit] = &[TemplateUnit::structured(
    "base.json",
    contents::typescript_base_json,
)];

const DOCKER_PACKAGE: &[TemplateUnit] = &[TemplateUnit::param(
    "compose.yml",
    contents::DOCKER_COMPOSE_YML,
)];

const CATALOG: &[(TemplateKey, &[TemplateUnit])] = &[
    (key(Application, WebFramework, None), WEB_FRAMEWORK),
    (key(Application, NodeService, None), NODE_SERVICE),
    (key(Application, ApiFramework, None), API_FRAMEWORK),
    (key(SharedPackage, LibraryPackage, None), LIBRARY_PACKAGE),
    (
        key(SharedPackage, LibraryPackage, Some(ReservedPackage::Database)),
        DATABASE_PACKAGE,
    ),
    (
        key(SharedPackage, LibraryPackage, Some(ReservedPackage::Queue)),
        QUEUE_PACKAGE,
    ),
    (
        key(SharedPackage, LibraryPackage, Some(ReservedPackage::Types)),
        TYPES_PACKAGE,
    ),
    (
        key(SharedPackage, ConfigPackage, Some(ReservedPackage::EslintConfig)),
        ESLINT_CONFIG_PACKAGE,
    ),
    (
        key(SharedPackage, ConfigPackage, Some(ReservedPackage::TypescriptConfig)),
        TYPESCRIPT_CONFIG_PACKAGE,
    ),
    (
        key(SharedPackage, ConfigPackage, Some(ReservedPackage::Docker)),
        DOCKER_PACKAGE,
    ),
];

const WORKSPACE_ROOT: &[TemplateUnit] = &[
    TemplateUnit::text("pnpm-workspace.yaml", contents::PNPM_WORKSPACE_YAML),
    TemplateUnit::structured("turbo.json", contents::turbo_json),
    TemplateUnit::structured(".prettierrc", contents::prettierrc),
    TemplateUnit::text(".prettierignore", contents::PRETTIER_IGNORE),
    TemplateUnit::structured(".vscode/settings.json", contents::vscode_settings),
    TemplateUnit::structured(".vscode/extensions.json", contents::vscode_extensions),
    TemplateUnit::param("README.md", contents::README_MD),
    TemplateUnit::text(".gitignore", contents::GITIGNORE),
];

/// Fallback entry source for members without a bespoke one
pub const DEFAULT_ENTRY: TemplateUnit = TemplateUnit::param("src/index.ts", contents::DEFAULT_ENTRY_TS);

fn units_for(key: TemplateKey) -> &'static [TemplateUnit] {
    CATALOG
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, units)| *units)
        .unwrap_or(&[])
}

/// Ordered template units for a member. Never fails; unknown combinations
/// yield an empty sequence.
pub fn lookup_templates(
    kind: MemberKind,
    member_type: MemberType,
    reserved: Option<ReservedPackage>,
) -> Vec<TemplateUnit> {
    let mut units: Vec<TemplateUnit> = units_for(key(kind, member_type, None)).to_vec();

    if reserved.is_some() {
        for unit in units_for(key(kind, member_type, reserved)) {
            match units.iter_mut().find(|u| u.target == unit.target) {
                Some(existing) => *existing = *unit,
                None => units.push(*unit),
            }
        }
    }

    units
}

/// Units written at the workspace root
pub fn workspace_templates() -> &'static [TemplateUnit] {
    WORKSPACE_ROOT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(units: &[TemplateUnit]) -> Vec<&'static str> {
        units.iter().map(|u| u.target).collect()
    }

    #[test]
    fn test_generic_library_package() {
        let units = lookup_templates(SharedPackage, LibraryPackage, None);
        assert_eq!(
            targets(&units),
            vec!["eslint.config.js", "tsconfig.json", "tsup.config.ts"]
        );
    }

    #[test]
    fn test_reserved_name_extends_generic_units() {
        let units = lookup_templates(SharedPackage, LibraryPackage, Some(ReservedPackage::Database));
        let names = targets(&units);
        assert!(names.starts_with(&["eslint.config.js", "tsconfig.json", "tsup.config.ts"]));
        assert!(names.contains(&"prisma/schema.prisma"));
        assert!(names.contains(&".env"));
    }

    #[test]
    fn test_config_packages_are_distinct() {
        let ts = lookup_templates(
            SharedPackage,
            ConfigPackage,
            Some(ReservedPackage::TypescriptConfig),
        );
        let lint = lookup_templates(
            SharedPackage,
            ConfigPackage,
            Some(ReservedPackage::EslintConfig),
        );
        assert_eq!(targets(&ts), vec!["base.json"]);
        assert_eq!(targets(&lint), vec!["index.js"]);
    }

    #[test]
    fn test_unknown_combination_is_empty() {
        assert!(lookup_templates(SharedPackage, WebFramework, None).is_empty());
        assert!(lookup_templates(SharedPackage, ConfigPackage, None).is_empty());
    }

    #[test]
    fn test_parameterized_substitution() {
        let ws = WorkspaceSpec::new("shop-app").unwrap();
        let ctx = TemplateContext::new(&ws, Some("worker")).unwrap();

        let compose = lookup_templates(SharedPackage, ConfigPackage, Some(ReservedPackage::Docker));
        assert!(compose[0].is_parameterized());
        match compose[0].render(&ctx) {
            RenderedContent::Text(text) => {
                assert!(text.contains("POSTGRES_DB: shop_app_dev"));
                assert!(!text.contains("{{"));
            }
            other => panic!("expected text, got {:?}", other),
        }

        assert_eq!(
            ctx.apply("{{member_name}} in {{workspace_name}} {{unknown}}"),
            "worker in shop-app {{unknown}}"
        );
    }
}
