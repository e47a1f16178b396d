//! Manifest composition
//!
//! A manifest starts from the base for the member's kind and is refined by an
//! ordered rule list: kind default, then type rule, then name rule. Later
//! scalar writes win; map merges only add or replace keys. Two rules delete
//! on purpose: plain library packages drop the inherited `dev` watch script,
//! and Next.js apps drop the tsup/nodemon wiring they never use.

use super::document::{ManifestDocument, DEPENDENCY_FIELDS};
use crate::error::{Result, ScaffoldError};
use crate::member::{MemberKind, MemberSpec, MemberType, ReservedPackage, WorkspaceSpec};
use crate::naming::{self, ResourceName, WORKSPACE_RANGE};
use serde_json::{json, Value};

/// Shared libraries every application depends on, in declaration order
pub const SHARED_LIBRARIES: &[&str] = &["types", "db", "queue"];

const ESLINT_CONFIG: &str = "@packages/eslint-config";
const TYPESCRIPT_CONFIG: &str = "@packages/typescript-config";

// Third-party version ranges. Every rule reads from here so siblings agree.
const PRISMA: &str = "^6";
const BULLMQ: &str = "^5";
const IOREDIS: &str = "^5";
const NANOID: &str = "^5";
const FAKER: &str = "^9";
const NESTJS: &str = "^9";
const NEXT: &str = "^15";
const REACT: &str = "^19";

/// Inputs a rule may read
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub member: &'a MemberSpec,
    pub resource: &'a ResourceName,
}

/// A single composition step
pub type ManifestRule = fn(&mut ManifestDocument, &RuleContext<'_>);

/// Compose the manifest for `member`.
///
/// `siblings` are the manifests already composed in this run; any dependency
/// a sibling already declares is pinned to the sibling's range, and
/// references to a sibling package use the workspace protocol.
pub fn compose_manifest(
    member: &MemberSpec,
    resource: &ResourceName,
    siblings: &[ManifestDocument],
) -> Result<ManifestDocument> {
    let context = RuleContext { member, resource };

    let mut doc = base_manifest(member);
    for rule in rules_for(member)? {
        rule(&mut doc, &context);
    }
    align_with_siblings(&mut doc, siblings);

    Ok(doc)
}

/// Ordered rule list for a member: kind default, type rule, name rule
pub fn rules_for(member: &MemberSpec) -> Result<Vec<ManifestRule>> {
    check_pairing(member)?;

    let mut rules: Vec<ManifestRule> = Vec::new();

    if member.kind == MemberKind::Application {
        rules.push(application_defaults);
    }

    let type_rule: ManifestRule = match member.member_type {
        MemberType::WebFramework => web_framework,
        MemberType::NodeService => node_service,
        MemberType::ApiFramework => api_framework,
        MemberType::LibraryPackage => library_package,
        MemberType::ConfigPackage => config_package,
    };
    rules.push(type_rule);

    match (name_rule(member), member.member_type) {
        (Some(rule), _) => rules.push(rule),
        (None, MemberType::LibraryPackage) => rules.push(plain_library),
        (None, _) => {}
    }

    Ok(rules)
}

fn check_pairing(member: &MemberSpec) -> Result<()> {
    if member.kind != member.member_type.default_kind() {
        return Err(ScaffoldError::UnsupportedMemberType(format!(
            "'{}' cannot be created as {:?} '{}'",
            member.member_type, member.kind, member.name
        )));
    }
    Ok(())
}

/// Reserved-name table, consulted only for shared packages
fn name_rule(member: &MemberSpec) -> Option<ManifestRule> {
    const TABLE: &[(MemberType, ReservedPackage, ManifestRule)] = &[
        (MemberType::LibraryPackage, ReservedPackage::Database, database_package),
        (MemberType::LibraryPackage, ReservedPackage::Queue, queue_package),
        (MemberType::ConfigPackage, ReservedPackage::EslintConfig, eslint_config),
        (MemberType::ConfigPackage, ReservedPackage::TypescriptConfig, typescript_config),
        (MemberType::ConfigPackage, ReservedPackage::Docker, docker_package),
    ];

    let reserved = member.reserved()?;
    TABLE
        .iter()
        .find(|(ty, name, _)| *ty == member.member_type && *name == reserved)
        .map(|(_, _, rule)| *rule)
}

fn base_manifest(member: &MemberSpec) -> ManifestDocument {
    let mut doc = ManifestDocument::new();
    doc.set("name", member.package_name())
        .set("private", true)
        .set("type", "module")
        .set("version", "1.0.0");

    if member.member_type == MemberType::ConfigPackage {
        doc.merge("exports", empty())
            .merge("publishConfig", empty())
            .merge("scripts", empty())
            .merge("dependencies", empty())
            .merge("devDependencies", empty());
        return doc;
    }

    let entry = member.member_type.dist_entry();
    doc.set("main", format!("dist/{}.js", entry))
        .merge("exports", empty())
        .merge(
            "scripts",
            [
                ("build", "tsup --clean".to_string()),
                ("check-types", "tsc --noEmit".to_string()),
                ("dev", "tsup --watch & nodemon".to_string()),
                ("lint", "eslint .".to_string()),
                ("start", format!("node dist/{}", entry)),
            ],
        )
        .merge("dependencies", empty())
        .merge(
            "devDependencies",
            [
                (ESLINT_CONFIG, WORKSPACE_RANGE),
                (TYPESCRIPT_CONFIG, WORKSPACE_RANGE),
                ("@swc/core", "^1"),
                ("nodemon", "^3"),
                ("tsup", "^8"),
            ],
        )
        .set(
            "nodemonConfig",
            json!({
                "watch": ["dist"],
                "ext": "js",
                "exec": format!("node dist/{}.js", entry),
            }),
        );
    doc
}

fn empty() -> [(&'static str, Value); 0] {
    []
}

// ---------------------------------------------------------------------------
// Kind defaults
// ---------------------------------------------------------------------------

fn application_defaults(doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {
    doc.merge(
        "dependencies",
        SHARED_LIBRARIES
            .iter()
            .map(|lib| (naming::scoped_name("packages", lib), WORKSPACE_RANGE)),
    );
    doc.merge(
        "dependencies",
        [
            ("bullmq", BULLMQ),
            ("ioredis", IOREDIS),
            ("@prisma/client", PRISMA),
        ],
    );
}

// ---------------------------------------------------------------------------
// Type rules
// ---------------------------------------------------------------------------

fn web_framework(doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {
    doc.remove("main");
    doc.remove("nodemonConfig");
    for unused in ["@swc/core", "nodemon", "tsup"] {
        doc.remove_entry("devDependencies", unused);
    }
    doc.merge(
        "scripts",
        [
            ("build", "next build"),
            ("dev", "next dev --turbopack"),
            ("lint", "next lint"),
            ("start", "next start"),
        ],
    );
    doc.merge(
        "dependencies",
        [("next", NEXT), ("react", REACT), ("react-dom", REACT)],
    );
    doc.merge(
        "devDependencies",
        [
            ("@types/node", "^20"),
            ("@types/react", REACT),
            ("@types/react-dom", REACT),
            ("typescript", "^5"),
        ],
    );
}

fn node_service(doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {
    doc.merge("dependencies", [("@faker-js/faker", FAKER)]);
}

fn api_framework(doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {
    doc.merge(
        "dependencies",
        [
            ("@nestjs/core", NESTJS),
            ("@nestjs/common", NESTJS),
            ("@nestjs/platform-express", NESTJS),
            ("reflect-metadata", "^0.1.13"),
            ("rxjs", "^7"),
        ],
    );
}

fn library_package(doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {
    doc.set("sideEffects", false);
    doc.merge(
        "exports",
        [(
            ".",
            json!({
                "types": "./src/index.ts",
                "default": "./dist/index.js",
            }),
        )],
    );
}

fn config_package(_doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {}

// ---------------------------------------------------------------------------
// Name rules
// ---------------------------------------------------------------------------

fn database_package(doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {
    // The client module keeps a process-wide singleton
    doc.set("sideEffects", true);
    doc.merge(
        "dependencies",
        [
            ("@prisma/client", PRISMA),
            ("nanoid", NANOID),
            ("@faker-js/faker", FAKER),
        ],
    );
    doc.merge("devDependencies", [("prisma", PRISMA), ("tsx", "^4")]);
    doc.merge(
        "scripts",
        [
            ("build", "pnpm build:prisma && tsup --clean"),
            ("build:prisma", "prisma generate"),
            ("migrate", "prisma migrate"),
            ("push", "prisma db push"),
            ("seed", "tsx src/seed.ts"),
            ("studio", "prisma studio"),
        ],
    );
}

fn queue_package(doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {
    // Importing the module opens the Redis connection
    doc.set("sideEffects", true);
    doc.merge("dependencies", [("bullmq", BULLMQ), ("ioredis", IOREDIS)]);
}

fn plain_library(doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {
    doc.remove_entry("scripts", "dev");
}

fn eslint_config(doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {
    doc.merge(
        "devDependencies",
        [
            ("@eslint/js", "^9"),
            ("eslint", "^9"),
            ("globals", "^15"),
            ("typescript-eslint", "^8"),
        ],
    );
    doc.merge("exports", [(".", "./index.js")]);
}

fn typescript_config(doc: &mut ManifestDocument, _ctx: &RuleContext<'_>) {
    doc.merge("devDependencies", [("@tsconfig/node20", "^20.1.4")]);
    doc.merge("exports", [("./base.json", "./base.json")]);
    doc.merge("publishConfig", [("access", "public")]);
}

fn docker_package(doc: &mut ManifestDocument, ctx: &RuleContext<'_>) {
    doc.merge(
        "scripts",
        [
            ("dev", "docker compose up".to_string()),
            (
                "db:reset",
                "docker compose rm --force --stop postgres && docker compose up -d".to_string(),
            ),
            (
                "psql",
                format!(
                    "docker compose exec postgres psql -U postgres -d {}",
                    ctx.resource
                ),
            ),
        ],
    );
}

// ---------------------------------------------------------------------------
// Cross-member consistency
// ---------------------------------------------------------------------------

/// Pin every dependency to the range a sibling already uses
fn align_with_siblings(doc: &mut ManifestDocument, siblings: &[ManifestDocument]) {
    for field in DEPENDENCY_FIELDS {
        let Some(entries) = doc.entries(field) else {
            continue;
        };

        let pinned: Vec<(String, String)> = entries
            .iter()
            .filter_map(|(package, range)| {
                let current = range.as_str()?;
                let wanted = sibling_range(siblings, package)?;
                (current != wanted).then(|| (package.clone(), wanted))
            })
            .collect();

        if !pinned.is_empty() {
            doc.merge(field, pinned);
        }
    }
}

fn sibling_range(siblings: &[ManifestDocument], package: &str) -> Option<String> {
    if siblings.iter().any(|s| s.get_str("name") == Some(package)) {
        return Some(WORKSPACE_RANGE.to_string());
    }
    siblings
        .iter()
        .find_map(|s| s.dependency_range(package))
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Workspace root
// ---------------------------------------------------------------------------

/// Root manifest with aggregate scripts
pub fn compose_root_manifest(workspace: &WorkspaceSpec, pnpm_version: &str) -> ManifestDocument {
    let mut doc = ManifestDocument::new();
    doc.set("name", workspace.name())
        .set("private", true)
        .set("version", "1.0.0")
        .set("type", "module")
        .set("packageManager", format!("pnpm@{}", pnpm_version))
        .merge(
            "devDependencies",
            [("prettier", "^3"), ("turbo", "^2"), ("typescript", "^5")],
        )
        .merge(
            "scripts",
            [
                ("build", "turbo run build"),
                ("check-types", "turbo run check-types"),
                ("db", "pnpm --filter @packages/db"),
                ("db:init", "pnpm db migrate dev --name init"),
                ("db:reset", "pnpm docker db:reset && pnpm db migrate dev"),
                ("db:seed", "pnpm db seed"),
                ("dev", "turbo run dev"),
                ("docker", "pnpm --filter @packages/docker"),
                ("format", "prettier --write ."),
                ("lint", "turbo run lint"),
                ("test", "turbo run test"),
            ],
        )
        .merge("engines", [("node", ">=18")]);
    doc
}
