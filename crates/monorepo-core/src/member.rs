//! Workspace and member specifications

use crate::error::{Result, ScaffoldError};
use crate::naming::{self, ResourceName};
use std::fmt;
use std::str::FromStr;

/// The workspace being scaffolded. Built once per run, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSpec {
    name: String,
    resource: ResourceName,
}

impl WorkspaceSpec {
    pub fn new(name: &str) -> Result<Self> {
        naming::validate_name("Workspace", name)?;
        let name = name.trim();
        let resource = naming::derive_resource_name(name)?;
        Ok(Self {
            name: name.to_string(),
            resource,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derived resource identifier shared by every generated file
    pub fn resource_name(&self) -> &ResourceName {
        &self.resource
    }
}

/// Where a member lives and which base manifest it starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Application,
    SharedPackage,
}

impl MemberKind {
    /// Workspace subdirectory, also used as the package scope
    pub fn area(&self) -> &'static str {
        match self {
            MemberKind::Application => "apps",
            MemberKind::SharedPackage => "packages",
        }
    }
}

/// What a member is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberType {
    /// Next.js application
    WebFramework,
    /// Plain Node.js service bundled with tsup
    NodeService,
    /// NestJS API
    ApiFramework,
    /// Buildable shared library
    LibraryPackage,
    /// Shared tooling configuration (lint, type-check, containers)
    ConfigPackage,
}

impl MemberType {
    pub fn display_name(&self) -> &'static str {
        match self {
            MemberType::WebFramework => "next",
            MemberType::NodeService => "node",
            MemberType::ApiFramework => "nest",
            MemberType::LibraryPackage => "package",
            MemberType::ConfigPackage => "config",
        }
    }

    /// The kind a member of this type belongs to when none is given
    pub fn default_kind(&self) -> MemberKind {
        match self {
            MemberType::WebFramework | MemberType::NodeService | MemberType::ApiFramework => {
                MemberKind::Application
            }
            MemberType::LibraryPackage | MemberType::ConfigPackage => MemberKind::SharedPackage,
        }
    }

    /// Entry source file every member of this type must have
    pub fn entry_file(&self) -> &'static str {
        match self {
            MemberType::WebFramework => "src/app/page.tsx",
            MemberType::ApiFramework => "src/main.ts",
            _ => "src/index.ts",
        }
    }

    /// Compiled entry point (without extension) for tsup-built members
    pub fn dist_entry(&self) -> &'static str {
        match self {
            MemberType::ApiFramework => "main",
            _ => "index",
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MemberType {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "next" | "web" => Ok(MemberType::WebFramework),
            "node" => Ok(MemberType::NodeService),
            "nest" | "api" => Ok(MemberType::ApiFramework),
            "package" | "library" => Ok(MemberType::LibraryPackage),
            "config" => Ok(MemberType::ConfigPackage),
            other => Err(ScaffoldError::UnsupportedMemberType(other.to_string())),
        }
    }
}

/// Shared package names whose identity, not just type, drives generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedPackage {
    Database,
    Queue,
    Types,
    EslintConfig,
    TypescriptConfig,
    Docker,
}

impl ReservedPackage {
    const NAMES: &'static [(&'static str, ReservedPackage)] = &[
        ("db", ReservedPackage::Database),
        ("database", ReservedPackage::Database),
        ("queue", ReservedPackage::Queue),
        ("types", ReservedPackage::Types),
        ("eslint-config", ReservedPackage::EslintConfig),
        ("typescript-config", ReservedPackage::TypescriptConfig),
        ("docker", ReservedPackage::Docker),
    ];

    /// Exact-name match; anything else is a generic package
    pub fn lookup(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(reserved, _)| *reserved == name)
            .map(|(_, package)| *package)
    }
}

/// One app or package to generate. The owning workspace is held by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSpec {
    pub name: String,
    pub kind: MemberKind,
    pub member_type: MemberType,
    pub workspace: String,
}

impl MemberSpec {
    pub fn new(
        name: &str,
        kind: MemberKind,
        member_type: MemberType,
        workspace: &WorkspaceSpec,
    ) -> Result<Self> {
        naming::validate_name("Member", name)?;
        Ok(Self {
            name: name.trim().to_string(),
            kind,
            member_type,
            workspace: workspace.name().to_string(),
        })
    }

    /// Member whose kind follows from its type
    pub fn of_type(name: &str, member_type: MemberType, workspace: &WorkspaceSpec) -> Result<Self> {
        Self::new(name, member_type.default_kind(), member_type, workspace)
    }

    /// Directory relative to the workspace root, e.g. `packages/db`
    pub fn relative_dir(&self) -> String {
        format!("{}/{}", self.kind.area(), self.name)
    }

    /// Scoped manifest name, e.g. `@packages/db`
    pub fn package_name(&self) -> String {
        naming::scoped_name(self.kind.area(), &self.name)
    }

    /// Reserved identity, only ever consulted for shared packages
    pub fn reserved(&self) -> Option<ReservedPackage> {
        match self.kind {
            MemberKind::SharedPackage => ReservedPackage::lookup(&self.name),
            MemberKind::Application => None,
        }
    }
}
