//! Workspace orchestration
//!
//! Two phases. Planning is pure: the resolver and composer produce every
//! document in memory. Materialization then writes the plan member by member,
//! runs external generators, and finally overlays bundled starter sources.
//! All paths are explicit; the process working directory is never changed.

use crate::compose::{self, ManifestDocument};
use crate::error::{Result, ScaffoldError};
use crate::materialize::{self, PlannedFile};
use crate::member::{MemberKind, MemberSpec, MemberType, WorkspaceSpec};
use crate::preset::WorkspacePreset;
use crate::runtime::{self, CommandRunner};
use crate::templates::{self, registry, OverlayManifest, TemplateContext};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Behaviour switches for a scaffolding run
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Bundled template directory; resolved from the preset when `None`
    pub template_dir: Option<PathBuf>,

    /// Run third-party generators (e.g. create-next-app)
    pub run_external: bool,

    /// Ask the package manager for its version instead of using the fallback
    pub detect_package_manager: bool,

    /// Skip the overlay phase entirely
    pub skip_overlays: bool,

    /// Version compared against the bundled template manifest
    pub cli_version: String,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            template_dir: None,
            run_external: true,
            detect_package_manager: true,
            skip_overlays: false,
            cli_version: crate::DEFAULT_CLI_VERSION.to_string(),
        }
    }
}

/// Everything one member will consist of
#[derive(Debug, Clone)]
pub struct MemberPlan {
    pub member: MemberSpec,
    pub manifest: ManifestDocument,
    /// Files relative to the member directory, excluding `package.json`
    pub files: Vec<PlannedFile>,
}

impl MemberPlan {
    pub fn file(&self, path: &str) -> Option<&PlannedFile> {
        self.files.iter().find(|f| f.path == Path::new(path))
    }
}

/// The full document set for a workspace
#[derive(Debug, Clone)]
pub struct WorkspacePlan {
    pub workspace: WorkspaceSpec,
    pub root_manifest: ManifestDocument,
    /// Files relative to the workspace root, excluding `package.json`
    pub root_files: Vec<PlannedFile>,
    /// In creation order
    pub members: Vec<MemberPlan>,
}

impl WorkspacePlan {
    pub fn member(&self, name: &str) -> Option<&MemberPlan> {
        self.members.iter().find(|p| p.member.name == name)
    }
}

/// Plan one member. `siblings` are manifests of members planned earlier.
pub fn plan_member(
    member: &MemberSpec,
    workspace: &WorkspaceSpec,
    siblings: &[ManifestDocument],
) -> Result<MemberPlan> {
    let manifest = compose::compose_manifest(member, workspace.resource_name(), siblings)?;
    let context = TemplateContext::new(workspace, Some(&member.name))?;

    let mut files: Vec<PlannedFile> =
        templates::lookup_templates(member.kind, member.member_type, member.reserved())
            .iter()
            .map(|unit| PlannedFile::new(unit.target, unit.render(&context)))
            .collect();

    let entry = member.member_type.entry_file();
    if !files.iter().any(|f| f.path == Path::new(entry)) {
        let fallback = registry::DEFAULT_ENTRY;
        files.push(PlannedFile::new(entry, fallback.render(&context)));
    }

    Ok(MemberPlan {
        member: member.clone(),
        manifest,
        files,
    })
}

/// Canonical members in creation order: base packages, helpers, default apps
pub fn canonical_members<P: WorkspacePreset>(
    preset: &P,
    workspace: &WorkspaceSpec,
) -> Result<Vec<MemberSpec>> {
    let base = preset
        .base_packages()
        .iter()
        .map(|name| MemberSpec::of_type(name, MemberType::ConfigPackage, workspace));
    let helpers = preset
        .helper_packages()
        .iter()
        .map(|name| MemberSpec::of_type(name, MemberType::LibraryPackage, workspace));
    let apps = preset
        .default_apps()
        .iter()
        .map(|(name, member_type)| MemberSpec::of_type(name, *member_type, workspace));

    base.chain(helpers).chain(apps).collect()
}

/// Plan a whole workspace without touching the filesystem
pub fn plan_workspace<P: WorkspacePreset>(
    preset: &P,
    workspace: &WorkspaceSpec,
    package_manager_version: &str,
) -> Result<WorkspacePlan> {
    let context = TemplateContext::new(workspace, None)?;

    let root_files = templates::workspace_templates()
        .iter()
        .map(|unit| PlannedFile::new(unit.target, unit.render(&context)))
        .collect();

    let mut members: Vec<MemberPlan> = Vec::new();
    let mut manifests: Vec<ManifestDocument> = Vec::new();
    for member in canonical_members(preset, workspace)? {
        let plan = plan_member(&member, workspace, &manifests)?;
        manifests.push(plan.manifest.clone());
        members.push(plan);
    }

    Ok(WorkspacePlan {
        workspace: workspace.clone(),
        root_manifest: compose::compose_root_manifest(workspace, package_manager_version),
        root_files,
        members,
    })
}

/// Drives scaffolding against the real filesystem
pub struct Scaffolder<'a, P: WorkspacePreset, R: CommandRunner> {
    preset: &'a P,
    runner: &'a R,
    options: ScaffoldOptions,
}

impl<'a, P: WorkspacePreset, R: CommandRunner> Scaffolder<'a, P, R> {
    pub fn new(preset: &'a P, runner: &'a R, options: ScaffoldOptions) -> Self {
        Self {
            preset,
            runner,
            options,
        }
    }

    /// Create workspace `workspace_name` under `parent`; returns its root
    pub fn scaffold_workspace(&self, parent: &Path, workspace_name: &str) -> Result<PathBuf> {
        let workspace = WorkspaceSpec::new(workspace_name)?;
        let root = parent.join(workspace.name());

        println!(
            "{}",
            format!("Initializing {}: {}", self.preset.display_name(), workspace.name())
                .cyan()
                .bold()
        );
        println!("  DB name: {}", workspace.resource_name());

        let pm_version = self.package_manager_version();
        let plan = plan_workspace(self.preset, &workspace, &pm_version)?;

        self.materialize_root(&root, &plan)?;
        for member_plan in &plan.members {
            self.materialize_member(&root, member_plan)?;
        }
        self.import_overlays(&root)?;

        materialize::write_text(&root.join(self.preset.marker_file()), workspace.name())?;

        println!();
        println!(
            "{} '{}' in {}",
            "Initialized".green().bold(),
            workspace.name(),
            root.display()
        );

        Ok(root)
    }

    /// Create one member inside the workspace rooted at `root`
    pub fn scaffold_member(
        &self,
        root: &Path,
        member: &MemberSpec,
        workspace: &WorkspaceSpec,
    ) -> Result<()> {
        let siblings = load_sibling_manifests(root, member)?;
        let plan = plan_member(member, workspace, &siblings)?;
        self.materialize_member(root, &plan)
    }

    /// Standalone member creation in an existing workspace.
    ///
    /// Requires the marker written by [`Self::scaffold_workspace`]; the owning
    /// workspace name comes from `workspace_name` or, failing that, the marker.
    pub fn add_member(
        &self,
        root: &Path,
        name: &str,
        member_type: MemberType,
        workspace_name: Option<&str>,
    ) -> Result<MemberSpec> {
        let recorded = read_marker(root, self.preset.marker_file())?;
        let workspace_name = match workspace_name {
            Some(name) => name.to_string(),
            None => recorded,
        };
        let workspace = WorkspaceSpec::new(&workspace_name)?;
        let member = MemberSpec::of_type(name, member_type, &workspace)?;

        println!(
            "{}",
            format!("Adding {} ({}) to {}", member.name, member_type, workspace.name())
                .cyan()
                .bold()
        );
        self.scaffold_member(root, &member, &workspace)?;

        Ok(member)
    }

    fn package_manager_version(&self) -> String {
        let fallback = self.preset.fallback_package_manager_version();
        if self.options.detect_package_manager {
            runtime::detect_version(self.runner, self.preset.package_manager(), fallback)
        } else {
            fallback.to_string()
        }
    }

    fn materialize_root(&self, root: &Path, plan: &WorkspacePlan) -> Result<()> {
        materialize::ensure_dir(root)?;
        materialize::ensure_dir(&root.join(MemberKind::SharedPackage.area()))?;
        materialize::ensure_dir(&root.join(MemberKind::Application.area()))?;

        for file in &plan.root_files {
            materialize::write_planned(root, file)?;
        }
        materialize::write_structured(&root.join("package.json"), &plan.root_manifest)
    }

    fn materialize_member(&self, root: &Path, plan: &MemberPlan) -> Result<()> {
        let member = &plan.member;
        let dir = root.join(member.relative_dir());

        print!("  {} {}...", "->".blue(), member.relative_dir());

        let result = self.write_member(&dir, plan);
        match &result {
            Ok(()) => println!(" {} ({} files)", "done".green(), plan.files.len() + 1),
            Err(_) => println!(" {}", "failed".red()),
        }
        result
    }

    fn write_member(&self, dir: &Path, plan: &MemberPlan) -> Result<()> {
        if self.options.run_external && !dir.exists() {
            if let Some(command) = self.preset.external_generator(plan.member.member_type, dir) {
                if let Some(cwd) = &command.cwd {
                    materialize::ensure_dir(cwd)?;
                }
                println!();
                println!("{} {}", "Running:".dimmed(), command.to_string().yellow());
                self.runner.run(&command)?;
                materialize::remove_dir_if_exists(&dir.join(".git"))?;
            }
        }

        materialize::ensure_dir(dir)?;
        materialize::ensure_dir(&dir.join("src"))?;
        for file in &plan.files {
            materialize::write_planned(dir, file)?;
        }
        materialize::write_structured(&dir.join("package.json"), &plan.manifest)
    }

    fn import_overlays(&self, root: &Path) -> Result<()> {
        if self.options.skip_overlays {
            return Ok(());
        }
        let Some(template_dir) =
            templates::resolve_template_dir(self.preset, self.options.template_dir.as_deref())
        else {
            eprintln!(
                "{} No bundled templates found; skipping starter sources",
                "Warning:".yellow()
            );
            return Ok(());
        };

        let manifest = OverlayManifest::load(&template_dir)?;
        if let Some(warning) =
            templates::check_compatibility(&self.options.cli_version, &manifest.version)
        {
            eprintln!("{} {}", "Warning:".yellow(), warning);
        }

        let report = templates::apply_overlays(&template_dir, &manifest, root)?;
        for skipped in &report.skipped {
            eprintln!("{} Skipped overlay {}", "Warning:".yellow(), skipped);
        }
        println!(
            "  {} {} starter file(s) from {}",
            "->".blue(),
            report.copied.len(),
            template_dir.display()
        );
        Ok(())
    }
}

fn read_marker(root: &Path, marker_file: &str) -> Result<String> {
    let path = root.join(marker_file);
    if !path.is_file() {
        return Err(ScaffoldError::WorkspaceNotInitialized {
            root: root.to_path_buf(),
        });
    }
    let content = fs::read_to_string(&path).map_err(|e| ScaffoldError::write(&path, e))?;
    Ok(content.trim().to_string())
}

/// Manifests of every other member already on disk
fn load_sibling_manifests(root: &Path, member: &MemberSpec) -> Result<Vec<ManifestDocument>> {
    let own_dir = root.join(member.relative_dir());
    let mut siblings = Vec::new();

    for area in [MemberKind::SharedPackage.area(), MemberKind::Application.area()] {
        let area_dir = root.join(area);
        let Ok(entries) = fs::read_dir(&area_dir) else {
            continue;
        };
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.is_dir() && *p != own_dir)
            .collect();
        dirs.sort();

        for dir in dirs {
            let manifest_path = dir.join("package.json");
            let Ok(content) = fs::read_to_string(&manifest_path) else {
                continue;
            };
            // Hand-edited or foreign manifests are not ours to align with
            if let Ok(doc) = serde_json::from_str::<ManifestDocument>(&content) {
                siblings.push(doc);
            }
        }
    }

    Ok(siblings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::WORKSPACE_RANGE;
    use crate::preset::TurboPreset;
    use crate::runtime::command::testing::RecordingRunner;
    use crate::templates::RenderedContent;
    use serde_json::Value;
    use tempfile::TempDir;

    fn offline() -> ScaffoldOptions {
        ScaffoldOptions {
            template_dir: None,
            run_external: false,
            detect_package_manager: false,
            skip_overlays: true,
            ..ScaffoldOptions::default()
        }
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn text(file: &PlannedFile) -> &str {
        match &file.content {
            RenderedContent::Text(t) => t,
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_order_and_contents() {
        let ws = WorkspaceSpec::new("shop-app").unwrap();
        let plan = plan_workspace(&TurboPreset, &ws, "9.15.4").unwrap();

        let order: Vec<_> = plan.members.iter().map(|p| p.member.name.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "eslint-config",
                "typescript-config",
                "docker",
                "db",
                "types",
                "queue",
                "web",
                "worker",
                "api"
            ]
        );

        assert_eq!(plan.root_files[0].path, Path::new("pnpm-workspace.yaml"));
        let yaml = text(&plan.root_files[0]);
        assert!(yaml.contains("apps/*"));
        assert!(yaml.contains("packages/*"));
    }

    #[test]
    fn test_every_member_has_an_entry_source() {
        let ws = WorkspaceSpec::new("shop-app").unwrap();
        let plan = plan_workspace(&TurboPreset, &ws, "9.15.4").unwrap();
        for member in &plan.members {
            let entry = member.member.member_type.entry_file();
            assert!(member.file(entry).is_some(), "{} lacks {}", member.member.name, entry);
        }

        let types = plan.member("types").unwrap();
        assert!(text(types.file("src/index.ts").unwrap()).contains("UserSummary"));
        let docker = plan.member("docker").unwrap();
        assert!(text(docker.file("src/index.ts").unwrap()).contains("Welcome to docker"));
    }

    #[test]
    fn test_resource_name_is_identical_everywhere() {
        let ws = WorkspaceSpec::new("shop-app").unwrap();
        let plan = plan_workspace(&TurboPreset, &ws, "9.15.4").unwrap();

        let db_env = text(plan.member("db").unwrap().file(".env").unwrap());
        let web_env = text(plan.member("web").unwrap().file(".env").unwrap());
        let compose = text(plan.member("docker").unwrap().file("compose.yml").unwrap());

        assert!(db_env.contains("/shop_app_dev?schema=public"));
        assert_eq!(db_env, web_env);
        assert!(compose.contains("POSTGRES_DB: shop_app_dev"));
    }

    #[test]
    fn test_scaffold_workspace_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, offline());

        let root = scaffolder.scaffold_workspace(tmp.path(), "shop-app").unwrap();
        assert_eq!(root, tmp.path().join("shop-app"));

        let db = read_json(&root.join("packages/db/package.json"));
        assert_eq!(db["name"], "@packages/db");
        assert_eq!(db["devDependencies"]["prisma"], "^6");
        let env = fs::read_to_string(root.join("packages/db/.env")).unwrap();
        assert!(env.contains("shop_app_dev"));

        let web = read_json(&root.join("apps/web/package.json"));
        for lib in ["@packages/types", "@packages/db", "@packages/queue"] {
            assert_eq!(web["dependencies"][lib], WORKSPACE_RANGE);
        }

        let root_manifest = read_json(&root.join("package.json"));
        assert_eq!(root_manifest["packageManager"], "pnpm@9.15.4");
        assert!(root.join("pnpm-workspace.yaml").is_file());
        assert!(root.join(".vscode/settings.json").is_file());
        assert!(root.join("apps/api/src/main.ts").is_file());
        assert_eq!(
            fs::read_to_string(root.join(".monorepo")).unwrap(),
            "shop-app\n"
        );

        // Offline run never shells out
        assert!(runner.calls.borrow().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_generated_files_are_not_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;

        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("plain");
        fs::write(&plain, "x").unwrap();

        let runner = RecordingRunner::default();
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, offline());
        let root = scaffolder.scaffold_workspace(tmp.path(), "shop-app").unwrap();

        for file in ["package.json", "apps/web/package.json", "packages/db/.env"] {
            assert_eq!(mode(&root.join(file)), mode(&plain), "{}", file);
        }
    }

    #[test]
    fn test_rerun_keeps_foreign_files_and_rewrites_owned_ones() {
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, offline());
        let root = scaffolder.scaffold_workspace(tmp.path(), "shop-app").unwrap();

        let notes = root.join("apps/web/NOTES.md");
        fs::write(&notes, "mine").unwrap();
        let manifest = root.join("packages/queue/package.json");
        fs::write(&manifest, "{}").unwrap();
        let before = fs::read_to_string(root.join("turbo.json")).unwrap();

        scaffolder.scaffold_workspace(tmp.path(), "shop-app").unwrap();

        assert_eq!(fs::read_to_string(&notes).unwrap(), "mine");
        assert_eq!(read_json(&manifest)["name"], "@packages/queue");
        assert_eq!(fs::read_to_string(root.join("turbo.json")).unwrap(), before);
    }

    #[test]
    fn test_external_generator_runs_once_for_web() {
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::with_output("10.0.0");
        let options = ScaffoldOptions {
            run_external: true,
            detect_package_manager: true,
            ..offline()
        };
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, options);
        let root = scaffolder.scaffold_workspace(tmp.path(), "shop-app").unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].to_string(), "pnpm --version");
        assert!(calls[1].to_string().contains("create-next-app@latest web"));
        assert_eq!(calls[1].cwd.as_deref(), Some(root.join("apps").as_path()));
        assert_eq!(
            read_json(&root.join("package.json"))["packageManager"],
            "pnpm@10.0.0"
        );
    }

    #[test]
    fn test_external_failure_aborts_run() {
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::failing();
        let options = ScaffoldOptions {
            run_external: true,
            ..offline()
        };
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, options);

        let err = scaffolder.scaffold_workspace(tmp.path(), "shop-app").unwrap_err();
        assert!(matches!(err, ScaffoldError::ExternalCommandFailure { .. }));
        // Members before the web app are left in place for inspection
        assert!(tmp.path().join("shop-app/packages/queue/package.json").is_file());
        assert!(!tmp.path().join("shop-app/apps/worker").exists());
        assert!(!tmp.path().join("shop-app/.monorepo").exists());
    }

    #[test]
    fn test_add_member_requires_marker() {
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, offline());

        let err = scaffolder
            .add_member(tmp.path(), "billing", MemberType::NodeService, None)
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::WorkspaceNotInitialized { .. }));
    }

    #[test]
    fn test_add_member_uses_marker_workspace() {
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, offline());
        let root = scaffolder.scaffold_workspace(tmp.path(), "shop-app").unwrap();

        let member = scaffolder
            .add_member(&root, "database", MemberType::LibraryPackage, None)
            .unwrap();
        assert_eq!(member.workspace, "shop-app");

        let env = fs::read_to_string(root.join("packages/database/.env")).unwrap();
        assert!(env.contains("shop_app_dev"));
        let manifest = read_json(&root.join("packages/database/package.json"));
        assert_eq!(manifest["name"], "@packages/database");
        assert_eq!(manifest["devDependencies"]["prisma"], "^6");
    }

    #[test]
    fn test_added_member_aligns_with_siblings_on_disk() {
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, offline());
        let root = scaffolder.scaffold_workspace(tmp.path(), "shop-app").unwrap();

        // Someone bumped bullmq in the queue package
        let queue_path = root.join("packages/queue/package.json");
        let mut queue = read_json(&queue_path);
        queue["dependencies"]["bullmq"] = Value::from("^5.4");
        materialize::write_structured(&queue_path, &queue).unwrap();

        scaffolder
            .add_member(&root, "mailer", MemberType::NodeService, None)
            .unwrap();
        let mailer = read_json(&root.join("apps/mailer/package.json"));
        assert_eq!(mailer["dependencies"]["bullmq"], "^5.4");
    }

    #[test]
    fn test_overlays_add_sources_without_touching_manifest() {
        let tmp = TempDir::new().unwrap();
        let templates_dir = tmp.path().join("templates");
        fs::create_dir_all(templates_dir.join("nest/src/products")).unwrap();
        fs::write(
            templates_dir.join("template.yaml"),
            "version: \"0.0.1\"\noverlays:\n  - template: nest\n    area: apps\n    member: api\n",
        )
        .unwrap();
        fs::write(
            templates_dir.join("nest/src/products/products.service.ts"),
            "export class ProductsService {}",
        )
        .unwrap();
        fs::write(templates_dir.join("nest/package.json"), "{}").unwrap();

        let runner = RecordingRunner::default();
        let options = ScaffoldOptions {
            template_dir: Some(templates_dir),
            skip_overlays: false,
            ..offline()
        };
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, options);
        let root = scaffolder.scaffold_workspace(&tmp.path().join("out"), "shop").unwrap();

        assert!(root.join("apps/api/src/products/products.service.ts").is_file());
        assert_eq!(read_json(&root.join("apps/api/package.json"))["name"], "@apps/api");
    }

    #[test]
    fn test_bundled_templates_apply_cleanly() {
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates");
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let options = ScaffoldOptions {
            template_dir: Some(bundled),
            skip_overlays: false,
            ..offline()
        };
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, options);
        let root = scaffolder.scaffold_workspace(tmp.path(), "shop-app").unwrap();

        assert!(root.join("packages/db/src/seed.ts").is_file());
        assert!(root.join("apps/worker/src/jobs/generate-posts.ts").is_file());
        let app_module = fs::read_to_string(root.join("apps/api/src/app.module.ts")).unwrap();
        assert!(app_module.contains("ProductsModule"));
    }

    #[test]
    fn test_workspace_name_cannot_escape_parent() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("inner");
        fs::create_dir(&parent).unwrap();
        let runner = RecordingRunner::default();
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, offline());

        assert!(matches!(
            scaffolder.scaffold_workspace(&parent, "../escaped"),
            Err(ScaffoldError::InvalidSpec(_))
        ));
        assert!(!tmp.path().join("escaped").exists());
    }

    #[test]
    fn test_member_name_cannot_escape_area() {
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, offline());
        let root = scaffolder.scaffold_workspace(tmp.path(), "shop-app").unwrap();

        for name in ["../../../pwned", "a/b"] {
            assert!(matches!(
                scaffolder.add_member(&root, name, MemberType::NodeService, None),
                Err(ScaffoldError::InvalidSpec(_))
            ));
        }
        assert!(!tmp.path().join("pwned").exists());
        assert!(!root.join("apps/a").exists());
    }

    #[test]
    fn test_invalid_workspace_name_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let scaffolder = Scaffolder::new(&TurboPreset, &runner, offline());

        assert!(matches!(
            scaffolder.scaffold_workspace(tmp.path(), "  "),
            Err(ScaffoldError::InvalidSpec(_))
        ));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}
