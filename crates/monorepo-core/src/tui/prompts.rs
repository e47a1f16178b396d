//! Charm-style CLI prompts using cliclack

use crate::member::MemberType;
use crate::preset::WorkspacePreset;
use crate::runtime::CommandRunner;
use crate::workspace::{ScaffoldOptions, Scaffolder};
use crate::{naming, ScaffoldError};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Workspace name, or member name when `member_type` is set
    pub name: Option<String>,

    /// Add a single member of this type instead of creating a workspace
    pub member_type: Option<MemberType>,

    /// Owning workspace name for a standalone member (defaults to the marker)
    pub workspace: Option<String>,

    /// Parent directory for a new workspace, or the workspace root for a member
    pub directory: Option<PathBuf>,

    /// Local directory to use for bundled templates
    pub template_dir: Option<PathBuf>,

    /// Skip third-party generators and package manager detection
    pub skip_external: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

enum Action {
    Workspace,
    Member(MemberType),
}

/// Run the CLI with interactive prompts
pub fn run<P: WorkspacePreset, R: CommandRunner>(
    preset: &P,
    runner: &R,
    args: CreateArgs,
    cli_version: &str,
) -> Result<()> {
    cliclack::intro(preset.display_name())?;

    let directory = resolve_directory(&args)?;
    let action = select_action(preset, &args, &directory)?;

    if let Some(path) = &args.template_dir {
        cliclack::log::info(format!("Using local templates from {}", path.display()))?;
    }
    if args.skip_external {
        cliclack::log::info("Skipping external generators")?;
    }

    let options = ScaffoldOptions {
        template_dir: args.template_dir.clone(),
        run_external: !args.skip_external,
        detect_package_manager: !args.skip_external,
        skip_overlays: false,
        cli_version: cli_version.to_string(),
    };
    let scaffolder = Scaffolder::new(preset, runner, options);

    match action {
        Action::Workspace => {
            let name = select_name("Workspace name", "my-monorepo", &args)?;
            confirm_target(&directory.join(&name), &args)?;

            let root = scaffolder.scaffold_workspace(&directory, &name)?;
            print_next_steps(preset, &root)?;
        }
        Action::Member(member_type) => {
            let name = select_name(
                &format!("Name for the new {} member", member_type),
                member_type.display_name(),
                &args,
            )?;

            match scaffolder.add_member(&directory, &name, member_type, args.workspace.as_deref()) {
                Ok(member) => {
                    cliclack::outro(format!(
                        "Created {} in {}",
                        member.package_name(),
                        member.relative_dir()
                    ))?;
                }
                Err(e @ ScaffoldError::WorkspaceNotInitialized { .. }) => {
                    cliclack::log::error(e.to_string())?;
                    anyhow::bail!("Run {} without a member type first.", preset.name());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn resolve_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }
    Ok(path)
}

/// Decide between a new workspace and a new member.
///
/// Inside an initialized workspace without an explicit type, ask.
fn select_action<P: WorkspacePreset>(
    preset: &P,
    args: &CreateArgs,
    directory: &Path,
) -> Result<Action> {
    if let Some(member_type) = args.member_type {
        return Ok(Action::Member(member_type));
    }

    let initialized = directory.join(preset.marker_file()).is_file();
    if !initialized || args.yes {
        return Ok(Action::Workspace);
    }

    cliclack::log::info(format!("Found an existing workspace in {}", directory.display()))?;

    let choice: &str = cliclack::select("What would you like to create?")
        .item("next", "Next.js app", "apps/")
        .item("node", "Node service", "apps/")
        .item("nest", "NestJS API", "apps/")
        .item("package", "Shared package", "packages/")
        .item("workspace", "A new workspace inside this one", "")
        .interact()?;

    if choice == "workspace" {
        return Ok(Action::Workspace);
    }
    Ok(Action::Member(choice.parse()?))
}

fn select_name(prompt: &str, default: &str, args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        naming::validate_name("Name", name)?;
        cliclack::log::info(format!("Using name: {}", name.trim()))?;
        return Ok(name.trim().to_string());
    }

    if args.yes {
        cliclack::log::info(format!("Using name: {} (--yes mode)", default))?;
        return Ok(default.to_string());
    }

    let input: String = cliclack::input(prompt)
        .placeholder(default)
        .default_input(default)
        .validate(|input: &String| {
            naming::validate_name("Name", input).map_err(|e| e.to_string())
        })
        .interact()?;

    Ok(input.trim().to_string())
}

fn confirm_target(target: &Path, args: &CreateArgs) -> Result<()> {
    if !target.is_dir() {
        return Ok(());
    }
    let Ok(entries) = std::fs::read_dir(target) else {
        return Ok(());
    };
    let count = entries.count();
    if count == 0 {
        return Ok(());
    }

    cliclack::log::warning(format!(
        "{} already has {} items; generated files will be overwritten",
        target.display(),
        count
    ))?;

    // Auto-confirm with --yes flag
    let confirm = if args.yes {
        true
    } else {
        cliclack::confirm("Continue anyway?")
            .initial_value(true)
            .interact()?
    };

    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }
    Ok(())
}

fn print_next_steps<P: WorkspacePreset>(preset: &P, root: &Path) -> Result<()> {
    let steps = preset.next_steps(root);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
