use anyhow::Result;
use clap::{ArgGroup, Parser};
use monorepo_core::tui::{self, CreateArgs};
use monorepo_core::{MemberType, SystemRunner, TurboPreset};
use std::path::PathBuf;

/// CLI version - used for template compatibility checking
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "turbo-ts-cli")]
#[command(about = "Create a Turbo + pnpm TypeScript monorepo, or add apps and packages to one")]
#[command(version)]
#[command(group(ArgGroup::new("member").args(["next", "node", "nest", "package"])))]
pub struct Args {
    /// Workspace name, or the member name when a member flag is given
    pub name: Option<String>,

    /// Add a Next.js app to the current workspace
    #[arg(long)]
    pub next: bool,

    /// Add a Node service to the current workspace
    #[arg(long)]
    pub node: bool,

    /// Add a NestJS API to the current workspace
    #[arg(long)]
    pub nest: bool,

    /// Add a shared package to the current workspace
    #[arg(long)]
    pub package: bool,

    /// Workspace the new member belongs to (defaults to the one recorded in .monorepo)
    #[arg(short, long)]
    pub workspace: Option<String>,

    /// Parent directory for a new workspace, or the workspace root when adding a member
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Local directory to use for bundled templates (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Do not run create-next-app or query pnpm
    #[arg(long = "skip-external")]
    pub skip_external: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl Args {
    fn member_type(&self) -> Option<MemberType> {
        if self.next {
            Some(MemberType::WebFramework)
        } else if self.node {
            Some(MemberType::NodeService)
        } else if self.nest {
            Some(MemberType::ApiFramework)
        } else if self.package {
            Some(MemberType::LibraryPackage)
        } else {
            None
        }
    }

    fn into_create_args(self) -> CreateArgs {
        CreateArgs {
            member_type: self.member_type(),
            name: self.name,
            workspace: self.workspace,
            directory: self.dir,
            template_dir: self.template_dir,
            skip_external: self.skip_external,
            yes: self.yes,
        }
    }
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let result = tui::run(&TurboPreset, &SystemRunner, args.into_create_args(), CLI_VERSION);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
