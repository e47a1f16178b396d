//! External command collaborator
//!
//! The core only needs two capabilities: run a command with inherited stdio,
//! and run a command capturing its trimmed output. Any non-zero exit aborts.

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// A command line plus optional working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }

    fn failure(&self, status: impl fmt::Display) -> ScaffoldError {
        ScaffoldError::ExternalCommandFailure {
            command: self.to_string(),
            status: status.to_string(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Synchronous command execution
pub trait CommandRunner {
    /// Run with inherited stdio
    fn run(&self, command: &CommandSpec) -> Result<()>;

    /// Run and return stdout, trimmed
    fn run_with_output(&self, command: &CommandSpec) -> Result<String>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> Result<()> {
        let status = command
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| command.failure(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(command.failure(status))
        }
    }

    fn run_with_output(&self, command: &CommandSpec) -> Result<String> {
        let output = command
            .to_command()
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| command.failure(e))?;

        if !output.status.success() {
            return Err(command.failure(output.status));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
