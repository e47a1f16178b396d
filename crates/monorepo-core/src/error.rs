//! Error taxonomy for scaffolding runs
//!
//! Every variant is fatal to the current invocation. Nothing is retried and
//! nothing already written is rolled back; re-running the whole operation is
//! the recovery path.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Bad user input, e.g. an empty workspace or member name
    #[error("Invalid specification: {0}")]
    InvalidSpec(String),

    /// A member type tag or kind/type pairing the composer has no rules for
    #[error("Unsupported member type: {0}")]
    UnsupportedMemberType(String),

    /// Any I/O failure while materializing the target tree
    #[error("Failed to write {}: {source}", path.display())]
    FilesystemWriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An external collaborator exited non-zero or could not be spawned
    #[error("Command `{command}` failed: {status}")]
    ExternalCommandFailure { command: String, status: String },

    /// Member creation was requested outside a scaffolded workspace
    #[error(
        "Monorepo is not initialized at {}. Create the workspace first, then add apps or packages.",
        root.display()
    )]
    WorkspaceNotInitialized { root: PathBuf },

    /// The bundled template manifest could not be read or parsed
    #[error("Invalid template manifest {}: {message}", path.display())]
    TemplateManifest { path: PathBuf, message: String },
}

impl ScaffoldError {
    /// Wrap an I/O error with the path that caused it
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FilesystemWriteError {
            path: path.into(),
            source,
        }
    }
}
