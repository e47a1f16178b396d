//! External collaborators
//!
//! This module provides:
//! - Synchronous command execution (inherited stdio or captured output)
//! - Package manager version detection

pub mod command;
pub mod package_manager;

pub use command::{CommandRunner, CommandSpec, SystemRunner};
pub use package_manager::detect_version;
