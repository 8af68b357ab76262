//! Command handlers. Each submodule owns one subcommand end-to-end:
//! args → generator schemas → tree → commit → tasks.

pub mod completions;
pub mod generate;
pub mod init;
pub mod list;

use std::path::PathBuf;

use crate::cli::GlobalArgs;
use crate::error::{CliError, CliResult};

/// Resolve the workspace root: `--root` when given, else the current
/// directory.
pub fn workspace_root(global: &GlobalArgs) -> CliResult<PathBuf> {
    let root = match &global.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(CliError::WorkspaceNotFound {
            path: root.display().to_string(),
        });
    }
    Ok(root)
}
