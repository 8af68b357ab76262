//! Application layer errors.
//!
//! These represent failures while reading or mutating the workspace, not
//! input validation — that is `DomainError` in `crate::domain`.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors raised by the tree, the registry and the generator runtime.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// A project was referenced by a name the registry does not know.
    #[error("project '{name}' not found in the workspace")]
    ProjectNotFound { name: String },

    /// A file was read that exists in neither the overlay nor the source.
    #[error("no file at '{path}' in the workspace tree")]
    PathNotFound { path: Utf8PathBuf },

    /// A project with this name already exists.
    #[error("project '{name}' already exists in the workspace")]
    ProjectAlreadyExists { name: String },

    /// Another project already claims this root directory.
    #[error("root '{root}' is already used by project '{owner}'")]
    RootAlreadyUsed { root: Utf8PathBuf, owner: String },

    /// The path-mapping manifest already maps this import path.
    #[error("import path '{import_path}' is already mapped in tsconfig.base.json")]
    PathMappingExists { import_path: String },

    /// A manifest file exists but does not parse into the expected shape.
    #[error("malformed manifest at '{path}': {reason}")]
    MalformedManifest { path: String, reason: String },

    /// The underlying tree source failed (I/O, poisoned lock, ...).
    #[error("workspace source error at '{path}': {reason}")]
    Source { path: String, reason: String },

    /// An optional capability (test runner, linter, ...) has no provider.
    #[error("capability '{key}' is not available")]
    CapabilityUnavailable { key: String },
}

impl WorkspaceError {
    /// User-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectNotFound { name } => vec![
                format!("No project named '{name}' exists"),
                "List known projects with: mosaic list".into(),
            ],
            Self::PathNotFound { path } => {
                vec![format!("Expected a file at '{path}' — was it generated?")]
            }
            Self::ProjectAlreadyExists { name } => vec![
                format!("A project named '{name}' is already configured"),
                "Pick a different name or remove the existing project".into(),
            ],
            Self::RootAlreadyUsed { root, owner } => vec![
                format!("'{root}' already belongs to '{owner}'"),
                "Use --directory to place the new project elsewhere".into(),
            ],
            Self::PathMappingExists { import_path } => vec![
                format!("'{import_path}' is already importable"),
                "Choose a different --import-path".into(),
            ],
            Self::MalformedManifest { path, .. } => vec![
                format!("Fix or regenerate '{path}'"),
            ],
            Self::Source { .. } => vec![
                "Check file permissions under the workspace root".into(),
            ],
            Self::CapabilityUnavailable { key } => vec![
                format!("No provider is registered for '{key}'"),
                "Pass --linter none / --unit-test-runner none to skip it".into(),
            ],
        }
    }

    /// Error category for display and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectNotFound { .. }
            | Self::PathNotFound { .. }
            | Self::CapabilityUnavailable { .. } => ErrorCategory::NotFound,
            Self::ProjectAlreadyExists { .. }
            | Self::RootAlreadyUsed { .. }
            | Self::PathMappingExists { .. } => ErrorCategory::Conflict,
            Self::MalformedManifest { .. } | Self::Source { .. } => ErrorCategory::Internal,
        }
    }
}
