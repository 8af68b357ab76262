//! Domain errors: invalid or contradictory generator input.
//!
//! Every variant here is a validation failure. They are raised during
//! options normalization, before any tree mutation begins, so a failing
//! generator leaves zero partial effects behind.

use thiserror::Error;

/// Validation errors from the domain layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("option '{field}' is required: {reason}")]
    MissingRequiredOption { field: &'static str, reason: String },

    #[error("invalid value for option '{option}': {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error("target '{target}' has an empty executor")]
    EmptyExecutor { target: String },

    #[error("absolute paths are not allowed in the workspace tree: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("text change at byte {index} is out of bounds for a {len}-byte source")]
    ChangeOutOfBounds { index: usize, len: usize },

    #[error("text changes overlap at byte {position}")]
    OverlappingChanges { position: usize },
}

impl DomainError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, .. } => vec![
                format!("'{name}' cannot be used as a project name"),
                "Use lowercase letters, digits and dashes, starting with a letter".into(),
                "Examples: shop, admin-dashboard, shared-ui".into(),
            ],
            Self::MissingRequiredOption { field, .. } => vec![
                format!("Provide a value for '{field}'"),
                "Run the generator with --help to see all options".into(),
            ],
            Self::InvalidOption { option, reason } => {
                vec![format!("Option '{option}' was rejected: {reason}")]
            }
            Self::EmptyExecutor { target } => vec![
                format!("Target '{target}' needs an executor identifier"),
                "Executors look like '@mosaic/webpack:webpack'".into(),
            ],
            Self::AbsolutePathNotAllowed { .. } => vec![
                "Workspace tree paths are always relative to the workspace root".into(),
            ],
            Self::ChangeOutOfBounds { .. } | Self::OverlappingChanges { .. } => vec![
                "The computed text edits do not fit the source file".into(),
                "This usually means the file changed between scan and apply".into(),
            ],
        }
    }
}
