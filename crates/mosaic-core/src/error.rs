//! Unified error handling for Mosaic Core.
//!
//! Two layers feed into one root type: [`DomainError`] for validation
//! failures raised before any mutation, and [`WorkspaceError`] for
//! failures while reading or mutating the workspace. The root error maps
//! every failure onto a small category set the CLI uses for styling and
//! exit codes.

use thiserror::Error;

use crate::application::error::WorkspaceError;
use crate::domain::error::DomainError;

/// Root error type for Mosaic Core operations.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// Validation failures (raised before mutation).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Workspace read/mutation failures.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Unexpected internal errors (bugs).
    #[error("internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MosaicError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Workspace(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Mosaic".into(),
                "Please file an issue with the command you ran".into(),
            ],
        }
    }

    /// Error category for display/styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Workspace(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or contradictory input; nothing was mutated.
    Validation,
    /// A referenced project, path or capability does not exist.
    NotFound,
    /// Something that must be unique already exists.
    Conflict,
    /// Everything else.
    Internal,
}

/// Convenient result type alias.
pub type MosaicResult<T> = Result<T, MosaicError>;
