//! Domain layer: pure data and logic, no I/O and no tree access.

pub mod change;
pub mod error;
pub mod names;
pub mod project;

pub use change::{ChangeKind, ChangeRecord, StringChange, apply_string_changes};
pub use error::DomainError;
pub use names::Names;
pub use project::{ProjectConfiguration, ProjectType, TargetConfiguration};
