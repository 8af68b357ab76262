//! Mosaic Core - generator engine for monorepo workspaces
//!
//! This crate provides the domain and application layers for the Mosaic
//! code-generation toolkit. Generators describe *what* a workspace should
//! look like; this crate supplies the machinery they all share.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           mosaic-cli (CLI)              │
//! │        (Drives the generators)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       mosaic-generators (plumbing)      │
//! │  (react/node/js generators, templates)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Layer (this crate)   │
//! │  FsTree · registry · patch · tasks      │
//! └──────────────────┬──────────────────────┘
//!                    │ abstracts I/O through
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Ports (TreeSource, FileFormatter)  │
//! │   implemented by mosaic-adapters        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Everything in this crate is synchronous and single-threaded: generators
//! compose by direct invocation, so the final tree state is a deterministic
//! function of the call order, never of scheduling.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mosaic_core::application::tree::FsTree;
//! use mosaic_core::application::registry;
//! use mosaic_core::domain::project::ProjectConfiguration;
//!
//! # fn demo(source: Box<dyn mosaic_core::application::ports::TreeSource>) -> mosaic_core::error::MosaicResult<()> {
//! let mut tree = FsTree::new(source);
//! tree.write("libs/util/src/index.ts", "export {};\n");
//! let config = ProjectConfiguration::library("util", "libs/util".into());
//! registry::add_project_configuration(&mut tree, &config)?;
//! # Ok(())
//! # }
//! ```

// Domain layer (pure logic, no I/O)
pub mod domain;

// Application layer (tree, registry, patch engine, generator protocol)
pub mod application;

// Unified error types
pub mod error;

#[cfg(test)]
pub(crate) mod test_support;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        generator::{
            capability::{CapabilityOptions, CapabilityRegistry, GeneratorContext},
            task::{GeneratorTask, TaskError, Tasks, run_tasks_in_serial},
        },
        ports::{FileFormatter, TreeSource},
        registry,
        tree::FsTree,
    };
    pub use crate::domain::{
        change::{ChangeKind, ChangeRecord, StringChange, apply_string_changes},
        names::Names,
        project::{ProjectConfiguration, ProjectType, TargetConfiguration},
    };
    pub use crate::error::{MosaicError, MosaicResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
