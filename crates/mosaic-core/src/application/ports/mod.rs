//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application layer needs from the outside
//! world. The `mosaic-adapters` crate provides the implementations.

use camino::Utf8Path;

use crate::error::MosaicResult;

/// Port for the underlying, unmodified file tree.
///
/// Implemented by:
/// - `mosaic_adapters::source::LocalTreeSource` (disk, production)
/// - `mosaic_adapters::source::MemoryTreeSource` (testing)
///
/// The source is read-only: all mutation happens in the `FsTree` overlay,
/// and a source path is consulted at most once per tree (the overlay
/// caches the answer). Paths are workspace-relative; the empty path is
/// the workspace root.
pub trait TreeSource: Send + Sync {
    /// Read a file. `Ok(None)` when no file exists at `path`.
    fn read(&self, path: &Utf8Path) -> MosaicResult<Option<String>>;

    /// Whether a *file* (not a directory) exists at `path`.
    fn is_file(&self, path: &Utf8Path) -> bool;

    /// Immediate child names of `dir`, files and directories alike.
    /// Empty when `dir` does not exist or is a file.
    fn children(&self, dir: &Utf8Path) -> Vec<String>;
}

/// Port for the end-of-run file formatter.
///
/// `format_files` runs it over every touched file after all structural
/// mutation is complete — never interleaved with generator work.
pub trait FileFormatter: Send + Sync {
    /// Reformat `content`; `None` when the file is already formatted or
    /// the formatter does not handle this file type.
    fn format(&self, path: &Utf8Path, content: &str) -> Option<String>;
}
