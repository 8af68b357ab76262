//! Flush a tree's recorded changes to disk.

use std::fs;
use std::io;
use std::path::Path;

use mosaic_core::application::error::WorkspaceError;
use mosaic_core::application::tree::FsTree;
use mosaic_core::domain::change::ChangeKind;
use mosaic_core::error::MosaicResult;
use tracing::{debug, instrument};

/// Apply every recorded change under `root`, in recorded order.
///
/// Returns the number of applied changes. There is no rollback: a failed
/// flush aborts the run and leaves the workspace partially written, which
/// is acceptable because generators are deterministic — fixing the cause
/// and re-running converges on the same result.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn flush_changes(tree: &FsTree, root: &Path) -> MosaicResult<usize> {
    let changes = tree.list_changes();
    for change in &changes {
        let target = root.join(change.path.as_std_path());
        let io_error = |e: io::Error| WorkspaceError::Source {
            path: change.path.to_string(),
            reason: e.to_string(),
        };
        match change.kind {
            ChangeKind::Delete => {
                match fs::remove_file(&target) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(io_error(e).into()),
                }
                prune_empty_dirs(target.parent(), root);
            }
            ChangeKind::Create | ChangeKind::Update => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).map_err(io_error)?;
                }
                fs::write(&target, change.content.as_deref().unwrap_or_default())
                    .map_err(io_error)?;
            }
        }
        debug!(kind = %change.kind, path = %change.path, "flushed");
    }
    Ok(changes.len())
}

/// Best-effort removal of directories a deletion emptied out.
fn prune_empty_dirs(mut dir: Option<&Path>, root: &Path) {
    while let Some(current) = dir {
        if current == root || fs::remove_dir(current).is_err() {
            return; // not empty, or gone already — either way stop
        }
        dir = current.parent();
    }
}
