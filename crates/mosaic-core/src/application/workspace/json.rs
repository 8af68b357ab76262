//! JSON manifest access through the tree.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::error::WorkspaceError;
use crate::application::tree::FsTree;
use crate::error::MosaicResult;

/// Read and parse a JSON file from the tree.
pub fn read_json<T: DeserializeOwned>(tree: &FsTree, path: &str) -> MosaicResult<T> {
    let raw = tree.read(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        WorkspaceError::MalformedManifest {
            path: path.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Serialize `value` as pretty JSON (with a trailing newline) into the tree.
pub fn write_json<T: Serialize>(tree: &mut FsTree, path: &str, value: &T) -> MosaicResult<()> {
    let mut raw = serde_json::to_string_pretty(value).map_err(|e| {
        WorkspaceError::MalformedManifest {
            path: path.to_string(),
            reason: e.to_string(),
        }
    })?;
    raw.push('\n');
    tree.write(path, raw);
    Ok(())
}

/// Read a JSON file, transform it, and write it back.
pub fn update_json<T, F>(tree: &mut FsTree, path: &str, update: F) -> MosaicResult<()>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce(T) -> T,
{
    let value: T = read_json(tree, path)?;
    write_json(tree, path, &update(value))
}
