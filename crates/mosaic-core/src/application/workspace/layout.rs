//! The root workspace manifest (`mosaic.json`).
//!
//! Holds the workspace-wide conventions generators rely on: where
//! applications and libraries live, and the npm scope used to derive
//! default import paths for new libraries.

use serde::{Deserialize, Serialize};

use crate::application::tree::FsTree;
use crate::application::workspace::json::read_json;
use crate::error::MosaicResult;

pub const WORKSPACE_MANIFEST: &str = "mosaic.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceManifest {
    pub npm_scope: String,
    pub workspace_layout: WorkspaceLayout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceLayout {
    pub apps_dir: String,
    pub libs_dir: String,
}

impl Default for WorkspaceManifest {
    fn default() -> Self {
        Self {
            npm_scope: "workspace".to_string(),
            workspace_layout: WorkspaceLayout::default(),
        }
    }
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            apps_dir: "apps".to_string(),
            libs_dir: "libs".to_string(),
        }
    }
}

/// Read the workspace manifest, falling back to defaults when the file
/// does not exist yet (a bare directory is a valid workspace).
pub fn workspace_manifest(tree: &FsTree) -> MosaicResult<WorkspaceManifest> {
    if !tree.is_file(WORKSPACE_MANIFEST) {
        return Ok(WorkspaceManifest::default());
    }
    read_json(tree, WORKSPACE_MANIFEST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{empty_tree, tree_with_files};
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_manifest_yields_defaults() {
        let manifest = workspace_manifest(&empty_tree()).unwrap();
        assert_eq!(manifest.workspace_layout.apps_dir, "apps");
        assert_eq!(manifest.workspace_layout.libs_dir, "libs");
        assert_eq!(manifest.npm_scope, "workspace");
    }

    #[test]
    fn partial_manifest_fills_in_defaults() {
        let tree = tree_with_files(&[("mosaic.json", r#"{"npmScope": "acme"}"#)]);
        let manifest = workspace_manifest(&tree).unwrap();
        assert_eq!(manifest.npm_scope, "acme");
        assert_eq!(manifest.workspace_layout.libs_dir, "libs");
    }
}
