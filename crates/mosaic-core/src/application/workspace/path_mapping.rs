//! The root path-mapping manifest (`tsconfig.base.json`).
//!
//! Every library-creating generator appends its import path here. The
//! manifest is only ever appended to — existing mappings are preserved,
//! and a duplicate import path is a conflict, never an overwrite.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::application::error::WorkspaceError;
use crate::application::tree::FsTree;
use crate::application::workspace::json::{read_json, write_json};
use crate::error::MosaicResult;

pub const TSCONFIG_BASE: &str = "tsconfig.base.json";

/// Map `import_path` to `entry` in `compilerOptions.paths`.
pub fn register_path_mapping(
    tree: &mut FsTree,
    import_path: &str,
    entry: &str,
) -> MosaicResult<()> {
    let mut config: Value = read_json(tree, TSCONFIG_BASE)?;
    let paths = paths_section(&mut config, TSCONFIG_BASE)?;
    if paths.contains_key(import_path) {
        return Err(WorkspaceError::PathMappingExists {
            import_path: import_path.to_string(),
        }
        .into());
    }
    paths.insert(import_path.to_string(), json!([entry]));
    write_json(tree, TSCONFIG_BASE, &config)
}

/// All registered path mappings.
pub fn path_mappings(tree: &FsTree) -> MosaicResult<BTreeMap<String, Vec<String>>> {
    if !tree.is_file(TSCONFIG_BASE) {
        return Ok(BTreeMap::new());
    }
    let mut config: Value = read_json(tree, TSCONFIG_BASE)?;
    let paths = paths_section(&mut config, TSCONFIG_BASE)?;
    Ok(paths
        .iter()
        .map(|(import_path, entries)| {
            let entries = entries
                .as_array()
                .map(|a| {
                    a.iter()
                        .filter_map(|e| e.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            (import_path.clone(), entries)
        })
        .collect())
}

fn paths_section<'a>(
    config: &'a mut Value,
    path: &str,
) -> MosaicResult<&'a mut Map<String, Value>> {
    let malformed = |reason: &str| WorkspaceError::MalformedManifest {
        path: path.to_string(),
        reason: reason.to_string(),
    };
    let root = config
        .as_object_mut()
        .ok_or_else(|| malformed("expected a top-level object"))?;
    let compiler_options = root
        .entry("compilerOptions".to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| malformed("compilerOptions is not an object"))?;
    compiler_options
        .entry("paths".to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| malformed("compilerOptions.paths is not an object").into())
}
