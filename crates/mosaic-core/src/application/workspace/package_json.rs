//! Dependency manifest updates.
//!
//! Mutates the root `package.json` through the tree and hands back a
//! deferred install task — generators never install anything themselves,
//! the outermost runner decides when (and whether) the task runs.

use serde_json::{Map, Value};
use tracing::info;

use crate::application::generator::task::GeneratorTask;
use crate::application::tree::FsTree;
use crate::application::workspace::json::update_json;
use crate::error::MosaicResult;

pub const PACKAGE_MANIFEST: &str = "package.json";

/// Merge entries into `dependencies` / `devDependencies`, returning the
/// deferred install task. A later entry for the same package wins.
pub fn add_dependencies_to_package_json(
    tree: &mut FsTree,
    deps: &[(&str, &str)],
    dev_deps: &[(&str, &str)],
) -> MosaicResult<GeneratorTask> {
    if deps.is_empty() && dev_deps.is_empty() {
        return Ok(GeneratorTask::noop());
    }
    update_json(tree, PACKAGE_MANIFEST, |mut manifest: Value| {
        merge_section(&mut manifest, "dependencies", deps);
        merge_section(&mut manifest, "devDependencies", dev_deps);
        manifest
    })?;
    Ok(GeneratorTask::new("install dependencies", || {
        info!("package.json changed; run your package manager's install");
        Ok(())
    }))
}

/// Strip entries from `dependencies` / `devDependencies`.
pub fn remove_dependencies_from_package_json(
    tree: &mut FsTree,
    deps: &[&str],
    dev_deps: &[&str],
) -> MosaicResult<()> {
    if deps.is_empty() && dev_deps.is_empty() {
        return Ok(());
    }
    update_json(tree, PACKAGE_MANIFEST, |mut manifest: Value| {
        strip_section(&mut manifest, "dependencies", deps);
        strip_section(&mut manifest, "devDependencies", dev_deps);
        manifest
    })
}

fn merge_section(manifest: &mut Value, section: &str, entries: &[(&str, &str)]) {
    if entries.is_empty() {
        return;
    }
    let Some(root) = manifest.as_object_mut() else {
        return;
    };
    let slot = root
        .entry(section.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(map) = slot.as_object_mut() else {
        return;
    };
    for (name, version) in entries {
        map.insert((*name).to_string(), Value::String((*version).to_string()));
    }
    sort_keys(map);
}

fn strip_section(manifest: &mut Value, section: &str, entries: &[&str]) {
    let Some(map) = manifest
        .get_mut(section)
        .and_then(|slot| slot.as_object_mut())
    else {
        return;
    };
    for name in entries {
        map.remove(*name);
    }
}

fn sort_keys(map: &mut Map<String, Value>) {
    let mut pairs: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    *map = pairs.into_iter().collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tree_with_files;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn manifest(tree: &FsTree) -> Value {
        serde_json::from_str(&tree.read(PACKAGE_MANIFEST).unwrap()).unwrap()
    }

    #[test]
    fn adds_and_sorts_dependencies() {
        let mut tree = tree_with_files(&[("package.json", r#"{"name": "ws"}"#)]);
        add_dependencies_to_package_json(
            &mut tree,
            &[("react-dom", "18.2.0"), ("react", "18.2.0")],
            &[("typescript", "5.0.4")],
        )
        .unwrap();

        let m = manifest(&tree);
        let deps: Vec<&String> = m["dependencies"].as_object().unwrap().keys().collect();
        assert_eq!(deps, vec!["react", "react-dom"]);
        assert_eq!(m["devDependencies"]["typescript"], json!("5.0.4"));
    }

    #[test]
    fn empty_request_touches_nothing() {
        let mut tree = tree_with_files(&[("package.json", r#"{"name": "ws"}"#)]);
        add_dependencies_to_package_json(&mut tree, &[], &[]).unwrap();
        assert!(tree.list_changes().is_empty());
    }

    #[test]
    fn does_not_create_empty_sections() {
        let mut tree = tree_with_files(&[("package.json", r#"{"name": "ws"}"#)]);
        add_dependencies_to_package_json(&mut tree, &[("react", "18.2.0")], &[]).unwrap();
        assert!(manifest(&tree).get("devDependencies").is_none());
    }

    #[test]
    fn removes_dependencies() {
        let mut tree = tree_with_files(&[(
            "package.json",
            r#"{"dependencies": {"react": "18.2.0", "redux": "4.2.0"}}"#,
        )]);
        remove_dependencies_from_package_json(&mut tree, &["redux"], &[]).unwrap();
        let m = manifest(&tree);
        assert!(m["dependencies"].get("redux").is_none());
        assert_eq!(m["dependencies"]["react"], json!("18.2.0"));
    }
}
