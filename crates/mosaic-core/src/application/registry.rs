//! The project configuration registry.
//!
//! The registry is a derived view, never separately durable: every read
//! walks the tree for `project.json` manifests, and every write serializes
//! back through the tree. Two reads without an intervening write therefore
//! always agree.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, instrument};

use crate::application::error::WorkspaceError;
use crate::application::tree::FsTree;
use crate::application::workspace::json::read_json;
use crate::domain::project::ProjectConfiguration;
use crate::error::MosaicResult;

pub const PROJECT_MANIFEST: &str = "project.json";

/// Directories never scanned for project manifests.
const SKIPPED_DIRS: &[&str] = &["node_modules", "dist", "tmp"];

/// Register a new project. Fails with a conflict when the name is taken
/// or another project already claims the root.
#[instrument(skip_all, fields(project = %config.name))]
pub fn add_project_configuration(
    tree: &mut FsTree,
    config: &ProjectConfiguration,
) -> MosaicResult<()> {
    config.validate()?;
    let projects = get_projects(tree)?;
    if projects.contains_key(&config.name) {
        return Err(WorkspaceError::ProjectAlreadyExists {
            name: config.name.clone(),
        }
        .into());
    }
    if let Some((owner, _)) = projects.iter().find(|(_, p)| p.root == config.root) {
        return Err(WorkspaceError::RootAlreadyUsed {
            root: config.root.clone(),
            owner: owner.clone(),
        }
        .into());
    }
    write_manifest(tree, &config.root, config)?;
    debug!(root = %config.root, "project registered");
    Ok(())
}

/// Look up a project by name.
pub fn read_project_configuration(
    tree: &FsTree,
    name: &str,
) -> MosaicResult<ProjectConfiguration> {
    get_projects(tree)?.remove(name).ok_or_else(|| {
        WorkspaceError::ProjectNotFound {
            name: name.to_string(),
        }
        .into()
    })
}

/// Overwrite an existing project's configuration.
///
/// The project keeps the root it was registered under; moving a project
/// is a directory move plus remove/add, not an update.
pub fn update_project_configuration(
    tree: &mut FsTree,
    config: &ProjectConfiguration,
) -> MosaicResult<()> {
    config.validate()?;
    let existing = read_project_configuration(tree, &config.name)?;
    write_manifest(tree, &existing.root, config)
}

/// Delete a project's manifest. The project's files are left alone.
pub fn remove_project_configuration(tree: &mut FsTree, name: &str) -> MosaicResult<()> {
    let existing = read_project_configuration(tree, name)?;
    tree.delete(manifest_path(&existing.root).as_str());
    Ok(())
}

/// All projects in the workspace, keyed by name.
pub fn get_projects(tree: &FsTree) -> MosaicResult<BTreeMap<String, ProjectConfiguration>> {
    let mut projects: BTreeMap<String, ProjectConfiguration> = BTreeMap::new();
    let mut stack: Vec<Utf8PathBuf> = vec![Utf8PathBuf::new()];

    while let Some(dir) = stack.pop() {
        for child in tree.children(dir.as_str()) {
            if SKIPPED_DIRS.contains(&child.as_str()) || child.starts_with('.') {
                continue;
            }
            let full = if dir.as_str().is_empty() {
                Utf8PathBuf::from(&child)
            } else {
                dir.join(&child)
            };
            if tree.is_file(full.as_str()) {
                if child == PROJECT_MANIFEST {
                    let config = load_manifest(tree, &dir, full.as_str())?;
                    if let Some(previous) = projects.get(&config.name) {
                        return Err(WorkspaceError::MalformedManifest {
                            path: full.to_string(),
                            reason: format!(
                                "project name '{}' is also used at '{}'",
                                config.name, previous.root
                            ),
                        }
                        .into());
                    }
                    projects.insert(config.name.clone(), config);
                }
            } else {
                stack.push(full);
            }
        }
    }
    Ok(projects)
}

fn load_manifest(
    tree: &FsTree,
    root: &Utf8Path,
    manifest: &str,
) -> MosaicResult<ProjectConfiguration> {
    let mut config: ProjectConfiguration = read_json(tree, manifest)?;
    config.root = root.to_path_buf();
    if config.name.is_empty() {
        // Standalone manifests may omit the name; the directory supplies it.
        config.name = root
            .file_name()
            .unwrap_or("root")
            .to_string();
    }
    Ok(config)
}

fn manifest_path(root: &Utf8Path) -> Utf8PathBuf {
    if root.as_str().is_empty() {
        Utf8PathBuf::from(PROJECT_MANIFEST)
    } else {
        root.join(PROJECT_MANIFEST)
    }
}

fn write_manifest(
    tree: &mut FsTree,
    root: &Utf8Path,
    config: &ProjectConfiguration,
) -> MosaicResult<()> {
    crate::application::workspace::json::write_json(tree, manifest_path(root).as_str(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::{ProjectType, TargetConfiguration};
    use crate::error::MosaicError;
    use crate::test_support::empty_tree;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn lib(name: &str, root: &str) -> ProjectConfiguration {
        let mut config = ProjectConfiguration::library(name, root.into());
        config.add_target(
            "build",
            TargetConfiguration::new("@mosaic/js:tsc")
                .with_option("main", json!(format!("{root}/src/index.ts"))),
        );
        config
    }

    #[test]
    fn add_then_read_round_trips() {
        let mut tree = empty_tree();
        let config = lib("lib-a", "libs/lib-a");
        add_project_configuration(&mut tree, &config).unwrap();

        let back = read_project_configuration(&tree, "lib-a").unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn reading_twice_yields_equal_results() {
        let mut tree = empty_tree();
        add_project_configuration(&mut tree, &lib("lib-a", "libs/lib-a")).unwrap();
        assert_eq!(
            read_project_configuration(&tree, "lib-a").unwrap(),
            read_project_configuration(&tree, "lib-a").unwrap()
        );
    }

    #[test]
    fn duplicate_name_is_a_conflict() {
        let mut tree = empty_tree();
        add_project_configuration(&mut tree, &lib("lib-a", "libs/lib-a")).unwrap();
        let err = add_project_configuration(&mut tree, &lib("lib-a", "libs/other")).unwrap_err();
        assert!(matches!(
            err,
            MosaicError::Workspace(WorkspaceError::ProjectAlreadyExists { .. })
        ));
    }

    #[test]
    fn duplicate_root_is_a_conflict() {
        let mut tree = empty_tree();
        add_project_configuration(&mut tree, &lib("lib-a", "libs/shared")).unwrap();
        let err = add_project_configuration(&mut tree, &lib("lib-b", "libs/shared")).unwrap_err();
        assert!(matches!(
            err,
            MosaicError::Workspace(WorkspaceError::RootAlreadyUsed { .. })
        ));
    }

    #[test]
    fn update_requires_an_existing_project() {
        let mut tree = empty_tree();
        let err = update_project_configuration(&mut tree, &lib("ghost", "libs/ghost")).unwrap_err();
        assert!(matches!(
            err,
            MosaicError::Workspace(WorkspaceError::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn update_overwrites_targets() {
        let mut tree = empty_tree();
        let mut config = lib("lib-a", "libs/lib-a");
        add_project_configuration(&mut tree, &config).unwrap();

        config.add_target("lint", TargetConfiguration::new("@mosaic/linter:eslint"));
        update_project_configuration(&mut tree, &config).unwrap();

        let back = read_project_configuration(&tree, "lib-a").unwrap();
        assert!(back.targets.contains_key("lint"));
    }

    #[test]
    fn remove_deletes_the_manifest_only() {
        let mut tree = empty_tree();
        tree.write("libs/lib-a/src/index.ts", "export {};\n");
        add_project_configuration(&mut tree, &lib("lib-a", "libs/lib-a")).unwrap();
        remove_project_configuration(&mut tree, "lib-a").unwrap();

        assert!(read_project_configuration(&tree, "lib-a").is_err());
        assert!(tree.exists("libs/lib-a/src/index.ts"));
    }

    #[test]
    fn projects_are_discovered_at_any_depth() {
        let mut tree = empty_tree();
        add_project_configuration(&mut tree, &lib("deep", "libs/group/deep")).unwrap();
        add_project_configuration(&mut tree, &lib("shallow", "libs/shallow")).unwrap();
        let projects = get_projects(&tree).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects["deep"].root.as_str(), "libs/group/deep");
    }

    #[test]
    fn root_project_manifest_is_supported() {
        let mut tree = empty_tree();
        let config = ProjectConfiguration::new("standalone", "".into(), ProjectType::Application);
        add_project_configuration(&mut tree, &config).unwrap();
        let back = read_project_configuration(&tree, "standalone").unwrap();
        assert_eq!(back.root.as_str(), "");
    }
}
