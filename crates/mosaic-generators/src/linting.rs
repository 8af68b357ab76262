//! Lint sub-generator, registered under the `eslint` capability.

use serde_json::json;
use tracing::{debug, instrument};

use mosaic_core::application::generator::capability::{CapabilityOptions, GeneratorContext};
use mosaic_core::application::generator::task::Tasks;
use mosaic_core::application::registry::{
    read_project_configuration, update_project_configuration,
};
use mosaic_core::application::tree::FsTree;
use mosaic_core::application::workspace::{
    add_dependencies_to_package_json, offset_from_root, write_json,
};
use mosaic_core::domain::project::TargetConfiguration;
use mosaic_core::error::MosaicResult;

use crate::versions::ESLINT_VERSION;

/// Add a `lint` target and eslint config to a project.
#[instrument(skip_all, fields(project = %options.project))]
pub fn lint_project_capability(
    tree: &mut FsTree,
    options: &CapabilityOptions,
    _ctx: &GeneratorContext,
) -> MosaicResult<Tasks> {
    let mut config = read_project_configuration(tree, &options.project)?;
    if config.targets.contains_key("lint") {
        debug!("lint target already configured; leaving it alone");
        return Ok(Tasks::new());
    }

    config.add_target(
        "lint",
        TargetConfiguration::new("@mosaic/linter:eslint").with_option(
            "lintFilePatterns",
            json!([format!("{}/**/*.{{ts,tsx}}", config.root)]),
        ),
    );

    if !tree.is_file(".eslintrc.json") {
        write_json(
            tree,
            ".eslintrc.json",
            &json!({
                "root": true,
                "ignorePatterns": ["**/*"],
                "overrides": [
                    {
                        "files": ["*.ts", "*.tsx"],
                        "rules": {}
                    }
                ]
            }),
        )?;
    }

    let project_rc = format!("{}/.eslintrc.json", config.root);
    write_json(
        tree,
        &project_rc,
        &json!({
            "extends": [format!("{}.eslintrc.json", offset_from_root(config.root.as_str()))],
            "ignorePatterns": ["!**/*"]
        }),
    )?;

    update_project_configuration(tree, &config)?;

    let mut tasks = Tasks::new();
    tasks.push(add_dependencies_to_package_json(
        tree,
        &[],
        &[("eslint", ESLINT_VERSION)],
    )?);
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_adapters::MemoryTreeSource;
    use mosaic_core::application::registry::add_project_configuration;
    use mosaic_core::domain::project::ProjectConfiguration;

    fn tree_with_project() -> FsTree {
        let mut tree = FsTree::new(Box::new(MemoryTreeSource::with_files(&[(
            "package.json",
            "{}",
        )])));
        let config = ProjectConfiguration::library("ui", "libs/ui".into());
        add_project_configuration(&mut tree, &config).unwrap();
        tree
    }

    #[test]
    fn wires_lint_target_and_configs() {
        let mut tree = tree_with_project();
        let ctx = GeneratorContext::default();
        let tasks =
            lint_project_capability(&mut tree, &CapabilityOptions::for_project("ui"), &ctx)
                .unwrap();

        assert_eq!(tasks.len(), 1);
        let config = read_project_configuration(&tree, "ui").unwrap();
        assert!(config.targets.contains_key("lint"));
        assert!(tree.is_file(".eslintrc.json"));
        let project_rc = tree.read("libs/ui/.eslintrc.json").unwrap();
        assert!(project_rc.contains("../../.eslintrc.json"));
    }

    #[test]
    fn second_run_changes_nothing() {
        let mut tree = tree_with_project();
        let ctx = GeneratorContext::default();
        lint_project_capability(&mut tree, &CapabilityOptions::for_project("ui"), &ctx).unwrap();
        let tasks =
            lint_project_capability(&mut tree, &CapabilityOptions::for_project("ui"), &ctx)
                .unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn unknown_project_is_not_found() {
        let mut tree = tree_with_project();
        let ctx = GeneratorContext::default();
        assert!(
            lint_project_capability(&mut tree, &CapabilityOptions::for_project("ghost"), &ctx)
                .is_err()
        );
    }
}
