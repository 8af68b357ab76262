//! Unit-test sub-generator, registered under the `jest` capability.

use serde_json::json;
use tracing::{debug, instrument};

use mosaic_core::application::generator::capability::{CapabilityOptions, GeneratorContext};
use mosaic_core::application::generator::task::Tasks;
use mosaic_core::application::registry::{
    read_project_configuration, update_project_configuration,
};
use mosaic_core::application::tree::FsTree;
use mosaic_core::application::workspace::{add_dependencies_to_package_json, offset_from_root};
use mosaic_core::domain::project::TargetConfiguration;
use mosaic_core::error::MosaicResult;

use crate::versions::{JEST_VERSION, TYPES_JEST_VERSION};

/// Add a `test` target and jest config to a project.
#[instrument(skip_all, fields(project = %options.project))]
pub fn jest_project_capability(
    tree: &mut FsTree,
    options: &CapabilityOptions,
    _ctx: &GeneratorContext,
) -> MosaicResult<Tasks> {
    let mut config = read_project_configuration(tree, &options.project)?;
    if config.targets.contains_key("test") {
        debug!("test target already configured; leaving it alone");
        return Ok(Tasks::new());
    }

    let jest_config = format!("{}/jest.config.ts", config.root);
    config.add_target(
        "test",
        TargetConfiguration::new("@mosaic/jest:jest")
            .with_outputs(&["{workspaceRoot}/coverage/{projectRoot}"])
            .with_option("jestConfig", json!(jest_config))
            .with_option("passWithNoTests", json!(true)),
    );

    if !tree.is_file("jest.preset.js") {
        tree.write(
            "jest.preset.js",
            "module.exports = {\n  testMatch: ['**/*.spec.ts', '**/*.spec.tsx'],\n  transform: {},\n};\n",
        );
    }

    let offset = offset_from_root(config.root.as_str());
    tree.write(
        &jest_config,
        format!(
            "export default {{\n  displayName: '{}',\n  preset: '{}jest.preset.js',\n  coverageDirectory: '{}coverage/{}',\n}};\n",
            options.project, offset, offset, config.root
        ),
    );

    update_project_configuration(tree, &config)?;

    let mut tasks = Tasks::new();
    tasks.push(add_dependencies_to_package_json(
        tree,
        &[],
        &[("jest", JEST_VERSION), ("@types/jest", TYPES_JEST_VERSION)],
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
        let config = ProjectConfiguration::application("shop", "apps/shop".into());
        add_project_configuration(&mut tree, &config).unwrap();
        tree
    }

    #[test]
    fn wires_test_target_and_config_file() {
        let mut tree = tree_with_project();
        let ctx = GeneratorContext::default();
        jest_project_capability(&mut tree, &CapabilityOptions::for_project("shop"), &ctx).unwrap();

        let config = read_project_configuration(&tree, "shop").unwrap();
        assert_eq!(config.targets["test"].executor, "@mosaic/jest:jest");
        let jest_config = tree.read("apps/shop/jest.config.ts").unwrap();
        assert!(jest_config.contains("displayName: 'shop'"));
        assert!(jest_config.contains("preset: '../../jest.preset.js'"));
        assert!(tree.is_file("jest.preset.js"));
    }

    #[test]
    fn existing_test_target_short_circuits() {
        let mut tree = tree_with_project();
        let ctx = GeneratorContext::default();
        jest_project_capability(&mut tree, &CapabilityOptions::for_project("shop"), &ctx).unwrap();
        let tasks =
            jest_project_capability(&mut tree, &CapabilityOptions::for_project("shop"), &ctx)
                .unwrap();
        assert!(tasks.is_empty());
    }
}
