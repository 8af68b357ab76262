//! Workspace init generator.
//!
//! Every project generator invokes this first: it lays down the three
//! root manifests a workspace needs (package.json, tsconfig.base.json,
//! mosaic.json) and is a no-op for each one that already exists, so
//! nesting it is always safe.

use serde_json::json;
use tracing::instrument;

use mosaic_core::application::generator::task::Tasks;
use mosaic_core::application::tree::FsTree;
use mosaic_core::application::workspace::{
    PACKAGE_MANIFEST, TSCONFIG_BASE, WORKSPACE_MANIFEST, WorkspaceManifest,
    add_dependencies_to_package_json, write_json,
};
use mosaic_core::error::MosaicResult;

use crate::versions::TYPESCRIPT_VERSION;

#[instrument(skip_all)]
pub fn init_generator(tree: &mut FsTree) -> MosaicResult<Tasks> {
    let mut tasks = Tasks::new();

    if !tree.is_file(PACKAGE_MANIFEST) {
        write_json(
            tree,
            PACKAGE_MANIFEST,
            &json!({
                "name": "workspace",
                "version": "0.0.0",
                "private": true,
                "scripts": {}
            }),
        )?;
    }

    if !tree.is_file(TSCONFIG_BASE) {
        write_json(
            tree,
            TSCONFIG_BASE,
            &json!({
                "compileOnSave": false,
                "compilerOptions": {
                    "rootDir": ".",
                    "baseUrl": ".",
                    "sourceMap": true,
                    "declaration": false,
                    "moduleResolution": "node",
                    "target": "es2015",
                    "module": "esnext",
                    "lib": ["es2020", "dom"],
                    "skipLibCheck": true,
                    "skipDefaultLibCheck": true,
                    "paths": {}
                },
                "exclude": ["node_modules", "tmp"]
            }),
        )?;
    }

    if !tree.is_file(WORKSPACE_MANIFEST) {
        write_json(tree, WORKSPACE_MANIFEST, &WorkspaceManifest::default())?;
    }

    tasks.push(add_dependencies_to_package_json(
        tree,
        &[],
        &[("typescript", TYPESCRIPT_VERSION)],
    )?);
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_adapters::MemoryTreeSource;

    fn empty_tree() -> FsTree {
        FsTree::new(Box::new(MemoryTreeSource::new()))
    }

    #[test]
    fn lays_down_the_root_manifests() {
        let mut tree = empty_tree();
        init_generator(&mut tree).unwrap();
        assert!(tree.is_file("package.json"));
        assert!(tree.is_file("tsconfig.base.json"));
        assert!(tree.is_file("mosaic.json"));
        assert!(tree.read("package.json").unwrap().contains("typescript"));
    }

    #[test]
    fn is_idempotent_over_existing_manifests() {
        let mut tree = empty_tree();
        init_generator(&mut tree).unwrap();
        let package = tree.read("package.json").unwrap();
        init_generator(&mut tree).unwrap();
        assert_eq!(tree.read("package.json").unwrap(), package);
    }

    #[test]
    fn respects_an_existing_package_json() {
        let mut tree = FsTree::new(Box::new(MemoryTreeSource::with_files(&[(
            "package.json",
            "{\n  \"name\": \"custom\"\n}\n",
        )])));
        init_generator(&mut tree).unwrap();
        assert!(tree.read("package.json").unwrap().contains("\"custom\""));
    }
}
