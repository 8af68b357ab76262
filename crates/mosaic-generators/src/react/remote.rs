//! Module-federation remote generator.
//!
//! A remote is a React application that exposes its entry module over
//! module federation. When a host is named, the remote registers itself
//! with the host: config remotes array, ambient module declaration, and a
//! lazy route in the host's shell.

use serde_json::json;
use tracing::{instrument, warn};

use mosaic_core::application::generator::capability::GeneratorContext;
use mosaic_core::application::generator::task::Tasks;
use mosaic_core::application::patch::{
    add_remote_definition, add_remote_route, add_remote_to_config, apply_string_changes,
};
use mosaic_core::application::registry::read_project_configuration;
use mosaic_core::application::tree::FsTree;
use mosaic_core::application::workspace::write_json;
use mosaic_core::domain::error::DomainError;
use mosaic_core::domain::project::ProjectType;
use mosaic_core::error::MosaicResult;

use crate::options::{Linter, UnitTestRunner};
use crate::react::application::{
    ReactApplicationSchema, application_generator, normalize_options,
};

/// User-supplied options, sparse.
#[derive(Debug, Clone)]
pub struct RemoteSchema {
    pub name: String,
    pub directory: Option<String>,
    pub tags: Option<String>,
    /// Host application to register this remote with.
    pub host: Option<String>,
    pub linter: Linter,
    pub unit_test_runner: UnitTestRunner,
}

impl RemoteSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: None,
            tags: None,
            host: None,
            linter: Linter::default(),
            unit_test_runner: UnitTestRunner::default(),
        }
    }
}

/// Generate a federated remote application.
#[instrument(skip_all, fields(remote = %schema.name))]
pub fn remote_generator(
    tree: &mut FsTree,
    schema: &RemoteSchema,
    ctx: &GeneratorContext,
) -> MosaicResult<Tasks> {
    let app_schema = ReactApplicationSchema {
        name: schema.name.clone(),
        directory: schema.directory.clone(),
        tags: schema.tags.clone(),
        routing: false,
        linter: schema.linter,
        unit_test_runner: schema.unit_test_runner,
    };
    let options = normalize_options(tree, &app_schema)?;

    // Validate the host before mutating anything.
    let host = match &schema.host {
        Some(host) => {
            let config = read_project_configuration(tree, host)?;
            if config.project_type != ProjectType::Application {
                return Err(DomainError::InvalidOption {
                    option: "host",
                    reason: format!("project '{host}' is not an application"),
                }
                .into());
            }
            Some(config)
        }
        None => None,
    };

    let tasks = application_generator(tree, &app_schema, ctx)?;

    tree.write(
        &format!("{}/src/remote-entry.ts", options.project_root),
        "export { default } from '../app/app';\n",
    );
    write_json(
        tree,
        &format!("{}/module-federation.manifest.json", options.project_root),
        &json!({ "name": options.project_name }),
    )?;
    tree.write(
        &format!("{}/module-federation.config.js", options.project_root),
        format!(
            "module.exports = {{\n  name: '{}',\n  exposes: {{\n    './Module': './src/remote-entry.ts',\n  }},\n}};\n",
            options.project_name
        ),
    );

    if let Some(host) = host {
        register_with_host(tree, &options, &host)?;
    }

    Ok(tasks)
}

fn register_with_host(
    tree: &mut FsTree,
    options: &crate::react::application::NormalizedSchema,
    host: &mosaic_core::domain::project::ProjectConfiguration,
) -> MosaicResult<()> {
    // 1. remotes array in the host's federation config.
    let config_path = format!("{}/module-federation.config.js", host.root);
    match tree.read(&config_path) {
        Ok(source) => {
            let changes = add_remote_to_config(&source, &options.project_name);
            if !changes.is_empty() {
                tree.write(&config_path, apply_string_changes(&source, &changes)?);
            }
        }
        Err(_) => {
            warn!(host = %host.name, "host has no module-federation.config.js; skipping remotes update");
        }
    }

    // 2. ambient module declaration so the host typechecks the import.
    let definitions_path = format!("{}/src/remotes.d.ts", host.root);
    let definitions = tree.read(&definitions_path).unwrap_or_default();
    let changes = add_remote_definition(&definitions, &options.project_name);
    tree.write(
        &definitions_path,
        apply_string_changes(&definitions, &changes)?,
    );

    // 3. lazy route in the host's shell.
    let shell_path = format!("{}/src/app/app.tsx", host.root);
    match tree.read(&shell_path) {
        Ok(source) => {
            let changes = add_remote_route(&source, &options.names);
            if !changes.is_empty() {
                tree.write(&shell_path, apply_string_changes(&source, &changes)?);
            }
        }
        Err(_) => {
            warn!(host = %host.name, "host has no application shell; skipping route wiring");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::react::host::{HostSchema, host_generator};
    use mosaic_adapters::MemoryTreeSource;
    use mosaic_core::application::registry::add_project_configuration;
    use mosaic_core::domain::project::ProjectConfiguration;
    use pretty_assertions::assert_eq;

    fn empty_tree() -> FsTree {
        FsTree::new(Box::new(MemoryTreeSource::new()))
    }

    #[test]
    fn remote_without_host_stands_alone() {
        let mut tree = empty_tree();
        remote_generator(
            &mut tree,
            &RemoteSchema::new("shop"),
            &crate::capabilities::generator_context(),
        )
        .unwrap();

        assert!(tree.is_file("apps/shop/src/remote-entry.ts"));
        let config = tree.read("apps/shop/module-federation.config.js").unwrap();
        assert!(config.contains("'./Module': './src/remote-entry.ts'"));
    }

    #[test]
    fn remote_registers_itself_with_the_host() {
        let mut tree = empty_tree();
        let ctx = crate::capabilities::generator_context();
        host_generator(&mut tree, &HostSchema::new("dashboard"), &ctx).unwrap();

        let mut schema = RemoteSchema::new("shop");
        schema.host = Some("dashboard".into());
        remote_generator(&mut tree, &schema, &ctx).unwrap();

        let host_config = tree
            .read("apps/dashboard/module-federation.config.js")
            .unwrap();
        assert!(host_config.contains("'shop',"));

        let definitions = tree.read("apps/dashboard/src/remotes.d.ts").unwrap();
        assert!(definitions.contains("declare module 'shop/Module';"));

        let shell = tree.read("apps/dashboard/src/app/app.tsx").unwrap();
        assert!(shell.contains("const Shop = React.lazy(() => import('shop/Module'));"));
        assert!(shell.contains("<Route path=\"/shop\" element={<Shop />} />"));
    }

    #[test]
    fn second_remote_lands_after_the_first() {
        let mut tree = empty_tree();
        let ctx = crate::capabilities::generator_context();
        host_generator(&mut tree, &HostSchema::new("dashboard"), &ctx).unwrap();

        for name in ["shop", "cart"] {
            let mut schema = RemoteSchema::new(name);
            schema.host = Some("dashboard".into());
            remote_generator(&mut tree, &schema, &ctx).unwrap();
        }

        let host_config = tree
            .read("apps/dashboard/module-federation.config.js")
            .unwrap();
        let shop = host_config.find("'shop'").unwrap();
        let cart = host_config.find("'cart'").unwrap();
        assert!(shop < cart);

        let definitions = tree.read("apps/dashboard/src/remotes.d.ts").unwrap();
        assert!(definitions.contains("declare module 'shop/Module';"));
        assert!(definitions.contains("declare module 'cart/Module';"));
    }

    #[test]
    fn library_host_is_rejected_before_mutation() {
        let mut tree = empty_tree();
        add_project_configuration(
            &mut tree,
            &ProjectConfiguration::library("ui", "libs/ui".into()),
        )
        .unwrap();
        let before = tree.list_changes().len();

        let mut schema = RemoteSchema::new("shop");
        schema.host = Some("ui".into());
        let err = remote_generator(
            &mut tree,
            &schema,
            &crate::capabilities::generator_context(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("not an application"));
        assert_eq!(tree.list_changes().len(), before);
    }

    #[test]
    fn missing_host_is_not_found() {
        let mut tree = empty_tree();
        let mut schema = RemoteSchema::new("shop");
        schema.host = Some("ghost".into());
        assert!(
            remote_generator(
                &mut tree,
                &schema,
                &crate::capabilities::generator_context()
            )
            .is_err()
        );
    }
}
