//! Module-federation host generator.
//!
//! A host is a routed React application with a federation config whose
//! `remotes` array starts empty; each remote generated alongside (or
//! later) appends itself through the patch engine.

use tracing::instrument;

use mosaic_core::application::generator::capability::GeneratorContext;
use mosaic_core::application::generator::task::Tasks;
use mosaic_core::application::tree::FsTree;
use mosaic_core::error::MosaicResult;

use crate::options::{Linter, UnitTestRunner};
use crate::react::application::{
    ReactApplicationSchema, application_generator, normalize_options,
};
use crate::react::remote::{RemoteSchema, remote_generator};

/// User-supplied options, sparse.
#[derive(Debug, Clone)]
pub struct HostSchema {
    pub name: String,
    pub directory: Option<String>,
    pub tags: Option<String>,
    /// Remotes to generate and register immediately.
    pub remotes: Vec<String>,
    pub linter: Linter,
    pub unit_test_runner: UnitTestRunner,
}

impl HostSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: None,
            tags: None,
            remotes: Vec::new(),
            linter: Linter::default(),
            unit_test_runner: UnitTestRunner::default(),
        }
    }
}

/// Generate a federated host application, plus its initial remotes.
#[instrument(skip_all, fields(host = %schema.name))]
pub fn host_generator(
    tree: &mut FsTree,
    schema: &HostSchema,
    ctx: &GeneratorContext,
) -> MosaicResult<Tasks> {
    let app_schema = ReactApplicationSchema {
        name: schema.name.clone(),
        directory: schema.directory.clone(),
        tags: schema.tags.clone(),
        routing: true,
        linter: schema.linter,
        unit_test_runner: schema.unit_test_runner,
    };
    let options = normalize_options(tree, &app_schema)?;
    let mut tasks = application_generator(tree, &app_schema, ctx)?;

    tree.write(
        &format!("{}/module-federation.config.js", options.project_root),
        format!(
            "module.exports = {{\n  name: '{}',\n  remotes: [],\n}};\n",
            options.project_name
        ),
    );
    tree.write(
        &format!("{}/src/remotes.d.ts", options.project_root),
        "// Ambient module declarations for federated remotes.\n",
    );

    for remote in &schema.remotes {
        let remote_schema = RemoteSchema {
            name: remote.clone(),
            directory: schema.directory.clone(),
            tags: schema.tags.clone(),
            host: Some(options.project_name.clone()),
            linter: schema.linter,
            unit_test_runner: schema.unit_test_runner,
        };
        tasks.extend(remote_generator(tree, &remote_schema, ctx)?);
    }

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_adapters::MemoryTreeSource;
    use mosaic_core::application::registry::read_project_configuration;

    #[test]
    fn host_with_initial_remotes_generates_and_registers_them() {
        let mut tree = FsTree::new(Box::new(MemoryTreeSource::new()));
        let mut schema = HostSchema::new("dashboard");
        schema.remotes = vec!["shop".into(), "cart".into()];
        host_generator(&mut tree, &schema, &crate::capabilities::generator_context()).unwrap();

        assert!(read_project_configuration(&tree, "dashboard").is_ok());
        assert!(read_project_configuration(&tree, "shop").is_ok());
        assert!(read_project_configuration(&tree, "cart").is_ok());

        let config = tree
            .read("apps/dashboard/module-federation.config.js")
            .unwrap();
        assert!(config.contains("'shop',"));
        assert!(config.contains("'cart',"));

        let shell = tree.read("apps/dashboard/src/app/app.tsx").unwrap();
        assert!(shell.contains("<Route path=\"/shop\""));
        assert!(shell.contains("<Route path=\"/cart\""));
    }
}
