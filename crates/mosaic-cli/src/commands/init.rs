//! The `mosaic init` command.

use mosaic_adapters::{LocalTreeSource, flush_changes};
use mosaic_core::application::tree::FsTree;
use mosaic_core::application::workspace::{
    WORKSPACE_MANIFEST, workspace_manifest, write_json,
};
use mosaic_generators::init::init_generator;

use crate::cli::{GlobalArgs, InitArgs};
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

pub fn execute(cmd: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let root = super::workspace_root(&global)?;
    let mut tree = FsTree::new(Box::new(LocalTreeSource::new(&root)));

    let tasks = init_generator(&mut tree).map_err(CliError::Core)?;

    // Flag overrides land in mosaic.json so later generator runs see them.
    // Fields the user did not override keep their current values.
    if cmd.npm_scope.is_some() || cmd.apps_dir.is_some() || cmd.libs_dir.is_some() {
        let mut manifest = workspace_manifest(&tree).map_err(CliError::Core)?;
        if let Some(scope) = cmd.npm_scope {
            manifest.npm_scope = scope;
        }
        if let Some(apps_dir) = cmd.apps_dir {
            manifest.workspace_layout.apps_dir = apps_dir;
        }
        if let Some(libs_dir) = cmd.libs_dir {
            manifest.workspace_layout.libs_dir = libs_dir;
        }
        write_json(&mut tree, WORKSPACE_MANIFEST, &manifest).map_err(CliError::Core)?;
    }

    let changes = tree.list_changes();
    for change in &changes {
        output.change_line(change.kind, change.path.as_str())?;
    }
    flush_changes(&tree, &root).map_err(CliError::Core)?;
    tasks
        .into_serial()
        .run()
        .map_err(|source| CliError::TaskFailed { source })?;

    if changes.is_empty() {
        output.info("workspace already initialised")?;
    } else {
        output.success("workspace initialised")?;
    }
    Ok(())
}
