//! The `mosaic list` command.

use mosaic_adapters::LocalTreeSource;
use mosaic_core::application::registry::get_projects;
use mosaic_core::application::tree::FsTree;

use crate::cli::{GlobalArgs, ListArgs, ListFormat};
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

pub fn execute(cmd: ListArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let root = super::workspace_root(&global)?;
    let tree = FsTree::new(Box::new(LocalTreeSource::new(&root)));
    let projects = get_projects(&tree).map_err(CliError::Core)?;

    if projects.is_empty() {
        output.info("no projects found — generate one with: mosaic generate")?;
        return Ok(());
    }

    match cmd.format {
        ListFormat::Names => {
            for name in projects.keys() {
                output.print(name)?;
            }
        }
        ListFormat::Json => {
            let raw = serde_json::to_string_pretty(&projects).map_err(|e| {
                CliError::InvalidInput {
                    message: format!("could not serialize project list: {e}"),
                }
            })?;
            output.print(&raw)?;
        }
        ListFormat::Table => {
            output.header(&format!(
                "{:<24} {:<12} {:<28} TARGETS",
                "NAME", "TYPE", "ROOT"
            ))?;
            for (name, project) in &projects {
                let targets = project
                    .targets
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                output.print(&format!(
                    "{:<24} {:<12} {:<28} {}",
                    name,
                    project.project_type.as_str(),
                    project.root.as_str(),
                    targets
                ))?;
            }
        }
    }
    Ok(())
}
