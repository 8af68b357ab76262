//! The `mosaic generate` command.
//!
//! Runs a generator against an in-memory tree over the workspace, then:
//! formats touched files, prints the pending change list, and either
//! stops there (`--dry-run`) or flushes the changes to disk and runs the
//! deferred tasks — in that order, so tasks never observe a
//! partially-written workspace.

use std::fs;
use std::path::Path;

use tracing::instrument;

use mosaic_adapters::{LocalTreeSource, SourceFormatter, flush_changes};
use mosaic_core::application::generator::task::Tasks;
use mosaic_core::application::tree::FsTree;
use mosaic_core::application::workspace::format_files;
use mosaic_core::domain::change::{ChangeKind, ChangeRecord};
use mosaic_generators::capabilities::generator_context;
use mosaic_generators::js::{LibrarySchema, library_generator};
use mosaic_generators::node::{NodeApplicationSchema, application_generator as node_application};
use mosaic_generators::options::{Linter, UnitTestRunner};
use mosaic_generators::react::{
    HostSchema, ReactApplicationSchema, RemoteSchema, application_generator as react_application,
    host_generator, remote_generator,
};

use crate::cli::{
    AppArgs, GenerateArgs, GeneratorCommand, GlobalArgs, HostArgs, LibArgs, NodeAppArgs,
    RemoteArgs, SharedProjectArgs,
};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

#[instrument(skip_all)]
pub fn execute(
    cmd: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = super::workspace_root(&global)?;
    let mut tree = FsTree::new(Box::new(LocalTreeSource::new(&root)));
    let ctx = generator_context();

    let tasks = run_generator(&mut tree, &cmd.generator, &config, &ctx)?;

    // Formatting is strictly last; it must never interleave with the
    // structural mutation above.
    format_files(&mut tree, &SourceFormatter::new());

    let changes = tree.list_changes();
    if changes.is_empty() {
        output.info("nothing to generate — workspace is already up to date")?;
        return Ok(());
    }
    for change in &changes {
        output.change_line(change.kind, change.path.as_str())?;
    }

    if cmd.dry_run {
        print_update_diffs(&changes, &root, &output)?;
        output.warning(&format!(
            "dry run: {} change(s) were not written",
            changes.len()
        ))?;
        return Ok(());
    }

    flush_changes(&tree, &root)?;
    tasks
        .into_serial()
        .run()
        .map_err(|source| CliError::TaskFailed { source })?;
    output.success(&format!("workspace updated ({} changes)", changes.len()))?;
    Ok(())
}

fn run_generator(
    tree: &mut FsTree,
    generator: &GeneratorCommand,
    config: &AppConfig,
    ctx: &mosaic_core::application::generator::capability::GeneratorContext,
) -> CliResult<Tasks> {
    let tasks = match generator {
        GeneratorCommand::App(args) => {
            react_application(tree, &react_schema(args, config)?, ctx)?
        }
        GeneratorCommand::NodeApp(args) => {
            node_application(tree, &node_schema(args, config)?, ctx)?
        }
        GeneratorCommand::Lib(args) => library_generator(tree, &lib_schema(args, config)?, ctx)?,
        GeneratorCommand::Host(args) => host_generator(tree, &host_schema(args, config)?, ctx)?,
        GeneratorCommand::Remote(args) => {
            remote_generator(tree, &remote_schema(args, config)?, ctx)?
        }
    };
    Ok(tasks)
}

// ── args → schemas ────────────────────────────────────────────────────────────

fn linter_of(shared: &SharedProjectArgs, config: &AppConfig) -> CliResult<Linter> {
    match shared.linter {
        Some(arg) => Ok(arg.into()),
        None => config
            .generate
            .linter
            .parse()
            .map_err(|e: mosaic_core::domain::error::DomainError| CliError::ConfigError {
                message: format!("generate.linter: {e}"),
            }),
    }
}

fn test_runner_of(shared: &SharedProjectArgs, config: &AppConfig) -> CliResult<UnitTestRunner> {
    match shared.unit_test_runner {
        Some(arg) => Ok(arg.into()),
        None => config.generate.unit_test_runner.parse().map_err(
            |e: mosaic_core::domain::error::DomainError| CliError::ConfigError {
                message: format!("generate.unit_test_runner: {e}"),
            },
        ),
    }
}

fn react_schema(args: &AppArgs, config: &AppConfig) -> CliResult<ReactApplicationSchema> {
    Ok(ReactApplicationSchema {
        name: args.shared.name.clone(),
        directory: args.shared.directory.clone(),
        tags: args.shared.tags.clone(),
        routing: args.routing,
        linter: linter_of(&args.shared, config)?,
        unit_test_runner: test_runner_of(&args.shared, config)?,
    })
}

fn node_schema(args: &NodeAppArgs, config: &AppConfig) -> CliResult<NodeApplicationSchema> {
    Ok(NodeApplicationSchema {
        name: args.shared.name.clone(),
        directory: args.shared.directory.clone(),
        tags: args.shared.tags.clone(),
        bundler: args.bundler.into(),
        framework: args.framework.into(),
        frontend_project: args.frontend_project.clone(),
        port: args.port,
        linter: linter_of(&args.shared, config)?,
        unit_test_runner: test_runner_of(&args.shared, config)?,
    })
}

fn lib_schema(args: &LibArgs, config: &AppConfig) -> CliResult<LibrarySchema> {
    Ok(LibrarySchema {
        name: args.shared.name.clone(),
        directory: args.shared.directory.clone(),
        tags: args.shared.tags.clone(),
        publishable: args.publishable,
        import_path: args.import_path.clone(),
        linter: linter_of(&args.shared, config)?,
        unit_test_runner: test_runner_of(&args.shared, config)?,
    })
}

fn host_schema(args: &HostArgs, config: &AppConfig) -> CliResult<HostSchema> {
    Ok(HostSchema {
        name: args.shared.name.clone(),
        directory: args.shared.directory.clone(),
        tags: args.shared.tags.clone(),
        remotes: args.remotes.clone(),
        linter: linter_of(&args.shared, config)?,
        unit_test_runner: test_runner_of(&args.shared, config)?,
    })
}

fn remote_schema(args: &RemoteArgs, config: &AppConfig) -> CliResult<RemoteSchema> {
    Ok(RemoteSchema {
        name: args.shared.name.clone(),
        directory: args.shared.directory.clone(),
        tags: args.shared.tags.clone(),
        host: args.host.clone(),
        linter: linter_of(&args.shared, config)?,
        unit_test_runner: test_runner_of(&args.shared, config)?,
    })
}

// ── dry-run rendering ─────────────────────────────────────────────────────────

/// Show unified diffs for files that already exist on disk.
fn print_update_diffs(
    changes: &[ChangeRecord],
    root: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    for change in changes {
        if change.kind != ChangeKind::Update {
            continue;
        }
        let Some(updated) = change.content.as_deref() else {
            continue;
        };
        let on_disk = fs::read_to_string(root.join(change.path.as_std_path())).unwrap_or_default();
        if on_disk == updated {
            continue;
        }
        output.header(&format!("--- {}", change.path))?;
        output.print(diffy::create_patch(&on_disk, updated).to_string().trim_end())?;
    }
    Ok(())
}
