//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names,
//! aliases, help text and value enums. No business logic lives here; the
//! command handlers translate these args into generator schemas.

use clap::{Args, Parser, Subcommand, ValueEnum};

use mosaic_generators::options::{Bundler, Linter, NodeFramework, UnitTestRunner};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "mosaic",
    bin_name = "mosaic",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Monorepo code generation",
    long_about = "Mosaic scaffolds and rewires JS/TS monorepo workspaces: \
                  applications, libraries and module-federation setups \
                  under one set of shared conventions.",
    after_help = "EXAMPLES:\n\
        \x20 mosaic init --npm-scope acme\n\
        \x20 mosaic generate app storefront --routing\n\
        \x20 mosaic generate lib data-access --directory shared\n\
        \x20 mosaic generate host dashboard --remotes shop,cart\n\
        \x20 mosaic list",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a generator against the workspace.
    #[command(
        visible_alias = "g",
        about = "Run a generator",
        after_help = "EXAMPLES:\n\
            \x20 mosaic generate app storefront --routing\n\
            \x20 mosaic generate node-app api --frontend-project storefront\n\
            \x20 mosaic generate lib ui --directory shared --tags scope:shared\n\
            \x20 mosaic generate remote shop --host dashboard\n\
            \x20 mosaic generate lib billing --dry-run"
    )]
    Generate(GenerateArgs),

    /// List the projects in the workspace.
    #[command(visible_alias = "ls", about = "List workspace projects")]
    List(ListArgs),

    /// Initialise the workspace manifests.
    #[command(
        about = "Initialise a workspace",
        after_help = "EXAMPLES:\n\
            \x20 mosaic init\n\
            \x20 mosaic init --npm-scope acme --apps-dir applications"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 mosaic completions bash > ~/.local/share/bash-completion/completions/mosaic\n\
            \x20 mosaic completions zsh  > ~/.zfunc/_mosaic"
    )]
    Completions(CompletionsArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `mosaic generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Print the pending changes (with diffs for updates) without writing.
    #[arg(long = "dry-run", global = true, help = "Preview changes without writing")]
    pub dry_run: bool,

    #[command(subcommand)]
    pub generator: GeneratorCommand,
}

/// The built-in generators.
#[derive(Debug, Subcommand)]
pub enum GeneratorCommand {
    /// React application.
    App(AppArgs),
    /// Node application.
    NodeApp(NodeAppArgs),
    /// TypeScript library.
    Lib(LibArgs),
    /// Module-federation host application.
    Host(HostArgs),
    /// Module-federation remote application.
    Remote(RemoteArgs),
}

/// Options shared by every project generator.
#[derive(Debug, Args)]
pub struct SharedProjectArgs {
    /// Project name.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Directory below the layout root, e.g. `shared` or `libs/shared`.
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    pub directory: Option<String>,

    /// Comma-separated tags attached to the project configuration.
    #[arg(long = "tags", value_name = "TAGS")]
    pub tags: Option<String>,

    /// Linter to wire up (default from config).
    #[arg(long = "linter", value_enum)]
    pub linter: Option<LinterArg>,

    /// Unit test runner to wire up (default from config).
    #[arg(long = "unit-test-runner", value_enum)]
    pub unit_test_runner: Option<TestRunnerArg>,
}

/// Arguments for `mosaic generate app`.
#[derive(Debug, Args)]
pub struct AppArgs {
    #[command(flatten)]
    pub shared: SharedProjectArgs,

    /// Generate starter routes and navigation.
    #[arg(long = "routing", help = "Add starter routes")]
    pub routing: bool,
}

/// Arguments for `mosaic generate node-app`.
#[derive(Debug, Args)]
pub struct NodeAppArgs {
    #[command(flatten)]
    pub shared: SharedProjectArgs,

    /// Bundler for the build target.
    #[arg(long = "bundler", value_enum, default_value = "esbuild")]
    pub bundler: BundlerArg,

    /// HTTP framework for the generated entry point.
    #[arg(long = "framework", value_enum, default_value = "express")]
    pub framework: FrameworkArg,

    /// Frontend project whose dev server should proxy to this app.
    #[arg(long = "frontend-project", value_name = "PROJECT")]
    pub frontend_project: Option<String>,

    /// Port the generated server listens on.
    #[arg(long = "port", default_value_t = 3000)]
    pub port: u16,
}

/// Arguments for `mosaic generate lib`.
#[derive(Debug, Args)]
pub struct LibArgs {
    #[command(flatten)]
    pub shared: SharedProjectArgs,

    /// Mark the library publishable (requires --import-path).
    #[arg(long = "publishable")]
    pub publishable: bool,

    /// Public import path, e.g. `@acme/ui`.
    #[arg(long = "import-path", value_name = "PATH")]
    pub import_path: Option<String>,
}

/// Arguments for `mosaic generate host`.
#[derive(Debug, Args)]
pub struct HostArgs {
    #[command(flatten)]
    pub shared: SharedProjectArgs,

    /// Remotes to generate and register immediately.
    #[arg(long = "remotes", value_name = "NAMES", value_delimiter = ',')]
    pub remotes: Vec<String>,
}

/// Arguments for `mosaic generate remote`.
#[derive(Debug, Args)]
pub struct RemoteArgs {
    #[command(flatten)]
    pub shared: SharedProjectArgs,

    /// Host application to register this remote with.
    #[arg(long = "host", value_name = "PROJECT")]
    pub host: Option<String>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `mosaic list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One project name per line.
    Names,
    /// JSON object keyed by project name.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `mosaic init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// npm scope used for default library import paths.
    #[arg(long = "npm-scope", value_name = "SCOPE")]
    pub npm_scope: Option<String>,

    /// Directory applications are generated into.
    #[arg(long = "apps-dir", value_name = "DIR")]
    pub apps_dir: Option<String>,

    /// Directory libraries are generated into.
    #[arg(long = "libs-dir", value_name = "DIR")]
    pub libs_dir: Option<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `mosaic completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Linter choice at the CLI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LinterArg {
    Eslint,
    None,
}

impl From<LinterArg> for Linter {
    fn from(arg: LinterArg) -> Self {
        match arg {
            LinterArg::Eslint => Linter::Eslint,
            LinterArg::None => Linter::None,
        }
    }
}

/// Unit test runner choice at the CLI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TestRunnerArg {
    Jest,
    None,
}

impl From<TestRunnerArg> for UnitTestRunner {
    fn from(arg: TestRunnerArg) -> Self {
        match arg {
            TestRunnerArg::Jest => UnitTestRunner::Jest,
            TestRunnerArg::None => UnitTestRunner::None,
        }
    }
}

/// Bundler choice at the CLI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum BundlerArg {
    Esbuild,
    Webpack,
}

impl From<BundlerArg> for Bundler {
    fn from(arg: BundlerArg) -> Self {
        match arg {
            BundlerArg::Esbuild => Bundler::Esbuild,
            BundlerArg::Webpack => Bundler::Webpack,
        }
    }
}

/// Node framework choice at the CLI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FrameworkArg {
    Express,
    Fastify,
    Koa,
    None,
}

impl From<FrameworkArg> for NodeFramework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Express => NodeFramework::Express,
            FrameworkArg::Fastify => NodeFramework::Fastify,
            FrameworkArg::Koa => NodeFramework::Koa,
            FrameworkArg::None => NodeFramework::None,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
