//! Node application generator.

use std::collections::BTreeSet;

use camino::Utf8PathBuf;
use serde_json::json;
use tracing::{instrument, warn};

use mosaic_core::application::generator::capability::{CapabilityOptions, GeneratorContext};
use mosaic_core::application::generator::task::{GeneratorTask, Tasks};
use mosaic_core::application::registry::{
    add_project_configuration, read_project_configuration, update_project_configuration,
};
use mosaic_core::application::tree::FsTree;
use mosaic_core::application::workspace::{
    TemplateFile, add_dependencies_to_package_json, extract_layout_directory, generate_files,
    join_path_fragments, offset_from_root, workspace_manifest, write_json,
};
use mosaic_core::domain::names::{Names, validate_project_name};
use mosaic_core::domain::project::{ProjectConfiguration, TargetConfiguration};
use mosaic_core::error::MosaicResult;

use crate::capabilities::{ESLINT_CAPABILITY, JEST_CAPABILITY};
use crate::init::init_generator;
use crate::options::{Bundler, Linter, NodeFramework, UnitTestRunner, parse_tags};
use crate::versions::{
    ESBUILD_VERSION, EXPRESS_VERSION, FASTIFY_VERSION, KOA_VERSION, TYPES_EXPRESS_VERSION,
    TYPES_KOA_VERSION, WEBPACK_VERSION,
};

/// User-supplied options, sparse.
#[derive(Debug, Clone)]
pub struct NodeApplicationSchema {
    pub name: String,
    pub directory: Option<String>,
    pub tags: Option<String>,
    pub bundler: Bundler,
    pub framework: NodeFramework,
    /// Existing frontend project whose dev server should proxy `/api`
    /// calls to this application.
    pub frontend_project: Option<String>,
    pub port: u16,
    pub linter: Linter,
    pub unit_test_runner: UnitTestRunner,
}

impl NodeApplicationSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: None,
            tags: None,
            bundler: Bundler::default(),
            framework: NodeFramework::default(),
            frontend_project: None,
            port: 3000,
            linter: Linter::default(),
            unit_test_runner: UnitTestRunner::default(),
        }
    }
}

#[derive(Debug, Clone)]
struct NormalizedSchema {
    names: Names,
    project_name: String,
    project_root: Utf8PathBuf,
    parsed_tags: BTreeSet<String>,
    bundler: Bundler,
    framework: NodeFramework,
    frontend_project: Option<String>,
    port: u16,
    linter: Linter,
    unit_test_runner: UnitTestRunner,
}

fn normalize_options(
    tree: &FsTree,
    schema: &NodeApplicationSchema,
) -> MosaicResult<NormalizedSchema> {
    validate_project_name(&schema.name)?;
    let names = Names::from_name(&schema.name);
    let manifest = workspace_manifest(tree)?;
    let (layout_dir, project_dir) =
        extract_layout_directory(schema.directory.as_deref().unwrap_or(""));
    let apps_dir = layout_dir.unwrap_or(manifest.workspace_layout.apps_dir);

    let project_directory = match project_dir {
        Some(dir) => format!("{}/{}", Names::from_name(&dir).file_name, names.file_name),
        None => names.file_name.clone(),
    };
    let project_name = project_directory.replace('/', "-");
    let project_root = join_path_fragments(&[&apps_dir, &project_directory]);

    Ok(NormalizedSchema {
        names,
        project_name,
        project_root,
        parsed_tags: schema.tags.as_deref().map(parse_tags).unwrap_or_default(),
        bundler: schema.bundler,
        framework: schema.framework,
        frontend_project: schema
            .frontend_project
            .as_deref()
            .map(|name| Names::from_name(name).file_name),
        port: schema.port,
        linter: schema.linter,
        unit_test_runner: schema.unit_test_runner,
    })
}

/// Generate a Node application project.
#[instrument(skip_all, fields(application = %schema.name))]
pub fn application_generator(
    tree: &mut FsTree,
    schema: &NodeApplicationSchema,
    ctx: &GeneratorContext,
) -> MosaicResult<Tasks> {
    let options = normalize_options(tree, schema)?;
    let mut tasks = Tasks::new();

    tasks.extend(init_generator(tree)?);
    tasks.push(add_project_dependencies(tree, &options)?);
    add_app_files(tree, &options);
    add_project(tree, &options)?;

    if options.linter == Linter::Eslint {
        let lint = ctx.capabilities.resolve(ESLINT_CAPABILITY)?;
        tasks.extend(lint(
            tree,
            &CapabilityOptions::for_project(&options.project_name),
            ctx,
        )?);
    }
    if options.unit_test_runner == UnitTestRunner::Jest {
        let jest = ctx.capabilities.resolve(JEST_CAPABILITY)?;
        tasks.extend(jest(
            tree,
            &CapabilityOptions::for_project(&options.project_name),
            ctx,
        )?);
    }

    if let Some(frontend) = options.frontend_project.clone() {
        add_proxy(tree, &options, &frontend)?;
    }

    Ok(tasks)
}

fn add_project(tree: &mut FsTree, options: &NormalizedSchema) -> MosaicResult<()> {
    let mut config =
        ProjectConfiguration::application(&options.project_name, options.project_root.clone());
    config.tags = options.parsed_tags.clone();
    config.add_target(
        "build",
        match options.bundler {
            Bundler::Esbuild => esbuild_build_target(options),
            Bundler::Webpack => webpack_build_target(options),
        },
    );
    config.add_target("serve", serve_target(options));
    add_project_configuration(tree, &config)
}

fn esbuild_build_target(options: &NormalizedSchema) -> TargetConfiguration {
    TargetConfiguration::new("@mosaic/esbuild:esbuild")
        .with_outputs(&["{options.outputPath}"])
        .with_option("outputPath", json!(format!("dist/{}", options.project_root)))
        .with_option("format", json!(["cjs"]))
        .with_option(
            "main",
            json!(format!("{}/src/main.ts", options.project_root)),
        )
        .with_option(
            "tsConfig",
            json!(format!("{}/tsconfig.app.json", options.project_root)),
        )
}

fn webpack_build_target(options: &NormalizedSchema) -> TargetConfiguration {
    let production = serde_json::Map::from_iter([
        ("optimization".to_string(), json!(true)),
        ("extractLicenses".to_string(), json!(true)),
        ("inspect".to_string(), json!(false)),
    ]);
    TargetConfiguration::new("@mosaic/webpack:webpack")
        .with_outputs(&["{options.outputPath}"])
        .with_option("target", json!("node"))
        .with_option("compiler", json!("tsc"))
        .with_option("outputPath", json!(format!("dist/{}", options.project_root)))
        .with_option(
            "main",
            json!(format!("{}/src/main.ts", options.project_root)),
        )
        .with_option(
            "tsConfig",
            json!(format!("{}/tsconfig.app.json", options.project_root)),
        )
        .with_option(
            "webpackConfig",
            json!(format!("{}/webpack.config.js", options.project_root)),
        )
        .with_configuration("production", production)
}

fn serve_target(options: &NormalizedSchema) -> TargetConfiguration {
    let production = serde_json::Map::from_iter([(
        "buildTarget".to_string(),
        json!(format!("{}:build:production", options.project_name)),
    )]);
    TargetConfiguration::new("@mosaic/js:node")
        .with_option(
            "buildTarget",
            json!(format!("{}:build", options.project_name)),
        )
        .with_configuration("production", production)
}

const COMMON_FILES: &[TemplateFile] = &[
    TemplateFile {
        path: "tsconfig.json",
        content: "{\n  \"extends\": \"__offsetFromRoot__tsconfig.base.json\",\n  \"compilerOptions\": {\n    \"esModuleInterop\": true\n  },\n  \"references\": [\n    {\n      \"path\": \"./tsconfig.app.json\"\n    }\n  ]\n}\n",
    },
    TemplateFile {
        path: "tsconfig.app.json",
        content: "{\n  \"extends\": \"./tsconfig.json\",\n  \"compilerOptions\": {\n    \"outDir\": \"__offsetFromRoot__dist/out-tsc\",\n    \"module\": \"commonjs\",\n    \"types\": [\"node\"]\n  },\n  \"include\": [\"src/**/*.ts\"]\n}\n",
    },
    TemplateFile {
        path: "webpack.config.js",
        content: "const { composePlugins, withNode } = require('@mosaic/webpack');\n\nmodule.exports = composePlugins(withNode(), (config) => {\n  return config;\n});\n",
    },
];

fn add_app_files(tree: &mut FsTree, options: &NormalizedSchema) {
    generate_files(
        tree,
        COMMON_FILES,
        options.project_root.as_str(),
        &[
            ("name", &options.project_name),
            (
                "offsetFromRoot",
                &offset_from_root(options.project_root.as_str()),
            ),
        ],
    );
    tree.write(
        &format!("{}/src/main.ts", options.project_root),
        main_file(options),
    );
    if options.bundler != Bundler::Webpack {
        // The common template set always carries a webpack config; other
        // bundlers drop it again. Harmless when another generator already
        // removed it.
        tree.delete(&format!("{}/webpack.config.js", options.project_root));
    }
}

fn main_file(options: &NormalizedSchema) -> String {
    let port = options.port;
    match options.framework {
        NodeFramework::Express => format!(
            "import express from 'express';\n\nconst app = express();\n\napp.get('/api', (req, res) => {{\n  res.send({{ message: 'Welcome to {name}!' }});\n}});\n\nconst port = process.env.PORT || {port};\napp.listen(port, () => {{\n  console.log(`Listening at http://localhost:${{port}}/api`);\n}});\n",
            name = options.names.name,
        ),
        NodeFramework::Fastify => format!(
            "import Fastify from 'fastify';\n\nconst server = Fastify();\n\nserver.get('/api', async () => {{\n  return {{ message: 'Welcome to {name}!' }};\n}});\n\nserver.listen({{ port: {port} }}, (err) => {{\n  if (err) {{\n    server.log.error(err);\n    process.exit(1);\n  }}\n}});\n",
            name = options.names.name,
        ),
        NodeFramework::Koa => format!(
            "import Koa from 'koa';\n\nconst app = new Koa();\n\napp.use(async (ctx) => {{\n  ctx.body = {{ message: 'Welcome to {name}!' }};\n}});\n\napp.listen({port});\n",
            name = options.names.name,
        ),
        NodeFramework::None => format!(
            "console.log('Welcome to {name}, listening on port {port}');\n",
            name = options.names.name,
        ),
    }
}

fn add_project_dependencies(
    tree: &mut FsTree,
    options: &NormalizedSchema,
) -> MosaicResult<GeneratorTask> {
    let deps: &[(&str, &str)] = match options.framework {
        NodeFramework::Express => &[("express", EXPRESS_VERSION)],
        NodeFramework::Fastify => &[("fastify", FASTIFY_VERSION)],
        NodeFramework::Koa => &[("koa", KOA_VERSION)],
        NodeFramework::None => &[],
    };
    let mut dev_deps: Vec<(&str, &str)> = match options.framework {
        NodeFramework::Express => vec![("@types/express", TYPES_EXPRESS_VERSION)],
        NodeFramework::Koa => vec![("@types/koa", TYPES_KOA_VERSION)],
        NodeFramework::Fastify | NodeFramework::None => Vec::new(),
    };
    dev_deps.push(match options.bundler {
        Bundler::Esbuild => ("esbuild", ESBUILD_VERSION),
        Bundler::Webpack => ("webpack", WEBPACK_VERSION),
    });
    add_dependencies_to_package_json(tree, deps, &dev_deps)
}

/// Point an existing frontend project's dev server at this application.
fn add_proxy(tree: &mut FsTree, options: &NormalizedSchema, frontend: &str) -> MosaicResult<()> {
    let mut config = read_project_configuration(tree, frontend)?;
    let Some(serve) = config.targets.get_mut("serve") else {
        warn!(frontend, "frontend project has no serve target; skipping proxy setup");
        return Ok(());
    };

    let proxy_path = format!("{}/proxy.conf.json", config.root);
    serve
        .options
        .insert("proxyConfig".to_string(), json!(proxy_path));

    let target = json!({
        "target": format!("http://localhost:{}", options.port),
        "secure": false
    });
    if tree.is_file(&proxy_path) {
        let mut proxy: serde_json::Value =
            mosaic_core::application::workspace::read_json(tree, &proxy_path)?;
        if let Some(map) = proxy.as_object_mut() {
            map.insert(format!("/{}-api", options.project_name), target);
        }
        write_json(tree, &proxy_path, &proxy)?;
    } else {
        write_json(tree, &proxy_path, &json!({ "/api": target }))?;
    }

    update_project_configuration(tree, &config)
}
