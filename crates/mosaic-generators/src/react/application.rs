//! React application generator.

use std::collections::BTreeSet;

use camino::Utf8PathBuf;
use serde_json::json;
use tracing::instrument;

use mosaic_core::application::generator::capability::{CapabilityOptions, GeneratorContext};
use mosaic_core::application::generator::task::Tasks;
use mosaic_core::application::registry::add_project_configuration;
use mosaic_core::application::tree::FsTree;
use mosaic_core::application::workspace::{
    TemplateFile, add_dependencies_to_package_json, extract_layout_directory, generate_files,
    join_path_fragments, offset_from_root, workspace_manifest,
};
use mosaic_core::domain::names::{Names, validate_project_name};
use mosaic_core::domain::project::{ProjectConfiguration, TargetConfiguration};
use mosaic_core::error::MosaicResult;

use crate::capabilities::{ESLINT_CAPABILITY, JEST_CAPABILITY};
use crate::init::init_generator;
use crate::options::{Linter, UnitTestRunner, parse_tags};
use crate::react::routes::add_initial_routes;
use crate::versions::{
    REACT_DOM_VERSION, REACT_ROUTER_DOM_VERSION, REACT_VERSION, TYPES_REACT_DOM_VERSION,
    TYPES_REACT_VERSION,
};

/// User-supplied options, sparse.
#[derive(Debug, Clone)]
pub struct ReactApplicationSchema {
    pub name: String,
    pub directory: Option<String>,
    pub tags: Option<String>,
    pub routing: bool,
    pub linter: Linter,
    pub unit_test_runner: UnitTestRunner,
}

impl ReactApplicationSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: None,
            tags: None,
            routing: false,
            linter: Linter::default(),
            unit_test_runner: UnitTestRunner::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NormalizedSchema {
    pub(crate) names: Names,
    pub(crate) project_name: String,
    pub(crate) project_root: Utf8PathBuf,
    parsed_tags: BTreeSet<String>,
    routing: bool,
    linter: Linter,
    unit_test_runner: UnitTestRunner,
}

pub(crate) fn normalize_options(
    tree: &FsTree,
    schema: &ReactApplicationSchema,
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
        routing: schema.routing,
        linter: schema.linter,
        unit_test_runner: schema.unit_test_runner,
    })
}

/// Generate a React application project.
#[instrument(skip_all, fields(application = %schema.name))]
pub fn application_generator(
    tree: &mut FsTree,
    schema: &ReactApplicationSchema,
    ctx: &GeneratorContext,
) -> MosaicResult<Tasks> {
    let options = normalize_options(tree, schema)?;
    let mut tasks = Tasks::new();

    tasks.extend(init_generator(tree)?);
    tasks.push(add_dependencies_to_package_json(
        tree,
        &react_dependencies(&options),
        &[
            ("@types/react", TYPES_REACT_VERSION),
            ("@types/react-dom", TYPES_REACT_DOM_VERSION),
        ],
    )?);
    add_app_files(tree, &options);
    add_project(tree, &options)?;

    if options.routing {
        add_initial_routes(tree, &format!("{}/src/app/app.tsx", options.project_root))?;
    }

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

    Ok(tasks)
}

fn react_dependencies(options: &NormalizedSchema) -> Vec<(&'static str, &'static str)> {
    let mut deps = vec![
        ("react", REACT_VERSION),
        ("react-dom", REACT_DOM_VERSION),
    ];
    if options.routing {
        deps.push(("react-router-dom", REACT_ROUTER_DOM_VERSION));
    }
    deps
}

fn add_project(tree: &mut FsTree, options: &NormalizedSchema) -> MosaicResult<()> {
    let mut config =
        ProjectConfiguration::application(&options.project_name, options.project_root.clone());
    config.tags = options.parsed_tags.clone();
    config.add_target(
        "build",
        TargetConfiguration::new("@mosaic/webpack:webpack")
            .with_outputs(&["{options.outputPath}"])
            .with_option("outputPath", json!(format!("dist/{}", options.project_root)))
            .with_option(
                "index",
                json!(format!("{}/src/index.html", options.project_root)),
            )
            .with_option(
                "main",
                json!(format!("{}/src/main.tsx", options.project_root)),
            )
            .with_option(
                "tsConfig",
                json!(format!("{}/tsconfig.app.json", options.project_root)),
            ),
    );
    config.add_target(
        "serve",
        TargetConfiguration::new("@mosaic/webpack:dev-server").with_option(
            "buildTarget",
            json!(format!("{}:build", options.project_name)),
        ),
    );
    add_project_configuration(tree, &config)
}

const APP_FILES: &[TemplateFile] = &[
    TemplateFile {
        path: "src/index.html",
        content: "<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"utf-8\" />\n    <title>__name__</title>\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n  </head>\n  <body>\n    <div id=\"root\"></div>\n  </body>\n</html>\n",
    },
    TemplateFile {
        path: "src/main.tsx",
        content: "import { StrictMode } from 'react';\nimport * as ReactDOM from 'react-dom/client';\n\nimport App from './app/app';\n\nconst root = ReactDOM.createRoot(\n  document.getElementById('root') as HTMLElement\n);\nroot.render(\n  <StrictMode>\n    <App />\n  </StrictMode>\n);\n",
    },
    TemplateFile {
        path: "src/app/app.tsx",
        content: "export function App() {\n  return (\n    <div>\n      <h1>Welcome __name__</h1>\n    </div>\n  );\n}\n\nexport default App;\n",
    },
    TemplateFile {
        path: "tsconfig.json",
        content: "{\n  \"extends\": \"__offsetFromRoot__tsconfig.base.json\",\n  \"compilerOptions\": {\n    \"jsx\": \"react-jsx\",\n    \"allowJs\": false\n  },\n  \"references\": [\n    {\n      \"path\": \"./tsconfig.app.json\"\n    }\n  ]\n}\n",
    },
    TemplateFile {
        path: "tsconfig.app.json",
        content: "{\n  \"extends\": \"./tsconfig.json\",\n  \"compilerOptions\": {\n    \"outDir\": \"__offsetFromRoot__dist/out-tsc\",\n    \"types\": []\n  },\n  \"include\": [\"src/**/*.ts\", \"src/**/*.tsx\"]\n}\n",
    },
];

fn add_app_files(tree: &mut FsTree, options: &NormalizedSchema) {
    generate_files(
        tree,
        APP_FILES,
        options.project_root.as_str(),
        &[
            ("name", &options.project_name),
            (
                "offsetFromRoot",
                &offset_from_root(options.project_root.as_str()),
            ),
        ],
    );
}
