//! Buildable/publishable TypeScript library generator.

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
    join_path_fragments, offset_from_root, register_path_mapping, workspace_manifest, write_json,
};
use mosaic_core::domain::error::DomainError;
use mosaic_core::domain::names::{Names, validate_project_name};
use mosaic_core::domain::project::{ProjectConfiguration, TargetConfiguration};
use mosaic_core::error::MosaicResult;

use crate::capabilities::{ESLINT_CAPABILITY, JEST_CAPABILITY};
use crate::init::init_generator;
use crate::options::{Linter, UnitTestRunner, parse_tags};
use crate::versions::TSLIB_VERSION;

/// User-supplied options, sparse.
#[derive(Debug, Clone)]
pub struct LibrarySchema {
    pub name: String,
    pub directory: Option<String>,
    pub tags: Option<String>,
    pub publishable: bool,
    pub import_path: Option<String>,
    pub linter: Linter,
    pub unit_test_runner: UnitTestRunner,
}

impl LibrarySchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: None,
            tags: None,
            publishable: false,
            import_path: None,
            linter: Linter::default(),
            unit_test_runner: UnitTestRunner::default(),
        }
    }
}

/// Fully resolved options; immutable for the rest of the run.
#[derive(Debug, Clone)]
struct NormalizedSchema {
    names: Names,
    project_name: String,
    project_root: Utf8PathBuf,
    import_path: String,
    parsed_tags: BTreeSet<String>,
    publishable: bool,
    linter: Linter,
    unit_test_runner: UnitTestRunner,
}

fn normalize_options(tree: &FsTree, schema: &LibrarySchema) -> MosaicResult<NormalizedSchema> {
    validate_project_name(&schema.name)?;
    if schema.publishable && schema.import_path.is_none() {
        return Err(DomainError::MissingRequiredOption {
            field: "importPath",
            reason: "publishable libraries need the import path they are published under".into(),
        }
        .into());
    }

    let names = Names::from_name(&schema.name);
    let manifest = workspace_manifest(tree)?;
    let (layout_dir, project_dir) =
        extract_layout_directory(schema.directory.as_deref().unwrap_or(""));
    let libs_dir = layout_dir.unwrap_or(manifest.workspace_layout.libs_dir);

    let project_directory = match project_dir {
        Some(dir) => format!("{}/{}", Names::from_name(&dir).file_name, names.file_name),
        None => names.file_name.clone(),
    };
    let project_name = project_directory.replace('/', "-");
    let project_root = join_path_fragments(&[&libs_dir, &project_directory]);
    let import_path = schema
        .import_path
        .clone()
        .unwrap_or_else(|| format!("@{}/{}", manifest.npm_scope, project_directory));

    Ok(NormalizedSchema {
        names,
        project_name,
        project_root,
        import_path,
        parsed_tags: schema.tags.as_deref().map(parse_tags).unwrap_or_default(),
        publishable: schema.publishable,
        linter: schema.linter,
        unit_test_runner: schema.unit_test_runner,
    })
}

/// Generate a TypeScript library project.
#[instrument(skip_all, fields(library = %schema.name))]
pub fn library_generator(
    tree: &mut FsTree,
    schema: &LibrarySchema,
    ctx: &GeneratorContext,
) -> MosaicResult<Tasks> {
    let options = normalize_options(tree, schema)?;
    let mut tasks = Tasks::new();

    tasks.extend(init_generator(tree)?);
    add_project(tree, &options)?;
    add_library_files(tree, &options);
    register_path_mapping(
        tree,
        &options.import_path,
        &format!("{}/src/index.ts", options.project_root),
    )?;
    if options.publishable {
        write_json(
            tree,
            &format!("{}/package.json", options.project_root),
            &json!({
                "name": options.import_path,
                "version": "0.0.1",
                "main": "./index.js",
                "types": "./index.d.ts"
            }),
        )?;
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

    tasks.push(add_dependencies_to_package_json(
        tree,
        &[("tslib", TSLIB_VERSION)],
        &[],
    )?);
    Ok(tasks)
}

fn add_project(tree: &mut FsTree, options: &NormalizedSchema) -> MosaicResult<()> {
    let mut config =
        ProjectConfiguration::library(&options.project_name, options.project_root.clone());
    config.tags = options.parsed_tags.clone();
    if options.publishable {
        config.add_target("build", build_target(options));
    }
    add_project_configuration(tree, &config)
}

fn build_target(options: &NormalizedSchema) -> TargetConfiguration {
    TargetConfiguration::new("@mosaic/js:tsc")
        .with_outputs(&["{options.outputPath}"])
        .with_option("outputPath", json!(format!("dist/{}", options.project_root)))
        .with_option(
            "main",
            json!(format!("{}/src/index.ts", options.project_root)),
        )
        .with_option(
            "tsConfig",
            json!(format!("{}/tsconfig.lib.json", options.project_root)),
        )
}

const LIBRARY_FILES: &[TemplateFile] = &[
    TemplateFile {
        path: "src/index.ts",
        content: "export * from './lib/__fileName__';\n",
    },
    TemplateFile {
        path: "src/lib/__fileName__.ts",
        content: "export function __propertyName__(): string {\n  return '__name__';\n}\n",
    },
    TemplateFile {
        path: "README.md",
        content: "# __name__\n\nThis library was generated with Mosaic.\n",
    },
    TemplateFile {
        path: "tsconfig.json",
        content: "{\n  \"extends\": \"__offsetFromRoot__tsconfig.base.json\",\n  \"compilerOptions\": {},\n  \"references\": [\n    {\n      \"path\": \"./tsconfig.lib.json\"\n    }\n  ]\n}\n",
    },
    TemplateFile {
        path: "tsconfig.lib.json",
        content: "{\n  \"extends\": \"./tsconfig.json\",\n  \"compilerOptions\": {\n    \"outDir\": \"__offsetFromRoot__dist/out-tsc\",\n    \"declaration\": true,\n    \"types\": []\n  },\n  \"include\": [\"src/**/*.ts\"]\n}\n",
    },
];

fn add_library_files(tree: &mut FsTree, options: &NormalizedSchema) {
    generate_files(
        tree,
        LIBRARY_FILES,
        options.project_root.as_str(),
        &[
            ("name", &options.project_name),
            ("fileName", &options.names.file_name),
            ("propertyName", &options.names.property_name),
            (
                "offsetFromRoot",
                &offset_from_root(options.project_root.as_str()),
            ),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_adapters::MemoryTreeSource;
    use pretty_assertions::assert_eq;

    fn empty_tree() -> FsTree {
        FsTree::new(Box::new(MemoryTreeSource::new()))
    }

    #[test]
    fn normalize_derives_root_and_import_path() {
        let tree = empty_tree();
        let options = normalize_options(&tree, &LibrarySchema::new("DataAccess")).unwrap();
        assert_eq!(options.project_name, "data-access");
        assert_eq!(options.project_root.as_str(), "libs/data-access");
        assert_eq!(options.import_path, "@workspace/data-access");
    }

    #[test]
    fn normalize_folds_the_directory_into_the_name() {
        let tree = empty_tree();
        let mut schema = LibrarySchema::new("ui");
        schema.directory = Some("shared".into());
        let options = normalize_options(&tree, &schema).unwrap();
        assert_eq!(options.project_name, "shared-ui");
        assert_eq!(options.project_root.as_str(), "libs/shared/ui");
    }

    #[test]
    fn explicit_layout_directory_wins() {
        let tree = empty_tree();
        let mut schema = LibrarySchema::new("ui");
        schema.directory = Some("libs/shared".into());
        let options = normalize_options(&tree, &schema).unwrap();
        assert_eq!(options.project_root.as_str(), "libs/shared/ui");
    }

    #[test]
    fn publishable_without_import_path_fails_before_mutation() {
        let mut tree = empty_tree();
        let mut schema = LibrarySchema::new("ui");
        schema.publishable = true;
        let err = library_generator(&mut tree, &schema, &GeneratorContext::default()).unwrap_err();
        assert!(err.to_string().contains("importPath"));
        assert!(tree.list_changes().is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let tree = empty_tree();
        let schema = LibrarySchema::new("myLib");
        let first = normalize_options(&tree, &schema).unwrap();
        let second = normalize_options(&tree, &schema).unwrap();
        assert_eq!(first.project_name, second.project_name);
        assert_eq!(first.project_root, second.project_root);
        assert_eq!(first.import_path, second.import_path);
        assert_eq!(first.names, second.names);
    }
}
