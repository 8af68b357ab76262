//! Workspace-level helpers shared by every generator: path arithmetic,
//! manifest access, dependency updates, path mappings and formatting.

pub mod format;
pub mod json;
pub mod layout;
pub mod package_json;
pub mod path_mapping;
pub mod paths;
pub mod templates;

pub use format::format_files;
pub use json::{read_json, update_json, write_json};
pub use layout::{WORKSPACE_MANIFEST, WorkspaceLayout, WorkspaceManifest, workspace_manifest};
pub use package_json::{
    PACKAGE_MANIFEST, add_dependencies_to_package_json, remove_dependencies_from_package_json,
};
pub use path_mapping::{TSCONFIG_BASE, register_path_mapping};
pub use paths::{extract_layout_directory, join_path_fragments, normalize_path, offset_from_root};
pub use templates::{TemplateFile, generate_files};
