//! Workspace path arithmetic.
//!
//! Tree paths are workspace-relative UTF-8 strings with forward slashes.
//! Normalization is total: it never fails, it only cleans.

use camino::Utf8PathBuf;

/// Normalize a path to the tree's canonical form: forward slashes, no
/// leading `./` or `/`, no empty or `.` segments, `..` resolved by
/// popping (saturating at the root).
pub fn normalize_path(path: &str) -> Utf8PathBuf {
    let path = path.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    Utf8PathBuf::from(segments.join("/"))
}

/// Join fragments into one normalized path.
pub fn join_path_fragments(fragments: &[&str]) -> Utf8PathBuf {
    normalize_path(&fragments.join("/"))
}

/// The `../` chain that leads from `root` back to the workspace root,
/// e.g. `apps/shop` -> `"../../"`. The workspace root itself yields `"./"`.
pub fn offset_from_root(root: &str) -> String {
    let normalized = normalize_path(root);
    if normalized.as_str().is_empty() {
        return "./".to_string();
    }
    "../".repeat(normalized.components().count())
}

/// Split a user-supplied directory into an explicit layout directory
/// (`apps` / `libs`) and the remaining project directory.
///
/// `"apps/retail"` -> `(Some("apps"), Some("retail"))`, `"retail"` ->
/// `(None, Some("retail"))`, `""` -> `(None, None)`.
pub fn extract_layout_directory(directory: &str) -> (Option<String>, Option<String>) {
    let normalized = normalize_path(directory);
    let raw = normalized.as_str();
    if raw.is_empty() {
        return (None, None);
    }
    for layout in ["apps", "libs"] {
        if raw == layout {
            return (Some(layout.to_string()), None);
        }
        if let Some(rest) = raw.strip_prefix(&format!("{layout}/")) {
            return (Some(layout.to_string()), Some(rest.to_string()));
        }
    }
    (None, Some(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_cleans_dots_and_duplicate_slashes() {
        assert_eq!(normalize_path("./a//b/./c").as_str(), "a/b/c");
        assert_eq!(normalize_path("/a/b").as_str(), "a/b");
        assert_eq!(normalize_path("a/b/../c").as_str(), "a/c");
        assert_eq!(normalize_path("..").as_str(), "");
    }

    #[test]
    fn normalize_accepts_backslashes() {
        assert_eq!(normalize_path("a\\b\\c").as_str(), "a/b/c");
    }

    #[test]
    fn join_fragments_normalizes() {
        assert_eq!(join_path_fragments(&["libs", "", "ui"]).as_str(), "libs/ui");
    }

    #[test]
    fn offset_from_root_counts_depth() {
        assert_eq!(offset_from_root(""), "./");
        assert_eq!(offset_from_root("apps/shop"), "../../");
        assert_eq!(offset_from_root("libs/shared/ui"), "../../../");
    }

    #[test]
    fn layout_directory_is_extracted() {
        assert_eq!(
            extract_layout_directory("apps/retail"),
            (Some("apps".into()), Some("retail".into()))
        );
        assert_eq!(
            extract_layout_directory("libs"),
            (Some("libs".into()), None)
        );
        assert_eq!(
            extract_layout_directory("retail/checkout"),
            (None, Some("retail/checkout".into()))
        );
        assert_eq!(extract_layout_directory(""), (None, None));
    }
}
