//! Disk-backed tree source.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use camino::Utf8Path;

use mosaic_core::application::error::WorkspaceError;
use mosaic_core::application::ports::TreeSource;
use mosaic_core::error::MosaicResult;

/// Read-only view of the real workspace on disk.
///
/// All paths handed to the trait methods are workspace-relative; this
/// adapter anchors them at the workspace root it was built with. Mutation
/// never goes through here — the tree records changes in memory and
/// [`crate::commit::flush_changes`] writes them out at the end.
#[derive(Debug, Clone)]
pub struct LocalTreeSource {
    root: PathBuf,
}

impl LocalTreeSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Utf8Path) -> PathBuf {
        self.root.join(path.as_std_path())
    }
}

impl TreeSource for LocalTreeSource {
    fn read(&self, path: &Utf8Path) -> MosaicResult<Option<String>> {
        match fs::read_to_string(self.resolve(path)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            // A directory is "no file here", not an error.
            Err(_) if self.resolve(path).is_dir() => Ok(None),
            Err(e) => Err(WorkspaceError::Source {
                path: path.to_string(),
                reason: e.to_string(),
            }
            .into()),
        }
    }

    fn is_file(&self, path: &Utf8Path) -> bool {
        self.resolve(path).is_file()
    }

    fn children(&self, dir: &Utf8Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.resolve(dir)) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> (tempfile::TempDir, LocalTreeSource) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("libs/ui/src")).unwrap();
        fs::write(dir.path().join("package.json"), "{}\n").unwrap();
        fs::write(dir.path().join("libs/ui/src/index.ts"), "export {};\n").unwrap();
        let source = LocalTreeSource::new(dir.path());
        (dir, source)
    }

    #[test]
    fn reads_existing_files() {
        let (_dir, source) = fixture();
        let content = source.read(Utf8Path::new("package.json")).unwrap();
        assert_eq!(content.as_deref(), Some("{}\n"));
    }

    #[test]
    fn missing_files_read_as_none() {
        let (_dir, source) = fixture();
        assert_eq!(source.read(Utf8Path::new("nope.json")).unwrap(), None);
        assert!(!source.is_file(Utf8Path::new("nope.json")));
    }

    #[test]
    fn directories_are_not_files() {
        let (_dir, source) = fixture();
        assert!(!source.is_file(Utf8Path::new("libs")));
        assert_eq!(source.read(Utf8Path::new("libs")).unwrap(), None);
    }

    #[test]
    fn children_list_both_files_and_dirs() {
        let (_dir, source) = fixture();
        assert_eq!(source.children(Utf8Path::new("")), vec!["libs", "package.json"]);
        assert_eq!(source.children(Utf8Path::new("libs/ui")), vec!["src"]);
        assert!(source.children(Utf8Path::new("missing")).is_empty());
    }
}
