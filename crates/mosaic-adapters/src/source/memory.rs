//! In-memory tree source for testing.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use camino::{Utf8Path, Utf8PathBuf};

use mosaic_core::application::error::WorkspaceError;
use mosaic_core::application::ports::TreeSource;
use mosaic_core::error::MosaicResult;

/// In-memory workspace source. Cloning shares the underlying files, so a
/// test can keep a handle while the tree owns the boxed source.
#[derive(Debug, Clone, Default)]
pub struct MemoryTreeSource {
    inner: Arc<RwLock<BTreeMap<Utf8PathBuf, String>>>,
}

impl MemoryTreeSource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source pre-populated with `files`.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let source = Self::new();
        for (path, content) in files {
            source.insert_file(path, content);
        }
        source
    }

    /// Insert or replace a file (testing helper).
    pub fn insert_file(&self, path: &str, content: &str) {
        let mut inner = self.inner.write().unwrap();
        inner.insert(Utf8PathBuf::from(path), content.to_string());
    }

    /// All file paths, sorted (testing helper).
    pub fn file_paths(&self) -> Vec<Utf8PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.keys().cloned().collect()
    }

    /// Remove every file (testing helper).
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.clear();
    }
}

impl TreeSource for MemoryTreeSource {
    fn read(&self, path: &Utf8Path) -> MosaicResult<Option<String>> {
        let inner = self.inner.read().map_err(|_| WorkspaceError::Source {
            path: path.to_string(),
            reason: "memory source lock poisoned".to_string(),
        })?;
        Ok(inner.get(path).cloned())
    }

    fn is_file(&self, path: &Utf8Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains_key(path))
            .unwrap_or(false)
    }

    fn children(&self, dir: &Utf8Path) -> Vec<String> {
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        let mut names = BTreeSet::new();
        for key in inner.keys() {
            let rest = if dir.as_str().is_empty() {
                Some(key.as_path())
            } else {
                key.strip_prefix(dir).ok()
            };
            if let Some(rest) = rest {
                if let Some(first) = rest.components().next() {
                    names.insert(first.as_str().to_string());
                }
            }
        }
        names.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clones_share_files() {
        let source = MemoryTreeSource::new();
        let handle = source.clone();
        source.insert_file("a.txt", "x");
        assert!(handle.is_file(Utf8Path::new("a.txt")));
    }

    #[test]
    fn children_are_derived_from_paths() {
        let source = MemoryTreeSource::with_files(&[
            ("libs/a/index.ts", ""),
            ("libs/b/index.ts", ""),
            ("package.json", "{}"),
        ]);
        assert_eq!(source.children(Utf8Path::new("")), vec!["libs", "package.json"]);
        assert_eq!(source.children(Utf8Path::new("libs")), vec!["a", "b"]);
    }
}
