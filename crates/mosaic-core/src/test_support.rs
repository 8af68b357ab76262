//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};

use crate::application::ports::TreeSource;
use crate::application::tree::FsTree;
use crate::error::MosaicResult;

/// Immutable map-backed tree source.
#[derive(Debug, Default)]
pub struct StaticSource {
    files: BTreeMap<Utf8PathBuf, String>,
}

impl StaticSource {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, content)| (Utf8PathBuf::from(*path), content.to_string()))
                .collect(),
        }
    }
}

impl TreeSource for StaticSource {
    fn read(&self, path: &Utf8Path) -> MosaicResult<Option<String>> {
        Ok(self.files.get(path).cloned())
    }

    fn is_file(&self, path: &Utf8Path) -> bool {
        self.files.contains_key(path)
    }

    fn children(&self, dir: &Utf8Path) -> Vec<String> {
        let mut names = std::collections::BTreeSet::new();
        for key in self.files.keys() {
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

/// A tree over an empty source.
pub fn empty_tree() -> FsTree {
    FsTree::new(Box::new(StaticSource::default()))
}

/// A tree whose source already contains `files`.
pub fn tree_with_files(files: &[(&str, &str)]) -> FsTree {
    FsTree::new(Box::new(StaticSource::new(files)))
}
