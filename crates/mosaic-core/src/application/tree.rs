//! The in-memory workspace tree.
//!
//! [`FsTree`] is a mutation-tracking overlay over a read-only
//! [`TreeSource`]: generators create, update and delete files freely, and
//! nothing touches the real tree until the recorded changes are flushed by
//! an adapter. The source is consulted once per path, on first access,
//! then cached.
//!
//! Mutation semantics:
//! - later writes win;
//! - delete followed by write reinstates the path as updated;
//! - create followed by delete collapses to no recorded change;
//! - delete of a path that exists nowhere is a silent no-op, so two
//!   generators may both remove the same scaffold file.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::trace;

use crate::application::error::WorkspaceError;
use crate::application::ports::TreeSource;
use crate::application::workspace::paths::normalize_path;
use crate::domain::change::{ChangeKind, ChangeRecord};
use crate::error::MosaicResult;

/// The single shared mutable resource of a generator run.
pub struct FsTree {
    source: Box<dyn TreeSource>,
    overlay: HashMap<Utf8PathBuf, Overlay>,
    /// First-mutation order of overlay paths; the authoritative change order.
    order: Vec<Utf8PathBuf>,
    /// Cache of source reads, so each underlying path is read at most once.
    source_cache: RefCell<HashMap<Utf8PathBuf, Option<String>>>,
}

#[derive(Debug, Clone)]
struct Overlay {
    /// `None` marks a deletion.
    content: Option<String>,
    /// No file existed in the source when this path was first mutated.
    created: bool,
}

impl FsTree {
    pub fn new(source: Box<dyn TreeSource>) -> Self {
        Self {
            source,
            overlay: HashMap::new(),
            order: Vec::new(),
            source_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Read a file from the overlay, falling back to the source.
    pub fn read(&self, path: &str) -> MosaicResult<String> {
        let path = normalize_path(path);
        if let Some(entry) = self.overlay.get(&path) {
            return entry.content.clone().ok_or_else(|| {
                WorkspaceError::PathNotFound { path: path.clone() }.into()
            });
        }
        self.source_read(&path)?
            .ok_or_else(|| WorkspaceError::PathNotFound { path }.into())
    }

    /// Write a file. Creates, updates or resurrects as needed.
    ///
    /// Writing content identical to the unmodified source file records
    /// nothing, so generators can re-emit files without dirtying the tree.
    pub fn write(&mut self, path: &str, content: impl Into<String>) {
        let path = normalize_path(path);
        let content = content.into();

        if let Some(entry) = self.overlay.get_mut(&path) {
            // Re-write after delete reinstates the path; `created` keeps
            // tracking whether the *source* ever had it.
            entry.content = Some(content);
            return;
        }

        let existing = self.source_read(&path).ok().flatten();
        if existing.as_deref() == Some(content.as_str()) {
            trace!(path = %path, "skipping write of identical content");
            return;
        }
        let created = existing.is_none() && !self.source_is_file(&path);
        self.overlay.insert(path.clone(), Overlay {
            content: Some(content),
            created,
        });
        self.order.push(path);
    }

    /// Delete a file, or every file under a directory.
    ///
    /// Deleting a path that exists nowhere is a no-op, not an error.
    pub fn delete(&mut self, path: &str) {
        let path = normalize_path(path);
        let is_live_file = match self.overlay.get(&path) {
            Some(entry) => entry.content.is_some(),
            None => self.source_is_file(&path),
        };
        if is_live_file {
            self.delete_file(path);
            return;
        }
        let files = self.files_under(path.as_str());
        if files.is_empty() {
            trace!(path = %path, "delete of a missing path is a no-op");
            return;
        }
        for file in files {
            self.delete_file(file);
        }
    }

    /// Whether a file or directory exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        let path = normalize_path(path);
        if path.as_str().is_empty() {
            return true; // the workspace root
        }
        self.is_file(path.as_str()) || !self.children(path.as_str()).is_empty()
    }

    /// Whether a *file* exists at `path`.
    pub fn is_file(&self, path: &str) -> bool {
        let path = normalize_path(path);
        match self.overlay.get(&path) {
            Some(entry) => entry.content.is_some(),
            None => self.source_is_file(&path),
        }
    }

    /// Immediate children of `dir`: the merged view of source and overlay,
    /// with fully deleted entries hidden. Sorted for determinism.
    pub fn children(&self, dir: &str) -> Vec<String> {
        let dir = normalize_path(dir);
        let mut names = BTreeSet::new();

        for name in self.source.children(&dir) {
            let full = join(&dir, &name);
            if self.source.is_file(&full) {
                let deleted = self
                    .overlay
                    .get(&full)
                    .is_some_and(|entry| entry.content.is_none());
                if !deleted {
                    names.insert(name);
                }
            } else if !self.children(full.as_str()).is_empty() {
                names.insert(name);
            }
        }

        for (path, entry) in &self.overlay {
            if entry.content.is_none() {
                continue;
            }
            if let Some(first) = first_segment_under(path, &dir) {
                names.insert(first.to_string());
            }
        }

        names.into_iter().collect()
    }

    /// Every live file under `prefix`, sorted.
    pub fn files_under(&self, prefix: &str) -> Vec<Utf8PathBuf> {
        let prefix = normalize_path(prefix);
        let mut files = Vec::new();
        let mut stack = vec![prefix];
        while let Some(dir) = stack.pop() {
            for name in self.children(dir.as_str()) {
                let full = join(&dir, &name);
                if self.is_file(full.as_str()) {
                    files.push(full);
                } else {
                    stack.push(full);
                }
            }
        }
        files.sort();
        files
    }

    /// Rename a single file.
    pub fn rename(&mut self, from: &str, to: &str) -> MosaicResult<()> {
        let content = self.read(from)?;
        self.write(to, content);
        self.delete(from);
        Ok(())
    }

    /// Move every file under `from` to the same relative path under `to`.
    ///
    /// Writes all files under the new prefix first, preserving relative
    /// order, then deletes the originals. There is no rollback: a failing
    /// generator run is abandoned wholesale, never committed.
    pub fn move_directory(&mut self, from: &str, to: &str) -> MosaicResult<()> {
        let from = normalize_path(from);
        let to = normalize_path(to);
        let files = self.files_under(from.as_str());
        if files.is_empty() {
            return Err(WorkspaceError::PathNotFound { path: from }.into());
        }

        let mut moved = Vec::with_capacity(files.len());
        for file in &files {
            let rel = file
                .strip_prefix(&from)
                .map_err(|_| crate::error::MosaicError::Internal {
                    message: format!("'{file}' is not under '{from}'"),
                })?;
            moved.push((to.join(rel), self.read(file.as_str())?));
        }
        for (dest, content) in moved {
            self.write(dest.as_str(), content);
        }
        for file in files {
            self.delete(file.as_str());
        }
        Ok(())
    }

    /// The pending changes, in first-mutation order.
    pub fn list_changes(&self) -> Vec<ChangeRecord> {
        self.order
            .iter()
            .filter_map(|path| {
                let entry = self.overlay.get(path)?;
                let kind = match (&entry.content, entry.created) {
                    (None, _) => ChangeKind::Delete,
                    (Some(_), true) => ChangeKind::Create,
                    (Some(_), false) => ChangeKind::Update,
                };
                Some(ChangeRecord {
                    path: path.clone(),
                    kind,
                    content: entry.content.clone(),
                })
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    fn delete_file(&mut self, path: Utf8PathBuf) {
        let created = self.overlay.get(&path).map(|entry| entry.created);
        match created {
            Some(true) => {
                // Create followed by delete collapses to nothing.
                self.overlay.remove(&path);
                self.order.retain(|p| p != &path);
            }
            Some(false) => {
                if let Some(entry) = self.overlay.get_mut(&path) {
                    entry.content = None;
                }
            }
            None => {
                self.overlay.insert(path.clone(), Overlay {
                    content: None,
                    created: false,
                });
                self.order.push(path);
            }
        }
    }

    fn source_read(&self, path: &Utf8Path) -> MosaicResult<Option<String>> {
        if let Some(cached) = self.source_cache.borrow().get(path) {
            return Ok(cached.clone());
        }
        let content = self.source.read(path)?;
        self.source_cache
            .borrow_mut()
            .insert(path.to_path_buf(), content.clone());
        Ok(content)
    }

    fn source_is_file(&self, path: &Utf8Path) -> bool {
        if let Some(cached) = self.source_cache.borrow().get(path) {
            return cached.is_some();
        }
        self.source.is_file(path)
    }
}

fn join(dir: &Utf8Path, name: &str) -> Utf8PathBuf {
    if dir.as_str().is_empty() {
        Utf8PathBuf::from(name)
    } else {
        dir.join(name)
    }
}

/// First path segment of `path` below `dir`, or `None` when `path` is not
/// strictly under `dir`.
fn first_segment_under<'a>(path: &'a Utf8Path, dir: &Utf8Path) -> Option<&'a str> {
    let rest = if dir.as_str().is_empty() {
        path
    } else {
        path.strip_prefix(dir).ok()?
    };
    rest.components().next().map(|c| c.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{empty_tree, tree_with_files};
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_fall_through_to_the_source() {
        let tree = tree_with_files(&[("package.json", "{}\n")]);
        assert_eq!(tree.read("package.json").unwrap(), "{}\n");
        assert!(tree.read("missing.json").is_err());
    }

    #[test]
    fn last_write_wins() {
        let mut tree = empty_tree();
        tree.write("a.txt", "one");
        tree.write("a.txt", "two");
        assert_eq!(tree.read("a.txt").unwrap(), "two");

        let changes = tree.list_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Create);
        assert_eq!(changes[0].content.as_deref(), Some("two"));
    }

    #[test]
    fn delete_then_write_resurrects_as_update() {
        let mut tree = tree_with_files(&[("a.txt", "old")]);
        tree.delete("a.txt");
        assert!(!tree.exists("a.txt"));
        tree.write("a.txt", "new");
        assert_eq!(tree.read("a.txt").unwrap(), "new");
        let changes = tree.list_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Update);
    }

    #[test]
    fn create_then_delete_collapses_to_nothing() {
        let mut tree = empty_tree();
        tree.write("tmp.txt", "scaffold");
        tree.delete("tmp.txt");
        assert!(tree.list_changes().is_empty());
        assert!(!tree.exists("tmp.txt"));
    }

    #[test]
    fn delete_of_missing_path_is_noop() {
        let mut tree = empty_tree();
        tree.delete("never/was/here.txt");
        assert!(tree.list_changes().is_empty());
    }

    #[test]
    fn deleting_source_file_is_recorded() {
        let mut tree = tree_with_files(&[("a.txt", "x")]);
        tree.delete("a.txt");
        let changes = tree.list_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Delete);
        assert_eq!(changes[0].content, None);
    }

    #[test]
    fn writing_identical_source_content_records_nothing() {
        let mut tree = tree_with_files(&[("a.txt", "same")]);
        tree.write("a.txt", "same");
        assert!(tree.list_changes().is_empty());
    }

    #[test]
    fn children_merge_source_and_overlay() {
        let mut tree = tree_with_files(&[("libs/a/index.ts", ""), ("libs/b/index.ts", "")]);
        tree.write("libs/c/index.ts", "");
        assert_eq!(tree.children("libs"), vec!["a", "b", "c"]);
    }

    #[test]
    fn children_hide_deleted_files() {
        let mut tree = tree_with_files(&[("libs/a/index.ts", ""), ("libs/a/other.ts", "")]);
        tree.delete("libs/a/index.ts");
        assert_eq!(tree.children("libs/a"), vec!["other.ts"]);
        tree.delete("libs/a/other.ts");
        assert!(tree.children("libs/a").is_empty());
        assert!(!tree.exists("libs/a"));
    }

    #[test]
    fn directory_delete_removes_every_file() {
        let mut tree = tree_with_files(&[("apps/x/main.ts", ""), ("apps/x/deep/util.ts", "")]);
        tree.delete("apps/x");
        assert!(!tree.exists("apps/x/main.ts"));
        assert!(!tree.exists("apps/x/deep/util.ts"));
        assert_eq!(tree.list_changes().len(), 2);
    }

    #[test]
    fn rename_moves_content() {
        let mut tree = tree_with_files(&[("old.txt", "body")]);
        tree.rename("old.txt", "new.txt").unwrap();
        assert_eq!(tree.read("new.txt").unwrap(), "body");
        assert!(!tree.exists("old.txt"));
    }

    #[test]
    fn move_directory_preserves_content_and_order() {
        let mut tree = tree_with_files(&[
            ("libs/old/src/index.ts", "index"),
            ("libs/old/src/lib/util.ts", "util"),
        ]);
        tree.move_directory("libs/old", "libs/new").unwrap();

        assert_eq!(tree.read("libs/new/src/index.ts").unwrap(), "index");
        assert_eq!(tree.read("libs/new/src/lib/util.ts").unwrap(), "util");
        assert!(!tree.exists("libs/old"));

        // Writes under the new prefix come before the deletions.
        let kinds: Vec<_> = tree.list_changes().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Create,
                ChangeKind::Create,
                ChangeKind::Delete,
                ChangeKind::Delete
            ]
        );
    }

    #[test]
    fn move_directory_of_missing_prefix_fails() {
        let mut tree = empty_tree();
        assert!(tree.move_directory("libs/ghost", "libs/new").is_err());
    }

    #[test]
    fn paths_are_normalized() {
        let mut tree = empty_tree();
        tree.write("./libs//a/index.ts", "x");
        assert!(tree.exists("libs/a/index.ts"));
        assert_eq!(tree.read("libs/a/../a/index.ts").unwrap(), "x");
    }
}
