//! Change records and the string edit algebra.
//!
//! [`ChangeRecord`] describes a pending file mutation in the workspace
//! tree. [`StringChange`] describes a single edit against an *immutable*
//! source string; offsets always refer to the original string, and
//! [`apply_string_changes`] resolves the offset drift in one pass.

use std::fmt;

use camino::Utf8PathBuf;

use crate::domain::error::DomainError;

/// How a path in the tree changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        })
    }
}

/// One pending mutation, as reported by `FsTree::list_changes`.
///
/// `content` is `None` for deletions.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub path: Utf8PathBuf,
    pub kind: ChangeKind,
    pub content: Option<String>,
}

/// A single edit against the original source string.
///
/// Offsets are byte offsets into the original string. A replacement is a
/// `Delete` paired with an `Insert` at the deleted range's start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringChange {
    Insert { index: usize, text: String },
    Delete { start: usize, end: usize },
}

impl StringChange {
    pub fn insert(index: usize, text: impl Into<String>) -> Self {
        Self::Insert {
            index,
            text: text.into(),
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::Delete { start, end }
    }

    fn position(&self) -> usize {
        match self {
            Self::Insert { index, .. } => *index,
            Self::Delete { start, .. } => *start,
        }
    }
}

/// Apply a set of changes to `original`, producing the new string.
///
/// The result does not depend on the input order of non-overlapping
/// changes: edits are applied in one ascending pass over the original.
/// Insertions at equal offsets keep their given relative order, and an
/// insertion at the start of a deleted range lands before the deletion
/// (the replace idiom).
pub fn apply_string_changes(
    original: &str,
    changes: &[StringChange],
) -> Result<String, DomainError> {
    for change in changes {
        let (from, to) = match change {
            StringChange::Insert { index, .. } => (*index, *index),
            StringChange::Delete { start, end } => (*start, *end),
        };
        if from > to
            || to > original.len()
            || !original.is_char_boundary(from)
            || !original.is_char_boundary(to)
        {
            return Err(DomainError::ChangeOutOfBounds {
                index: to,
                len: original.len(),
            });
        }
    }

    let mut sorted: Vec<&StringChange> = changes.iter().collect();
    // Stable: ties between insertions preserve input order; insertions sort
    // before a deletion starting at the same offset.
    sorted.sort_by_key(|c| {
        let rank = match c {
            StringChange::Insert { .. } => 0usize,
            StringChange::Delete { .. } => 1usize,
        };
        (c.position(), rank)
    });

    let mut out = String::with_capacity(original.len());
    let mut cursor = 0usize;
    for change in sorted {
        if change.position() < cursor {
            return Err(DomainError::OverlappingChanges {
                position: change.position(),
            });
        }
        match change {
            StringChange::Insert { index, text } => {
                out.push_str(&original[cursor..*index]);
                out.push_str(text);
                cursor = *index;
            }
            StringChange::Delete { start, end } => {
                out.push_str(&original[cursor..*start]);
                cursor = *end;
            }
        }
    }
    out.push_str(&original[cursor..]);
    Ok(out)
}
