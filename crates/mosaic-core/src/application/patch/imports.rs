//! Import statement insertion.

use crate::application::patch::scanner::{Span, mask_source, prev_code_byte, words};
use crate::domain::change::StringChange;

/// Insert `statement` after the last top-level import declaration, or at
/// offset 0 when the file has no imports yet.
pub fn add_import(source: &str, statement: &str) -> Vec<StringChange> {
    let masked = mask_source(source);
    match find_imports(&masked).last() {
        Some(last) => vec![StringChange::insert(last.end, format!("\n{statement}"))],
        None => vec![StringChange::insert(0, format!("{statement}\n"))],
    }
}

/// Spans of the top-level import declarations, in source order.
pub(crate) fn find_imports(masked: &str) -> Vec<Span> {
    let depths = bracket_depths(masked);
    words(masked)
        .filter(|word| word.text == "import")
        .filter(|word| depths[word.span.start] == 0)
        .filter(|word| starts_statement(masked, word.span.start))
        .map(|word| Span::new(word.span.start, statement_end(masked, &depths, word.span.end)))
        .collect()
}

/// Per-byte nesting depth across `()`, `[]` and `{}`.
fn bracket_depths(masked: &str) -> Vec<u32> {
    let mut depths = Vec::with_capacity(masked.len());
    let mut depth = 0u32;
    for b in masked.bytes() {
        match b {
            b'(' | b'[' | b'{' => {
                depths.push(depth);
                depth += 1;
            }
            b')' | b']' | b'}' => {
                depth = depth.saturating_sub(1);
                depths.push(depth);
            }
            _ => depths.push(depth),
        }
    }
    depths
}

/// Whether the byte at `at` begins a statement: start of file, or the
/// previous code byte ended one.
fn starts_statement(masked: &str, at: usize) -> bool {
    match prev_code_byte(masked, at) {
        None => true,
        Some((_, b)) => matches!(b, b';' | b'}' | b'\'' | b'"'),
    }
}

/// End offset of the statement starting at `from`: just past the next
/// top-level `;`, or the end of that line when the author omitted it.
fn statement_end(masked: &str, depths: &[u32], from: usize) -> usize {
    let bytes = masked.as_bytes();
    for i in from..bytes.len() {
        if bytes[i] == b';' && depths[i] == 0 {
            return i + 1;
        }
        if bytes[i] == b'\n' {
            // keep scanning only while we are inside brackets
            if depths[i] == 0 {
                return i;
            }
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::change::apply_string_changes;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_imports_means_offset_zero() {
        let changes = add_import("const x = 1;\n", "import React from 'react';");
        assert_eq!(
            changes,
            vec![StringChange::insert(0, "import React from 'react';\n")]
        );
    }

    #[test]
    fn inserts_after_the_last_import() {
        let source = "import a from 'a';\nimport b from 'b';\n\nconst x = a;\n";
        let changes = add_import(source, "import c from 'c';");
        let out = apply_string_changes(source, &changes).unwrap();
        assert_eq!(
            out,
            "import a from 'a';\nimport b from 'b';\nimport c from 'c';\n\nconst x = a;\n"
        );
    }

    #[test]
    fn multi_line_imports_are_spanned_fully() {
        let source = "import {\n  a,\n  b,\n} from 'mod';\nconst x = 1;\n";
        let changes = add_import(source, "import c from 'c';");
        let out = apply_string_changes(source, &changes).unwrap();
        assert!(out.contains("} from 'mod';\nimport c from 'c';"));
    }

    #[test]
    fn dynamic_imports_inside_code_are_ignored() {
        let source = "const load = () => import('lazy');\n";
        let changes = add_import(source, "import a from 'a';");
        assert_eq!(changes[0], StringChange::insert(0, "import a from 'a';\n"));
    }

    #[test]
    fn import_in_a_string_is_ignored() {
        let source = "const s = 'import nothing';\n";
        let changes = add_import(source, "import a from 'a';");
        assert_eq!(changes[0], StringChange::insert(0, "import a from 'a';\n"));
    }

    #[test]
    fn semicolon_free_imports_end_at_the_line() {
        let source = "import a from 'a'\nconst x = 1\n";
        let changes = add_import(source, "import b from 'b'");
        let out = apply_string_changes(source, &changes).unwrap();
        assert_eq!(out, "import a from 'a'\nimport b from 'b'\nconst x = 1\n");
    }
}
