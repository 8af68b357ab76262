//! End-of-run formatting.

use tracing::debug;

use crate::application::ports::FileFormatter;
use crate::application::tree::FsTree;
use crate::domain::change::ChangeKind;

/// Reformat every file the current run touched.
///
/// Must run after all structural mutation is complete: formatting rewrites
/// the same overlay entries the generators produced, so interleaving it
/// would invalidate patch offsets computed against unformatted text.
pub fn format_files(tree: &mut FsTree, formatter: &dyn FileFormatter) {
    let touched: Vec<_> = tree
        .list_changes()
        .into_iter()
        .filter(|change| change.kind != ChangeKind::Delete)
        .filter_map(|change| change.content.map(|content| (change.path, content)))
        .collect();

    let mut formatted = 0usize;
    for (path, content) in touched {
        if let Some(updated) = formatter.format(&path, &content) {
            tree.write(path.as_str(), updated);
            formatted += 1;
        }
    }
    debug!(formatted, "formatted touched files");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::empty_tree;
    use camino::Utf8Path;
    use pretty_assertions::assert_eq;

    struct Upcase;

    impl FileFormatter for Upcase {
        fn format(&self, path: &Utf8Path, content: &str) -> Option<String> {
            if path.extension() != Some("ts") {
                return None;
            }
            let upper = content.to_uppercase();
            (upper != content).then_some(upper)
        }
    }

    #[test]
    fn formats_only_touched_matching_files() {
        let mut tree = empty_tree();
        tree.write("a.ts", "let x;");
        tree.write("b.md", "let x;");
        format_files(&mut tree, &Upcase);
        assert_eq!(tree.read("a.ts").unwrap(), "LET X;");
        assert_eq!(tree.read("b.md").unwrap(), "let x;");
    }

    #[test]
    fn formatting_does_not_add_change_records() {
        let mut tree = empty_tree();
        tree.write("a.ts", "x");
        format_files(&mut tree, &Upcase);
        assert_eq!(tree.list_changes().len(), 1);
    }
}
