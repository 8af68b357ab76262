//! Template emission with token substitution.
//!
//! Template sets are static path/content pairs compiled into the
//! generator crates. `__token__` markers in both the path and the content
//! are replaced from the substitution context, so a single template can
//! produce `src/lib/admin-ui.ts` for one run and `src/lib/shop.ts` for
//! the next.

use crate::application::tree::FsTree;
use crate::application::workspace::paths::join_path_fragments;

/// One file of a template set.
#[derive(Debug, Clone, Copy)]
pub struct TemplateFile {
    pub path: &'static str,
    pub content: &'static str,
}

/// Emit `templates` under `dest`, substituting `__token__` markers.
pub fn generate_files(
    tree: &mut FsTree,
    templates: &[TemplateFile],
    dest: &str,
    substitutions: &[(&str, &str)],
) {
    for template in templates {
        let path = substitute(template.path, substitutions);
        let content = substitute(template.content, substitutions);
        tree.write(join_path_fragments(&[dest, &path]).as_str(), content);
    }
}

fn substitute(input: &str, substitutions: &[(&str, &str)]) -> String {
    substitutions
        .iter()
        .fold(input.to_string(), |acc, (token, value)| {
            acc.replace(&format!("__{token}__"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::empty_tree;
    use pretty_assertions::assert_eq;

    const TEMPLATES: &[TemplateFile] = &[
        TemplateFile {
            path: "src/lib/__fileName__.ts",
            content: "export function __propertyName__() {\n  return '__name__';\n}\n",
        },
        TemplateFile {
            path: "README.md",
            content: "# __name__\n",
        },
    ];

    #[test]
    fn substitutes_tokens_in_paths_and_content() {
        let mut tree = empty_tree();
        generate_files(
            &mut tree,
            TEMPLATES,
            "libs/admin-ui",
            &[
                ("name", "admin-ui"),
                ("fileName", "admin-ui"),
                ("propertyName", "adminUi"),
            ],
        );

        let lib = tree.read("libs/admin-ui/src/lib/admin-ui.ts").unwrap();
        assert!(lib.contains("export function adminUi()"));
        assert!(lib.contains("return 'admin-ui';"));
        assert_eq!(tree.read("libs/admin-ui/README.md").unwrap(), "# admin-ui\n");
    }

    #[test]
    fn unknown_tokens_are_left_alone() {
        let mut tree = empty_tree();
        generate_files(&mut tree, TEMPLATES, "libs/x", &[("name", "x")]);
        let lib = tree.read("libs/x/src/lib/__fileName__.ts").unwrap();
        assert!(lib.contains("__propertyName__"));
    }
}
