//! End-of-run source formatter.

use camino::Utf8Path;

use mosaic_core::application::ports::FileFormatter;

/// Minimal deterministic formatter for generated text files: strips
/// trailing whitespace per line and guarantees exactly one trailing
/// newline. Binary-ish or unknown extensions are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceFormatter;

const FORMATTED_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "json", "md", "html", "css", "scss",
];

impl SourceFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl FileFormatter for SourceFormatter {
    fn format(&self, path: &Utf8Path, content: &str) -> Option<String> {
        let extension = path.extension()?;
        if !FORMATTED_EXTENSIONS.contains(&extension) {
            return None;
        }
        let mut formatted: String = content
            .lines()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n");
        formatted.push('\n');
        (formatted != content).then_some(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_trailing_whitespace_and_adds_final_newline() {
        let formatter = SourceFormatter::new();
        let out = formatter
            .format(Utf8Path::new("a.ts"), "const x = 1;   \nconst y = 2;")
            .unwrap();
        assert_eq!(out, "const x = 1;\nconst y = 2;\n");
    }

    #[test]
    fn formatted_files_return_none() {
        let formatter = SourceFormatter::new();
        assert!(formatter.format(Utf8Path::new("a.ts"), "const x = 1;\n").is_none());
    }

    #[test]
    fn unknown_extensions_are_skipped() {
        let formatter = SourceFormatter::new();
        assert!(formatter.format(Utf8Path::new("a.bin"), "x  ").is_none());
    }
}
