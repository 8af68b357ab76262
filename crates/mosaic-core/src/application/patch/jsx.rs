//! JSX structure location.
//!
//! Works on the scanner mask: element contents in strings and comments
//! are already blanked, so `<` and `>` seen here are structural.

use tracing::warn;

use crate::application::patch::scanner::{Span, mask_source, matching_bracket};
use crate::domain::change::StringChange;

/// Insert `text` immediately before the outermost JSX closing element or
/// closing fragment. Empty change set (plus a warning) when the source
/// has no JSX root.
pub fn insert_before_outermost_closing(source: &str, text: &str) -> Vec<StringChange> {
    let masked = mask_source(source);
    match outermost_closing(&masked) {
        Some(span) => vec![StringChange::insert(span.start, text.to_string())],
        None => {
            warn!("no JSX closing element found; skipping insertion");
            Vec::new()
        }
    }
}

/// The last closing tag in the file — for a well-formed tree, the root's.
pub(crate) fn outermost_closing(masked: &str) -> Option<Span> {
    closing_tags(masked).last().map(|(span, _)| *span)
}

/// Spans of every `<tag ...>` element named `tag`, self-closing or paired,
/// nested occurrences included. Span end covers the closing `/>` or
/// `</tag>`.
pub fn find_elements(masked: &str, tag: &str) -> Vec<Span> {
    let occurrences = tag_occurrences(masked, tag);
    let mut spans = Vec::new();
    for (i, occ) in occurrences.iter().enumerate() {
        if matches!(occ.kind, TagKind::Open) {
            if let Some((span, _)) = element_span(masked, &occurrences, i) {
                spans.push(span);
            }
        }
    }
    spans
}

#[derive(Debug, Clone, Copy)]
enum TagKind {
    Open,
    Close { end: usize },
}

#[derive(Debug, Clone, Copy)]
struct TagOccurrence {
    start: usize,
    kind: TagKind,
}

/// Consume the element whose opening tag is `occurrences[index]`,
/// recursing through nested same-tag elements. Returns the element span
/// and the index of the first occurrence after it.
fn element_span(
    masked: &str,
    occurrences: &[TagOccurrence],
    index: usize,
) -> Option<(Span, usize)> {
    let open = occurrences[index];
    let (open_end, self_closing) = open_tag_end(masked, open.start)?;
    if self_closing {
        return Some((Span::new(open.start, open_end), index + 1));
    }
    let mut i = index + 1;
    while i < occurrences.len() {
        let next = occurrences[i];
        if next.start < open_end {
            // inside the opening tag itself (an attribute expression)
            i += 1;
            continue;
        }
        match next.kind {
            TagKind::Open => {
                let (_, after) = element_span(masked, occurrences, i)?;
                i = after;
            }
            TagKind::Close { end } => return Some((Span::new(open.start, end), i + 1)),
        }
    }
    None
}

/// All `<tag` openings and `</tag>` closings, in source order.
fn tag_occurrences(masked: &str, tag: &str) -> Vec<TagOccurrence> {
    let bytes = masked.as_bytes();
    let tag_bytes = tag.as_bytes();
    let mut found = Vec::new();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'/') {
            let mut j = i + 2;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if bytes[j..].starts_with(tag_bytes) {
                let after = j + tag_bytes.len();
                let boundary = bytes.get(after).is_none_or(|&b| !is_tag_byte(b));
                let mut k = after;
                while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                    k += 1;
                }
                if boundary && bytes.get(k) == Some(&b'>') {
                    found.push(TagOccurrence {
                        start: i,
                        kind: TagKind::Close { end: k + 1 },
                    });
                    i = k + 1;
                    continue;
                }
            }
            i += 2;
        } else if bytes[i + 1..].starts_with(tag_bytes) {
            let after = i + 1 + tag_bytes.len();
            let boundary = bytes
                .get(after)
                .is_none_or(|&b| !is_tag_byte(b));
            if boundary {
                found.push(TagOccurrence {
                    start: i,
                    kind: TagKind::Open,
                });
                i = after;
            } else {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    found
}

/// End of the opening tag starting at `lt`: `(offset past '>', self_closing)`.
fn open_tag_end(masked: &str, lt: usize) -> Option<(usize, bool)> {
    let bytes = masked.as_bytes();
    let mut i = lt + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                i = matching_bracket(masked, i)? + 1;
            }
            b'>' => {
                let self_closing = bytes[..i]
                    .iter()
                    .rev()
                    .find(|b| !b.is_ascii_whitespace())
                    == Some(&b'/');
                return Some((i + 1, self_closing));
            }
            b'<' => return None, // malformed
            _ => i += 1,
        }
    }
    None
}

/// Every closing tag (`</name>` or `</>`), in source order.
fn closing_tags(masked: &str) -> Vec<(Span, String)> {
    let bytes = masked.as_bytes();
    let mut found = Vec::new();
    let mut i = 0usize;
    while i + 1 < bytes.len() {
        if bytes[i] == b'<' && bytes[i + 1] == b'/' {
            let mut j = i + 2;
            let name_start = j;
            while j < bytes.len() && is_tag_byte(bytes[j]) {
                j += 1;
            }
            let name = masked[name_start..j].to_string();
            let mut k = j;
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if bytes.get(k) == Some(&b'>') {
                found.push((Span::new(i, k + 1), name));
                i = k + 1;
                continue;
            }
        }
        i += 1;
    }
    found
}

fn is_tag_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::change::apply_string_changes;
    use pretty_assertions::assert_eq;

    #[test]
    fn outermost_closing_is_the_last_tag() {
        let masked = mask_source("<div>\n  <span>x</span>\n</div>");
        let span = outermost_closing(&masked).unwrap();
        assert_eq!(span.end, masked.len());
    }

    #[test]
    fn fragment_closing_is_found() {
        let source = "<>\n<h1>Hello</h1>\n</>";
        let span = outermost_closing(&mask_source(source)).unwrap();
        assert_eq!(&source[span.start..span.end], "</>");
    }

    #[test]
    fn missing_jsx_root_degrades_to_empty_set() {
        assert!(insert_before_outermost_closing("const x = 1;", "<p/>").is_empty());
    }

    #[test]
    fn insertion_leaves_surrounding_bytes_intact() {
        let source = "<>\n<h1>Hello</h1>\n</>";
        let changes = insert_before_outermost_closing(source, "<p>new</p>\n");
        let out = apply_string_changes(source, &changes).unwrap();
        assert_eq!(out, "<>\n<h1>Hello</h1>\n<p>new</p>\n</>");
    }

    #[test]
    fn self_closing_elements_are_spanned() {
        let source = "<Routes>\n  <Route path=\"/\" element={<Home />} />\n</Routes>";
        let masked = mask_source(source);
        let routes = find_elements(&masked, "Route");
        assert_eq!(routes.len(), 1);
        assert!(source[routes[0].start..routes[0].end].ends_with("/>"));
    }

    #[test]
    fn paired_elements_span_to_their_closing_tag() {
        let source = "<ul><li><Link to=\"/\">Home</Link></li></ul>";
        let masked = mask_source(source);
        let links = find_elements(&masked, "Link");
        assert_eq!(links.len(), 1);
        assert_eq!(&source[links[0].start..links[0].end], "<Link to=\"/\">Home</Link>");
        let lis = find_elements(&masked, "li");
        assert_eq!(
            &source[lis[0].start..lis[0].end],
            "<li><Link to=\"/\">Home</Link></li>"
        );
    }

    #[test]
    fn nested_same_tag_elements_are_balanced() {
        let source = "<div a={b}><div>x</div></div>";
        let masked = mask_source(source);
        let divs = find_elements(&masked, "div");
        assert_eq!(divs.len(), 2);
        assert_eq!(divs[0], Span::new(0, source.len()));
    }

    #[test]
    fn tag_name_prefixes_do_not_match() {
        let masked = mask_source("<Linker to=\"/\" />");
        assert!(find_elements(&masked, "Link").is_empty());
    }
}
