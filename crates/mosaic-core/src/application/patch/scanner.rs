//! The structural scanner behind the patch engine.
//!
//! Instead of a full parser, the engine works on a *mask* of the source:
//! a same-length copy where comments and string/template contents are
//! blanked out. Every downstream finder (imports, JSX tags, property
//! assignments) searches the mask and emits offsets that are valid in the
//! original, because the two strings are byte-for-byte aligned.

/// Byte range into the original source. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// An identifier-like token in the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    pub span: Span,
}

/// Blank out comments, string contents and template-literal text.
///
/// Quote and backtick characters stay visible (they delimit element
/// spans), newlines survive (they delimit statements), and code inside
/// `${...}` interpolations stays visible too. Everything else that is not
/// code becomes a space, so the mask has the same length as the input.
pub fn mask_source(source: &str) -> String {
    #[derive(Clone, Copy)]
    enum Ctx {
        Code { braces: usize },
        Template,
    }

    let bytes = source.as_bytes();
    let mut mask = Vec::with_capacity(bytes.len());
    let mut stack = vec![Ctx::Code { braces: 0 }];
    let mut i = 0usize;

    let blank = |b: u8| if b == b'\n' { b'\n' } else { b' ' };

    while i < bytes.len() {
        let top = *stack.last().unwrap_or(&Ctx::Code { braces: 0 });
        match top {
            Ctx::Code { braces } => match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    while i < bytes.len() && bytes[i] != b'\n' {
                        mask.push(b' ');
                        i += 1;
                    }
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    mask.push(b' ');
                    mask.push(b' ');
                    i += 2;
                    while i < bytes.len() {
                        if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                            mask.push(b' ');
                            mask.push(b' ');
                            i += 2;
                            break;
                        }
                        mask.push(blank(bytes[i]));
                        i += 1;
                    }
                }
                quote @ (b'\'' | b'"') => {
                    mask.push(quote);
                    i += 1;
                    while i < bytes.len() {
                        if bytes[i] == b'\\' && i + 1 < bytes.len() {
                            mask.push(b' ');
                            mask.push(b' ');
                            i += 2;
                            continue;
                        }
                        if bytes[i] == quote {
                            mask.push(quote);
                            i += 1;
                            break;
                        }
                        if bytes[i] == b'\n' {
                            break; // unterminated; stop masking at the line end
                        }
                        mask.push(b' ');
                        i += 1;
                    }
                }
                b'`' => {
                    mask.push(b'`');
                    stack.push(Ctx::Template);
                    i += 1;
                }
                b'{' => {
                    mask.push(b'{');
                    if let Some(Ctx::Code { braces }) = stack.last_mut() {
                        *braces += 1;
                    }
                    i += 1;
                }
                b'}' => {
                    if braces == 0 && stack.len() > 1 {
                        // closes a `${` interpolation
                        mask.push(b' ');
                        stack.pop();
                    } else {
                        mask.push(b'}');
                        if let Some(Ctx::Code { braces }) = stack.last_mut() {
                            *braces = braces.saturating_sub(1);
                        }
                    }
                    i += 1;
                }
                other => {
                    mask.push(other);
                    i += 1;
                }
            },
            Ctx::Template => match bytes[i] {
                b'\\' if i + 1 < bytes.len() => {
                    mask.push(b' ');
                    mask.push(b' ');
                    i += 2;
                }
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    mask.push(b' ');
                    mask.push(b' ');
                    stack.push(Ctx::Code { braces: 0 });
                    i += 2;
                }
                b'`' => {
                    mask.push(b'`');
                    stack.pop();
                    i += 1;
                }
                other => {
                    mask.push(blank(other));
                    i += 1;
                }
            },
        }
    }

    // All replacements are single ASCII bytes, so the mask is valid UTF-8
    // wherever it still carries original bytes... except multi-byte code
    // characters, which pass through Code untouched and stay aligned.
    String::from_utf8(mask).unwrap_or_else(|e| {
        // Only reachable if a multi-byte char was split by a state change;
        // fall back to a fully blank mask of the right length.
        let len = e.into_bytes().len();
        " ".repeat(len)
    })
}

/// Offset of the closing bracket matching the opener at `open`.
pub fn matching_bracket(masked: &str, open: usize) -> Option<usize> {
    let bytes = masked.as_bytes();
    let (open_ch, close_ch) = match *bytes.get(open)? {
        b'(' => (b'(', b')'),
        b'[' => (b'[', b']'),
        b'{' => (b'{', b'}'),
        _ => return None,
    };
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if b == open_ch {
            depth += 1;
        } else if b == close_ch {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Lazy iterator over identifier-like tokens in the mask.
///
/// This is the reusable traversal primitive: finders filter it with a
/// predicate instead of hand-rolling their own scans.
pub fn words(masked: &str) -> impl Iterator<Item = Word<'_>> {
    WordIter { masked, pos: 0 }
}

struct WordIter<'a> {
    masked: &'a str,
    pos: usize,
}

impl<'a> Iterator for WordIter<'a> {
    type Item = Word<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.masked.as_bytes();
        while self.pos < bytes.len() && !is_word_start(bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < bytes.len() && is_word_byte(bytes[self.pos]) {
            self.pos += 1;
        }
        Some(Word {
            text: &self.masked[start..self.pos],
            span: Span::new(start, self.pos),
        })
    }
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// First non-whitespace byte at or after `from`.
pub fn next_code_byte(masked: &str, from: usize) -> Option<(usize, u8)> {
    masked
        .as_bytes()
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, b)| !b.is_ascii_whitespace())
        .map(|(i, &b)| (i, b))
}

/// Last non-whitespace byte strictly before `before`.
pub fn prev_code_byte(masked: &str, before: usize) -> Option<(usize, u8)> {
    masked.as_bytes()[..before]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, b)| !b.is_ascii_whitespace())
        .map(|(i, &b)| (i, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mask_preserves_length_and_structure() {
        let source = "const x = 'hi'; // note\nconst y = 2;";
        let mask = mask_source(source);
        assert_eq!(mask.len(), source.len());
        assert!(mask.contains("const x = '  ';"));
        assert!(!mask.contains("note"));
        assert!(mask.contains("const y = 2;"));
    }

    #[test]
    fn mask_blanks_block_comments() {
        let mask = mask_source("a /* b { c */ d");
        assert!(!mask.contains('{'));
        assert!(mask.contains('a'));
        assert!(mask.contains('d'));
    }

    #[test]
    fn mask_keeps_interpolation_code_visible() {
        let mask = mask_source("const s = `hello ${name} end`;");
        assert!(mask.contains("name"));
        assert!(!mask.contains("hello"));
        assert!(!mask.contains("end"));
    }

    #[test]
    fn mask_handles_escaped_quotes() {
        let mask = mask_source(r#"const s = 'it\'s'; rest"#);
        assert!(mask.contains("rest"));
    }

    #[test]
    fn matching_bracket_skips_nested_pairs() {
        let masked = "f([1, [2, 3], 4])";
        let open = masked.find('[').unwrap();
        assert_eq!(matching_bracket(masked, open), Some(masked.len() - 2));
    }

    #[test]
    fn words_iterate_identifiers_with_spans() {
        let found: Vec<_> = words("foo(bar, 3)").map(|w| w.text).collect();
        assert_eq!(found, vec!["foo", "bar"]);
    }

    #[test]
    fn words_skip_string_contents() {
        let mask = mask_source("foo('bar')");
        let found: Vec<_> = words(&mask).map(|w| w.text.to_string()).collect();
        assert_eq!(found, vec!["foo"]);
    }
}
