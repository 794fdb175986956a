use crate::types::Attrs;

/// Result of looking for an attribute block in some text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrBlock<'a> {
    /// Text contains no `{`.
    Absent,
    /// The first balanced `{...}`; `inner` excludes the braces, and
    /// `before`/`after` are the text on either side of the region.
    Closed {
        before: &'a str,
        inner: &'a str,
        after: &'a str,
    },
    /// At least one `{`, none of which is ever closed.
    Unclosed,
}

/// Find the first balanced `{...}` region anywhere in `text`.
///
/// Each `{` is tried in turn; the first one that closes wins. See
/// [`match_brace`] for how quotes are treated.
pub fn find_attr_block(text: &str) -> AttrBlock<'_> {
    let mut saw_open = false;

    for (start, _) in text.match_indices('{') {
        saw_open = true;
        if let Some(len) = match_brace(&text[start..]) {
            return AttrBlock::Closed {
                before: &text[..start],
                inner: &text[start + 1..start + len],
                after: &text[start + len + 1..],
            };
        }
    }

    if saw_open { AttrBlock::Unclosed } else { AttrBlock::Absent }
}

/// Byte offset of the `}` balancing the `{` that starts `text`.
///
/// A quote only opens a quoted run when it follows `{`, `,`, `:` or
/// whitespace, so apostrophes inside bare words (`it's`) are plain text.
/// Braces inside a quoted run do not count toward nesting.
fn match_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut prev = ' ';

    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') if matches!(prev, '{' | ',' | ':') || prev.is_whitespace() => {
                quote = Some(c)
            }
            (None, '{') => depth += 1,
            (None, '}') => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        prev = c;
    }

    None
}

/// Parse the interior of an attribute block into an ordered map.
///
/// Accepted format: `key: value, key2: "quoted", 'key3': 'x'`.
///
/// This is a comma/colon heuristic, not an expression parser: every comma
/// separates entries (even inside quotes) and each entry is split at its first
/// colon. Entries without a colon or with an empty key are returned in the
/// second element so callers can report them.
pub fn parse_attr_block(inner: &str) -> (Attrs, Vec<String>) {
    let mut attrs = Attrs::new();
    let mut rejected = Vec::new();

    for piece in inner.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }

        let Some((key, value)) = piece.split_once(':') else {
            rejected.push(piece.to_string());
            continue;
        };

        let key = strip_quotes(key.trim());
        if key.is_empty() {
            rejected.push(piece.to_string());
            continue;
        }

        attrs.insert(key.to_string(), strip_quotes(value.trim()).to_string());
    }

    (attrs, rejected)
}

/// Remove one pair of matching surrounding quotes, if present.
fn strip_quotes(s: &str) -> &str {
    for q in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
