//! Tag-shorthand line parser.
//!
//! A tag line has the shape
//!
//! ```text
//! %name#id.class.other{key: value, key2: "v"} inline content
//! ```
//!
//! where every part is optional, as long as the line starts with `%`, `#` or
//! `.`. Parsing runs as fixed, ordered passes over the text left after the tag
//! name: the first `#id`, then every `.class`, then the first balanced
//! `{...}`. Each pass removes what it matched wherever it sits, so
//! `%p{title: x}.big Hi` and `%p.big{title: x} Hi` parse the same. Whatever
//! survives all passes is the inline content.
//!
//! The id and class passes skip the attribute block region itself, so values
//! like `src: "a.png"` are not mined for classes.

use crate::attrs::{AttrBlock, find_attr_block, parse_attr_block};
use crate::classify::{CLASS_MARKER, ID_MARKER, TAG_MARKER};
use crate::self_closing::SelfClosingTags;
use crate::types::{DEFAULT_TAG, TagSpec};

/// Marker that precedes dynamic content. It is stripped, never evaluated.
pub const DYNAMIC_MARKER: char = '=';

/// A tolerated malformation found while parsing a tag line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagIssue {
    /// `{` with no matching `}`; the text was left as inline content.
    UnclosedAttrs,
    /// An attribute entry that is not `key: value`.
    BareAttr(String),
    /// Inline content given to a void element; it is not emitted.
    ContentOnVoid(String),
}

/// A parsed tag line together with any tolerated problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag {
    pub spec: TagSpec,
    pub issues: Vec<TagIssue>,
}

fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Split `text` after the longest prefix of characters accepted by `accept`.
fn take_while(text: &str, accept: fn(char) -> bool) -> (&str, &str) {
    let end = text.find(|c: char| !accept(c)).unwrap_or(text.len());
    text.split_at(end)
}

/// Remove the first `marker` followed by an identifier from `text` and
/// return the identifier. A marker with nothing after it is left alone.
fn take_first(text: &mut String, marker: char) -> Option<String> {
    let found = text.match_indices(marker).find_map(|(at, _)| {
        let (token, _) = take_while(&text[at + 1..], is_ident_char);
        (!token.is_empty()).then(|| (at, token.to_string()))
    });
    let (at, token) = found?;
    text.replace_range(at..at + 1 + token.len(), "");
    Some(token)
}

/// Remove every `marker` + identifier from `text`, in order of appearance.
fn take_all(text: &mut String, marker: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut from = 0;
    while let Some(offset) = text[from..].find(marker) {
        let at = from + offset;
        let (token, _) = take_while(&text[at + 1..], is_ident_char);
        if token.is_empty() {
            from = at + 1;
            continue;
        }
        let token = token.to_string();
        text.replace_range(at..at + 1 + token.len(), "");
        tokens.push(token);
        from = at;
    }
    tokens
}

/// Parse one trimmed tag line.
pub fn parse_tag_line(text: &str, table: &SelfClosingTags) -> ParsedTag {
    let mut issues = Vec::new();
    let mut rest = text.trim();

    // Pass 1: tag name.
    let tag_name = match rest.strip_prefix(TAG_MARKER) {
        Some(after) => {
            let (name, tail) = take_while(after, is_tag_name_char);
            rest = tail;
            if name.is_empty() { DEFAULT_TAG } else { name }
        }
        None => DEFAULT_TAG,
    };

    // The attribute block is located up front so the id and class passes can
    // work on the text either side of it.
    let (mut before, block, mut after) = match find_attr_block(rest) {
        AttrBlock::Closed { before, inner, after } => (before.to_string(), Some(inner), after.to_string()),
        AttrBlock::Unclosed => {
            issues.push(TagIssue::UnclosedAttrs);
            (rest.to_string(), None, String::new())
        }
        AttrBlock::Absent => (rest.to_string(), None, String::new()),
    };

    // Pass 2: first `#id`.
    let mut id = take_first(&mut before, ID_MARKER).or_else(|| take_first(&mut after, ID_MARKER));

    // Pass 3: every `.class`.
    let mut classes = take_all(&mut before, CLASS_MARKER);
    classes.extend(take_all(&mut after, CLASS_MARKER));

    // Pass 4: attribute block.
    let mut attributes = Default::default();
    if let Some(inner) = block {
        let (mut attrs, rejected) = parse_attr_block(inner);
        issues.extend(rejected.into_iter().map(TagIssue::BareAttr));

        if let Some(block_id) = attrs.shift_remove("id") {
            id.get_or_insert(block_id);
        }
        if let Some(block_class) = attrs.shift_remove("class") {
            classes.extend(block_class.split_whitespace().map(str::to_string));
        }
        attributes = attrs;
    }

    // Pass 5: inline content.
    before.push_str(&after);
    let mut content = before.trim();
    if let Some(stripped) = content.strip_prefix(DYNAMIC_MARKER) {
        content = stripped.trim();
    }
    let mut inline_content = (!content.is_empty()).then(|| content.to_string());

    // Pass 6: void lookup.
    let is_self_closing = table.contains(tag_name);
    if is_self_closing {
        if let Some(dropped) = inline_content.take() {
            issues.push(TagIssue::ContentOnVoid(dropped));
        }
    }

    ParsedTag {
        spec: TagSpec {
            tag_name: tag_name.to_string(),
            id,
            classes,
            attributes,
            inline_content,
            is_self_closing,
        },
        issues,
    }
}
