//! Line splitting and classification.

use crate::types::{LineKind, SourceLine};

pub const COMMENT_MARKER: char = '/';
pub const TAG_MARKER: char = '%';
pub const ID_MARKER: char = '#';
pub const CLASS_MARKER: char = '.';
pub const METADATA_MARKER: char = '!';

/// Split LF-normalised source into measured lines.
pub fn split_lines(source: &str) -> Vec<SourceLine<'_>> {
    source
        .split('\n')
        .enumerate()
        .map(|(number, raw)| SourceLine {
            raw,
            number,
            indent: indent_width(raw),
            content: raw.trim(),
        })
        .collect()
}

/// Number of leading whitespace characters. Tabs count as one.
pub fn indent_width(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count()
}

/// True when the leading whitespace contains both tabs and spaces.
pub fn has_mixed_indent(raw: &str) -> bool {
    let lead = &raw[..raw.len() - raw.trim_start().len()];
    lead.contains('\t') && lead.contains(' ')
}

pub fn classify(line: &SourceLine<'_>) -> LineKind {
    match line.content.chars().next() {
        None => LineKind::Blank,
        Some(COMMENT_MARKER) => LineKind::Comment,
        Some(TAG_MARKER | ID_MARKER | CLASS_MARKER) => LineKind::Tag,
        Some(_) => LineKind::PlainText,
    }
}
