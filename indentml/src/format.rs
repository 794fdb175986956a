//! Depth-based re-indentation of emitted markup.
//!
//! Works on text alone, one line at a time, so it can be run over its own
//! output and produce the same result.

use crate::self_closing::SelfClosingTags;

/// How a trimmed output line moves the depth counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `</name>`: decrement before rendering.
    Close,
    /// `<name ...>` that expects children: increment after rendering.
    Open,
    /// Void tags, combined open/content/close units, text.
    Neutral,
}

fn shape(line: &str, table: &SelfClosingTags) -> Shape {
    if line.starts_with("</") {
        return Shape::Close;
    }
    let Some(after) = line.strip_prefix('<') else {
        return Shape::Neutral;
    };
    let name_end = after
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(after.len());
    let name = &after[..name_end];
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Shape::Neutral;
    }
    if line.ends_with("/>") || table.contains(name) || line.contains(&format!("</{name}>")) {
        return Shape::Neutral;
    }
    Shape::Open
}

/// Re-indent `lines` by nesting depth, `unit` spaces per level.
pub fn format_lines<'a, I>(lines: I, unit: usize, table: &SelfClosingTags) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut depth = 0usize;
    let mut out: Vec<String> = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        let shape = shape(line, table);
        if shape == Shape::Close {
            depth = depth.saturating_sub(1);
        }
        out.push(format!("{:width$}{line}", "", width = depth * unit));
        if shape == Shape::Open {
            depth += 1;
        }
    }

    out.join("\n")
}

/// Re-indent a whole block of markup.
pub fn format_markup(text: &str, unit: usize, table: &SelfClosingTags) -> String {
    format_lines(text.split('\n'), unit, table)
}
