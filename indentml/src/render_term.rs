//! ANSI highlighting of emitted markup for terminal display.

use colored::Colorize;

/// Colour tags, attribute names and attribute values in `markup`.
///
/// Text outside of tags is left unstyled.
pub fn highlight(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() * 2);
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tag_text = &rest[start..];
        let end = tag_text.find('>').map(|i| i + 1).unwrap_or(tag_text.len());
        out.push_str(&highlight_tag(&tag_text[..end]));
        rest = &tag_text[end..];
    }
    out.push_str(rest);
    out
}

/// Highlight one `<...>` run, name first and then `key="value"` pairs.
fn highlight_tag(tag: &str) -> String {
    let name_end = tag[1..]
        .find(|c: char| c.is_whitespace() || c == '>')
        .map(|i| i + 1)
        .unwrap_or(tag.len());

    let mut out = format!("{}", tag[..name_end].blue().bold());
    let mut rest = &tag[name_end..];

    while !rest.is_empty() {
        if let Some(eq) = rest.find("=\"") {
            let (before, after) = rest.split_at(eq);
            let close = after[2..].find('"').map(|i| i + 3).unwrap_or(after.len());
            let key_start = before.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
            out.push_str(&before[..key_start]);
            out.push_str(&format!("{}", before[key_start..].cyan()));
            out.push('=');
            out.push_str(&format!("{}", after[1..close].green()));
            rest = &after[close..];
        } else {
            out.push_str(&format!("{}", rest.blue().bold()));
            break;
        }
    }
    out
}
