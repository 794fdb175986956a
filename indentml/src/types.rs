use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::TranspileError;

/// Attribute map extracted from a `{...}` block, in source order.
pub type Attrs = IndexMap<String, String>;

/// Tag name used when a tag line has no explicit `%name`.
pub const DEFAULT_TAG: &str = "div";

/// One line of source text with its measured indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// The line exactly as it appeared (minus the line terminator).
    pub raw: &'a str,
    /// 0-based line number.
    pub number: usize,
    /// Count of leading whitespace characters.
    pub indent: usize,
    /// Content with surrounding whitespace removed.
    pub content: &'a str,
}

/// What a source line is, as decided by the line classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Tag,
    PlainText,
}

/// A fully parsed tag-shorthand line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSpec {
    pub tag_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub attributes: Attrs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_content: Option<String>,
    pub is_self_closing: bool,
}

impl TagSpec {
    /// A bare `<div>` container with nothing attached.
    pub fn container(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            id: None,
            classes: Vec::new(),
            attributes: Attrs::new(),
            inline_content: None,
            is_self_closing: false,
        }
    }
}

/// A container tag that has been opened and is waiting for its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFrame {
    pub tag_name: String,
    pub indent: usize,
    pub is_self_closing: bool,
}

/// How a rendered unit interacts with the indent stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitKind {
    /// Void element; never has children or a closing tag.
    SelfClosing,
    /// Opening tag, content and closing tag in one unit.
    Inline,
    /// Opening tag only; must be pushed as an [`OpenFrame`].
    Open,
}

/// Output of the emitter for one tag line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub kind: UnitKind,
    pub tag_name: String,
}

impl Rendered {
    pub fn is_self_closing(&self) -> bool {
        self.kind == UnitKind::SelfClosing
    }

    pub fn has_inline_content(&self) -> bool {
        self.kind == UnitKind::Inline
    }
}

/// One line of controller output, placed at the indentation it was produced at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub indent: usize,
    pub text: String,
}

impl RenderedLine {
    /// The line with its recorded indentation applied as spaces.
    pub fn placed(&self) -> String {
        format!("{:width$}{}", "", self.text, width = self.indent)
    }
}

/// How void elements are terminated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfClosingMode {
    /// `<br />`
    #[default]
    Xhtml,
    /// `<br>`
    Html5,
    /// `<br>`
    Html4,
}

impl SelfClosingMode {
    /// Terminator appended after the attributes of a void element.
    pub fn terminator(self) -> &'static str {
        match self {
            SelfClosingMode::Xhtml => " />",
            SelfClosingMode::Html5 | SelfClosingMode::Html4 => ">",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SelfClosingMode::Xhtml => "xhtml",
            SelfClosingMode::Html5 => "html5",
            SelfClosingMode::Html4 => "html4",
        }
    }
}

impl fmt::Display for SelfClosingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelfClosingMode {
    type Err = TranspileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xhtml" => Ok(SelfClosingMode::Xhtml),
            "html5" => Ok(SelfClosingMode::Html5),
            "html4" => Ok(SelfClosingMode::Html4),
            _ => Err(TranspileError::UnknownMode(s.to_string())),
        }
    }
}

/// Caller-supplied options for a single transpile call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Re-indent the output by nesting depth.
    pub format_output: bool,
    pub self_closing_mode: SelfClosingMode,
    /// Spaces per nesting level when `format_output` is set.
    pub indent_unit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format_output: true,
            self_closing_mode: SelfClosingMode::default(),
            indent_unit: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("XHTML".parse::<SelfClosingMode>().unwrap(), SelfClosingMode::Xhtml);
        assert_eq!(" html5 ".parse::<SelfClosingMode>().unwrap(), SelfClosingMode::Html5);
        assert_eq!("html4".parse::<SelfClosingMode>().unwrap(), SelfClosingMode::Html4);
    }

    #[test]
    fn unknown_mode_is_an_error() {
        let err = "sgml".parse::<SelfClosingMode>().unwrap_err();
        assert!(matches!(err, TranspileError::UnknownMode(ref m) if m == "sgml"));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: Options = serde_json::from_str(r#"{"selfClosingMode":"html5"}"#).unwrap();
        assert_eq!(opts.self_closing_mode, SelfClosingMode::Html5);
        assert!(opts.format_output);
        assert_eq!(opts.indent_unit, 2);
    }

    #[test]
    fn placed_line_uses_recorded_indent() {
        let line = RenderedLine {
            indent: 4,
            text: "</p>".into(),
        };
        assert_eq!(line.placed(), "    </p>");
    }
}
