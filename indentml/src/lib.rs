//! `indentml`: transpiler for indentation-driven tag shorthand.
//!
//! Source is a HAML-like dialect where nesting is expressed by indentation
//! and each tag is written as `%name#id.class{key: value} content`. The
//! transpiler turns it into nested HTML in a single in-memory pass.
//!
//! # Quick start
//!
//! ```
//! let html = indentml::transpile("%ul\n  %li One\n  %li Two", &Default::default()).unwrap();
//! assert_eq!(html, "<ul>\n  <li>One</li>\n  <li>Two</li>\n</ul>");
//! ```

pub mod attrs;
pub mod classify;
pub mod error;
pub mod format;
pub mod render_html;
#[cfg(feature = "terminal")]
pub mod render_term;
pub mod self_closing;
pub mod stack;
pub mod tag;
pub mod types;

pub use error::*;
pub use self_closing::SelfClosingTags;
pub use tag::parse_tag_line;
pub use types::*;

use classify::{METADATA_MARKER, classify, has_mixed_indent, split_lines};
use render_html::Emitter;
use stack::IndentStack;
use tag::TagIssue;

/// Output of a transpile call along with its non-fatal diagnostics.
#[derive(Debug, Clone)]
pub struct TranspileResult {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Transpile `source` into markup.
///
/// Empty or whitespace-only input yields an empty string.
pub fn transpile(source: &str, options: &Options) -> Result<String, TranspileError> {
    Transpiler::new(options.clone()).run(source).map(|r| r.output)
}

/// Like [`transpile`], also returning diagnostics for tolerated malformations.
pub fn transpile_with_diagnostics(source: &str, options: &Options) -> Result<TranspileResult, TranspileError> {
    Transpiler::new(options.clone()).run(source)
}

/// A configured transpiler. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct Transpiler {
    options: Options,
    tags: &'static SelfClosingTags,
}

impl Transpiler {
    pub fn new(options: Options) -> Self {
        Self::with_tags(options, SelfClosingTags::html())
    }

    /// Use a custom void-element table instead of the HTML one.
    pub fn with_tags(options: Options, tags: &'static SelfClosingTags) -> Self {
        Self { options, tags }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn run(&self, source: &str) -> Result<TranspileResult, TranspileError> {
        let normalised = source.replace("\r\n", "\n");
        let emitter = Emitter::new(self.options.self_closing_mode);
        let mut stack = IndentStack::new();
        let mut diagnostics = Vec::new();

        for line in split_lines(&normalised) {
            let kind = classify(&line);
            if matches!(kind, LineKind::Blank | LineKind::Comment) {
                continue;
            }

            let line_no = line.number + 1;
            if has_mixed_indent(line.raw) {
                diagnostics.push(Diagnostic::at(
                    Severity::Warning,
                    codes::MIXED_INDENT,
                    line_no,
                    "Indentation mixes tabs and spaces; each counts as one column".into(),
                ));
            }

            stack.close_until(line.indent);

            if kind == LineKind::PlainText {
                if line.content.starts_with(METADATA_MARKER) {
                    diagnostics.push(Diagnostic::at(
                        Severity::Info,
                        codes::METADATA_PASSTHROUGH,
                        line_no,
                        format!("'{}' is passed through as text", line.content),
                    ));
                }
                stack.emit_text(line.indent, line.content);
                continue;
            }

            let parsed = parse_tag_line(line.content, self.tags);
            diagnostics.extend(parsed.issues.into_iter().map(|issue| issue_diagnostic(issue, line_no)));
            stack.emit(line_no, line.indent, emitter.render(&parsed.spec))?;
        }

        let lines = stack.finish();
        let output = if self.options.format_output {
            format::format_lines(lines.iter().map(|l| l.text.as_str()), self.options.indent_unit, self.tags)
        } else {
            lines.iter().map(RenderedLine::placed).collect::<Vec<_>>().join("\n")
        };

        log::debug!(
            "transpiled {} output lines with {} diagnostics",
            lines.len(),
            diagnostics.len()
        );

        Ok(TranspileResult { output, diagnostics })
    }
}

fn issue_diagnostic(issue: TagIssue, line: usize) -> Diagnostic {
    match issue {
        TagIssue::UnclosedAttrs => Diagnostic::at(
            Severity::Warning,
            codes::UNCLOSED_ATTRS,
            line,
            "Attribute block opened with '{' but never closed; kept as text".into(),
        ),
        TagIssue::BareAttr(entry) => Diagnostic::at(
            Severity::Warning,
            codes::BARE_ATTR,
            line,
            format!("Ignoring attribute entry '{entry}' (expected 'key: value')"),
        ),
        TagIssue::ContentOnVoid(content) => Diagnostic::at(
            Severity::Warning,
            codes::CONTENT_ON_VOID,
            line,
            format!("Self-closing tag cannot hold content; dropped '{content}'"),
        ),
    }
}
