//! Indent stack controller.
//!
//! Tracks open container tags by the indentation width they were opened at.
//! A line at width `w` first closes every open frame with width `>= w`, so
//! a line at the same width as an open tag is its sibling, never its child.

use crate::error::TranspileError;
use crate::types::{OpenFrame, Rendered, RenderedLine, UnitKind};

#[derive(Debug, Default)]
pub struct IndentStack {
    frames: Vec<OpenFrame>,
    output: Vec<RenderedLine>,
}

impl IndentStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[OpenFrame] {
        &self.frames
    }

    /// Close every frame whose indent is `>= indent`, innermost first. Each
    /// closing tag is placed at its frame's own indent.
    pub fn close_until(&mut self, indent: usize) {
        while self.frames.last().is_some_and(|top| indent <= top.indent) {
            if let Some(frame) = self.frames.pop() {
                self.close_frame(frame);
            }
        }
    }

    fn close_frame(&mut self, frame: OpenFrame) {
        log::trace!("close <{}> opened at width {}", frame.tag_name, frame.indent);
        self.output.push(RenderedLine {
            indent: frame.indent,
            text: format!("</{}>", frame.tag_name),
        });
    }

    /// Append a rendered unit at `indent`, pushing a frame if it is an open
    /// container. Callers must have called [`close_until`](Self::close_until)
    /// for the same width first.
    pub fn emit(&mut self, line: usize, indent: usize, rendered: Rendered) -> Result<(), TranspileError> {
        let opens = rendered.kind == UnitKind::Open;
        if opens {
            if let Some(top) = self.frames.last().filter(|top| indent <= top.indent) {
                return Err(TranspileError::Structural {
                    line,
                    message: format!(
                        "cannot open <{}> at width {indent} inside <{}> at width {}",
                        rendered.tag_name, top.tag_name, top.indent
                    ),
                });
            }
        }

        self.output.push(RenderedLine {
            indent,
            text: rendered.html,
        });

        if opens {
            log::trace!("open <{}> at width {indent}", rendered.tag_name);
            self.frames.push(OpenFrame {
                tag_name: rendered.tag_name,
                indent,
                is_self_closing: false,
            });
        }

        Ok(())
    }

    /// Append literal text at `indent`. Text never opens a frame.
    pub fn emit_text(&mut self, indent: usize, text: &str) {
        self.output.push(RenderedLine {
            indent,
            text: text.to_string(),
        });
    }

    /// Close every remaining frame and return the output lines.
    pub fn finish(mut self) -> Vec<RenderedLine> {
        while let Some(frame) = self.frames.pop() {
            self.close_frame(frame);
        }
        self.output
    }
}
