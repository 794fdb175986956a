//! HTML emitter.
//!
//! Renders one parsed tag line into its opening tag, or into a complete
//! open/content/close unit when the line carries inline content. Attribute
//! order is fixed: `id`, then `class`, then the attribute block in source order.

use crate::types::{Rendered, SelfClosingMode, TagSpec, UnitKind};

/// Escape a value for use inside a double-quoted attribute.
fn escape_attr(s: &str) -> String {
    s.replace('"', "&quot;")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Emitter {
    mode: SelfClosingMode,
}

impl Emitter {
    pub fn new(mode: SelfClosingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SelfClosingMode {
        self.mode
    }

    pub fn render(&self, spec: &TagSpec) -> Rendered {
        let mut html = format!("<{}", spec.tag_name);

        if let Some(id) = &spec.id {
            html.push_str(&format!(" id=\"{}\"", escape_attr(id)));
        }
        if !spec.classes.is_empty() {
            html.push_str(&format!(" class=\"{}\"", escape_attr(&spec.classes.join(" "))));
        }
        for (key, value) in &spec.attributes {
            html.push_str(&format!(" {}=\"{}\"", key, escape_attr(value)));
        }

        let kind = if spec.is_self_closing {
            html.push_str(self.mode.terminator());
            UnitKind::SelfClosing
        } else if let Some(content) = &spec.inline_content {
            html.push('>');
            html.push_str(content);
            html.push_str(&self.closing_tag(&spec.tag_name));
            UnitKind::Inline
        } else {
            html.push('>');
            UnitKind::Open
        };

        Rendered {
            html,
            kind,
            tag_name: spec.tag_name.clone(),
        }
    }

    pub fn closing_tag(&self, tag_name: &str) -> String {
        format!("</{tag_name}>")
    }
}
