/// Set of element names that never take children.
///
/// Lookups are ASCII case-insensitive, so `%BR` and `%br` are both void.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfClosingTags {
    names: &'static [&'static str],
}

const HTML_VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

static HTML: SelfClosingTags = SelfClosingTags { names: HTML_VOID };

impl SelfClosingTags {
    /// The HTML void elements.
    pub fn html() -> &'static SelfClosingTags {
        &HTML
    }

    /// A table over a caller-provided list of lowercase names.
    pub const fn from_names(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }
}

impl Default for SelfClosingTags {
    fn default() -> Self {
        HTML
    }
}
