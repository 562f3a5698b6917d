//! Template expression parser.
//!
//! Splits the raw content of a text node into literal runs and `{{...}}`
//! bindings. A placeholder is `{{`, any run of characters other than `}`,
//! then `}}`, matched left to right without overlap. The content between
//! the braces is trimmed and split on `.` into a path of trimmed field
//! names. Paths are not validated here: `{{ a..b }}` yields
//! `["a", "", "b"]`, and the code generator decides what to reject.
//!
//! ```
//! use h2j_template::{TemplateSegment, parse_template};
//!
//! assert_eq!(
//!     parse_template("a {{x.y}} b"),
//!     vec![
//!         TemplateSegment::Literal("a ".to_string()),
//!         TemplateSegment::binding(&["x", "y"]),
//!         TemplateSegment::Literal(" b".to_string()),
//!     ]
//! );
//! ```

use core::fmt;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// One piece of a text node's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateSegment {
    /// Characters copied verbatim. Never empty.
    Literal(String),
    /// A dotted field path. Always has at least one component.
    Binding(Vec<String>),
}

impl TemplateSegment {
    /// Build a binding from path components.
    #[must_use]
    pub fn binding(path: &[&str]) -> Self {
        Self::Binding(path.iter().map(ToString::to_string).collect())
    }

    /// Returns true for [`TemplateSegment::Binding`].
    #[must_use]
    pub const fn is_binding(&self) -> bool {
        matches!(self, Self::Binding(_))
    }
}

impl fmt::Display for TemplateSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Binding(path) => write!(f, "{OPEN}{}{CLOSE}", path.join(".")),
        }
    }
}

/// Byte range of one placeholder, braces included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    start: usize,
    end: usize,
}

impl Placeholder {
    fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start + OPEN.len()..self.end - CLOSE.len()]
    }
}

/// Find the leftmost placeholder starting at or after byte `from`.
fn find_placeholder(text: &str, from: usize) -> Option<Placeholder> {
    let mut search = from;
    while let Some(offset) = text[search..].find(OPEN) {
        let start = search + offset;
        let body = start + OPEN.len();
        // The body may not contain `}`, so the first `}` must open the close.
        if let Some(brace) = text[body..].find('}') {
            let close = body + brace;
            if text[close..].starts_with(CLOSE) {
                return Some(Placeholder {
                    start,
                    end: close + CLOSE.len(),
                });
            }
        }
        search = start + 1;
    }
    None
}

/// Split a placeholder body into its path components.
#[must_use]
pub fn split_path(expression: &str) -> Vec<String> {
    expression
        .trim()
        .split('.')
        .map(|part| part.trim().to_string())
        .collect()
}

/// Split `text` into literal and binding segments, in order.
///
/// Empty literal runs (before the first placeholder, between adjacent
/// placeholders, after the last one) are omitted.
#[must_use]
pub fn parse_template(text: &str) -> Vec<TemplateSegment> {
    let mut segments = Vec::new();
    let mut literal_start = 0;

    while let Some(placeholder) = find_placeholder(text, literal_start) {
        if placeholder.start > literal_start {
            segments.push(TemplateSegment::Literal(
                text[literal_start..placeholder.start].to_string(),
            ));
        }
        segments.push(TemplateSegment::Binding(split_path(placeholder.inner(text))));
        literal_start = placeholder.end;
    }

    if literal_start < text.len() {
        segments.push(TemplateSegment::Literal(text[literal_start..].to_string()));
    }
    segments
}

/// Returns true if `text` contains at least one placeholder.
#[must_use]
pub fn has_bindings(text: &str) -> bool {
    find_placeholder(text, 0).is_some()
}
