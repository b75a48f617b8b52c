//! Placeholder parser for `{name}` syntax
//!
//! Extracts placeholder occurrences with their byte spans. Matching is
//! non-greedy: the first `}` after a `{` closes the placeholder, and the name
//! is exactly the text in between, so `{a{b}` yields the name `a{b`. An empty
//! `{}` and an unclosed `{` are literal text.

use std::collections::HashSet;
use std::ops::Range;

/// A placeholder occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The placeholder name (without braces).
    pub name: String,

    /// Byte range of the raw `{name}` text in the template.
    pub span: Range<usize>,
}

impl Placeholder {
    /// Creates a new placeholder.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parses a template and returns its placeholders in order of appearance.
///
/// # Examples
///
/// ```
/// use nomen_application::variable_resolver::parser::parse_placeholders;
///
/// let refs = parse_placeholders("{env}-{region}-app");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "env");
/// assert_eq!(refs[1].span, 6..14);
/// ```
#[must_use]
pub fn parse_placeholders(template: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find('{') {
        let start = cursor + offset;
        let Some(len) = template[start + 1..].find('}') else {
            break;
        };
        let end = start + len + 2;

        if len > 0 {
            placeholders.push(Placeholder::new(&template[start + 1..end - 1], start..end));
        }
        cursor = end;
    }

    placeholders
}

/// Returns true if the template contains at least one placeholder.
#[must_use]
pub fn has_placeholders(template: &str) -> bool {
    template.contains('{') && !parse_placeholders(template).is_empty()
}

/// Returns the distinct placeholder names in order of first appearance.
#[must_use]
pub fn placeholder_names(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    parse_placeholders(template)
        .into_iter()
        .filter(|p| seen.insert(p.name.clone()))
        .map(|p| p.name)
        .collect()
}
