//! The anatomy of a single `{{ ... }}` tag.

use crate::types::span::Span;

/// A tag parsed from the text between its `{{` and `}}` delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Written as `{{ ... /}}`, never opens a block.
    pub self_closing: bool,
    /// Written as `{{if ...}}`.
    pub conditional: bool,
    /// The property to resolve, with surrounding whitespace and any leading
    /// `if` removed.
    pub property: &'a str,
    /// The name that a closing `{{/token}}` tag must use.
    pub token: &'a str,
    /// The filter expressions in the order they apply, untrimmed.
    pub filters: Vec<&'a str>,
}

/// Strips the delimiters from raw tag text, returning the inner text and
/// whether the tag is self-closing.
pub fn unwrap(raw: &str) -> (&str, bool) {
    let inner = raw
        .strip_prefix("{{")
        .and_then(|s| s.strip_suffix("}}"))
        .unwrap_or(raw);
    match inner.strip_suffix('/') {
        Some(inner) => (inner, true),
        None => (inner, false),
    }
}

/// Returns whether the text is exactly a bare `{{else}}` tag.
pub fn is_else(text: &str) -> bool {
    text.strip_prefix("{{")
        .and_then(|s| s.strip_suffix("}}"))
        .map_or(false, |inner| inner.trim() == "else")
}

/// Finds the first `{{else}}` marker in the text.
pub fn find_else(text: &str) -> Option<Span> {
    let mut i = 0;
    while let Some(j) = text[i..].find("{{") {
        let m = i + j;
        let rest = text[m + 2..].trim_start();
        if let Some(rest) = rest.strip_prefix("else") {
            let rest = rest.trim_start();
            if rest.starts_with("}}") {
                let n = text.len() - rest.len() + 2;
                return Some(Span::from(m..n));
            }
        }
        i = m + 2;
    }
    None
}

impl<'a> Tag<'a> {
    /// Parses the inner text of a tag.
    ///
    /// The text is split on `|`, the first segment is the property and the
    /// rest are filter expressions. A conditional tag without any filters
    /// tests the property with `notempty`.
    pub fn parse(inner: &'a str, self_closing: bool) -> Self {
        let conditional = inner.trim().starts_with("if ");
        let mut segments = inner.split('|');
        let head = segments.next().unwrap_or_default();
        let mut filters: Vec<&str> = segments.collect();
        let property = if conditional {
            if filters.is_empty() {
                filters.push("notempty");
            }
            let head = head.trim_start();
            head.strip_prefix("if").unwrap_or(head).trim()
        } else {
            head.trim()
        };
        let token = if conditional { "if" } else { property };
        Self {
            self_closing,
            conditional,
            property,
            token,
            filters,
        }
    }
}
