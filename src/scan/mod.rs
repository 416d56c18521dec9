//! Locates tags and blocks in raw template text.
//!
//! There is no separate compile step, a template is scanned each time it is
//! rendered and nested bodies are scanned again when they render.

mod block;

pub use crate::scan::block::find_block;
use crate::types::span::Span;

/// An iterator over the tags in a template.
///
/// A tag is `{{`, followed by at least one character that is not a newline,
/// as few as possible, followed by `}}`. Yields the span of each tag
/// including its delimiters, in document order.
#[derive(Debug)]
pub struct Tags<'source> {
    /// The template source.
    source: &'source str,

    /// A cursor over the template source.
    cursor: usize,
}

/// Returns an iterator over the tags in the template.
pub fn tags(source: &str) -> Tags<'_> {
    Tags { source, cursor: 0 }
}

impl Iterator for Tags<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(j) = self.source[self.cursor..].find("{{") {
            let m = self.cursor + j;
            match self.close(m + 2) {
                Some(n) => {
                    self.cursor = n;
                    return Some(Span::from(m..n));
                }
                None => self.cursor = m + 1,
            }
        }
        self.cursor = self.source.len();
        None
    }
}

impl Tags<'_> {
    /// Finds the end of a tag whose inner text begins at `k`.
    fn close(&self, k: usize) -> Option<usize> {
        let rest = &self.source[k..];
        let line = &rest[..rest.find('\n').unwrap_or(rest.len())];
        let first = line.chars().next()?.len_utf8();
        line[first..].find("}}").map(|p| k + first + p + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<&str> {
        tags(source).map(|span| &source[span]).collect()
    }

    #[test]
    fn tags_basic() {
        assert_eq!(
            texts("Hi {{name}}, {{ if x }}y{{/if}}"),
            ["{{name}}", "{{ if x }}", "{{/if}}"]
        );
    }

    #[test]
    fn tags_empty_template() {
        assert!(texts("").is_empty());
        assert!(texts("no tags here").is_empty());
    }

    #[test]
    fn tags_requires_inner_text() {
        assert!(texts("{{}}").is_empty());
        assert_eq!(texts("{{}}}"), ["{{}}}"]);
    }

    #[test]
    fn tags_do_not_span_lines() {
        assert!(texts("{{a\n}}").is_empty());
        assert_eq!(texts("{{\n{{b}}"), ["{{b}}"]);
    }

    #[test]
    fn tags_non_greedy() {
        assert_eq!(texts("{{a}}b}}"), ["{{a}}"]);
        assert_eq!(texts("{{{{a}}"), ["{{{{a}}"]);
    }

    #[test]
    fn tags_unicode() {
        assert_eq!(texts("→{{é}}←"), ["{{é}}"]);
    }
}
