use crate::scan::tags;
use crate::types::span::Span;

/// A block opened by `{{token ...}}` and closed by the matching
/// `{{/token}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// From the start of the opening tag to the end of the closing tag.
    pub full: Span,
    /// Between the opening and closing tags.
    pub body: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Open,
    Close,
}

/// Finds the first block for `token` in the source.
///
/// Starting at the first opening tag, openings and closings are counted and
/// the block ends at the closing that balances them. Nested blocks using the
/// same token are therefore skipped over. If the tags never balance the last
/// closing tag is used. Returns `None` if there is no opening tag or no
/// closing tag after it.
pub fn find_block(source: &str, token: &str) -> Option<Block> {
    if token.is_empty() {
        return None;
    }
    let mut open: Option<Span> = None;
    let mut last: Option<Span> = None;
    let mut depth = 0usize;
    for span in tags(source) {
        let inner = &source[span.m + 2..span.n - 2];
        match edge(inner, token) {
            Some(Edge::Open) => {
                open.get_or_insert(span);
                depth += 1;
            }
            Some(Edge::Close) if open.is_some() => {
                last = Some(span);
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
    let (open, close) = (open?, last?);
    Some(Block {
        full: open.to(close),
        body: Span::from(open.n..close.m),
    })
}

/// Classifies the inner text of a tag as an opening or closing tag for the
/// token.
///
/// An opening tag is the token after optional whitespace, followed by nothing
/// or by a character that can't continue an identifier, e.g. `{{items}}` or
/// `{{items|limit>3}}` but not `{{itemsX}}`. It must not contain `/` or `}`.
/// A closing tag is `/` immediately followed by the token and optional
/// trailing whitespace.
fn edge(inner: &str, token: &str) -> Option<Edge> {
    if let Some(rest) = inner.strip_prefix('/') {
        let rest = rest.strip_prefix(token)?;
        return rest.trim_end().is_empty().then_some(Edge::Close);
    }
    let rest = inner.trim_start().strip_prefix(token)?;
    if rest.contains(|c: char| c == '/' || c == '}') {
        return None;
    }
    match rest.chars().next() {
        Some(c) if is_ident(c) => None,
        _ => Some(Edge::Open),
    }
}

#[cfg(feature = "unicode")]
fn is_ident(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

#[cfg(not(feature = "unicode"))]
fn is_ident(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='Z' | 'a'..='z' | '_')
}
