use std::cmp::max;
use std::fmt;

use crate::types::span::Span;

/// An error that can occur while rendering a template.
///
/// Almost nothing inside a template is fatal: unresolved references render as
/// `???`, unknown filters pass the value through and failing filters keep the
/// value they were given. The errors that do reach the caller are:
///
/// - the render recursed deeper than the engine allows, see
///   [`Engine::set_max_depth`][crate::Engine::set_max_depth];
/// - the context could not be converted to a [`Value`][crate::Value].
///
/// Filter functions also return this type, see [`Filter`][crate::Filter].
///
/// Use the alternate format `{:#}` to get a pretty diagram pointing at the
/// offending tag.
#[derive(Clone)]
pub struct Error {
    msg: String,
    span: Option<(String, Span)>,
}

impl Error {
    /// Construct a new error with the given message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            span: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn span(msg: impl Into<String>, source: &str, span: impl Into<Span>) -> Self {
        Self::new(msg).enrich(source, span)
    }

    pub(crate) fn max_depth(max: usize) -> Self {
        Self::new(format!("reached maximum render depth ({max})"))
    }

    /// Attaches the template source and span, unless the error already points
    /// somewhere more specific.
    pub(crate) fn enrich(mut self, source: &str, span: impl Into<Span>) -> Self {
        if self.span.is_none() && !source.is_empty() {
            self.span = Some((source.to_owned(), span.into()));
        }
        self
    }

    /// Returns the error message without any source diagram.
    pub fn message(&self) -> &str {
        &self.msg
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::new(msg.to_string())
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Self::new(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Self::new(msg)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((source, span)) => fmt_pretty(&self.msg, source, *span, f),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((source, span)) => {
                if f.alternate() {
                    fmt_pretty(&self.msg, source, *span, f)
                } else {
                    write!(f, "{} between bytes {} and {}", self.msg, span.m, span.n)
                }
            }
            None => write!(f, "{}", self.msg),
        }
    }
}

fn fmt_pretty(msg: &str, source: &str, span: Span, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lines: Vec<_> = source.split_terminator('\n').collect();
    let (line, col) = to_line_col(&lines, span.m);
    let width = max(1, str_width(&source[span]));
    let code = lines
        .get(line)
        .or_else(|| lines.last())
        .copied()
        .unwrap_or_default();

    let num = (line + 1).to_string();
    let pad = str_width(&num);
    let underline = "^".repeat(width);

    write!(
        f,
        "\n \
        {0:pad$} |\n \
        {num:>} | {code}\n \
        {0:pad$} | {underline:>width$} {msg}\n",
        "",
        pad = pad,
        num = num,
        code = code,
        underline = underline,
        width = col + width,
        msg = msg
    )
}

fn to_line_col(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut n = 0;
    for (i, line) in lines.iter().enumerate() {
        let len = line.len() + 1;
        if n + len > offset {
            return (i, str_width(&line[..offset - n]));
        }
        n += len;
    }
    (
        lines.len().saturating_sub(1),
        lines.last().map(|l| str_width(l)).unwrap_or(0),
    )
}

#[cfg(feature = "unicode")]
fn str_width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

#[cfg(not(feature = "unicode"))]
fn str_width(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_plain() {
        let err = Error::new("boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(format!("{:#}", err), "boom");
    }

    #[test]
    fn error_display_span() {
        let err = Error::span("reached maximum render depth (2)", "ab {{x}} cd", 3..8);
        assert_eq!(
            err.to_string(),
            "reached maximum render depth (2) between bytes 3 and 8"
        );
        assert_eq!(
            format!("{:#}", err),
            "
   |
 1 | ab {{x}} cd
   |    ^^^^^ reached maximum render depth (2)
"
        );
    }

    #[test]
    fn error_enrich_keeps_innermost_span() {
        let err = Error::span("boom", "{{a}}", 0..5).enrich("xx {{b}}", 3..8);
        assert_eq!(err.to_string(), "boom between bytes 0 and 5");
    }

    #[test]
    fn error_display_second_line() {
        let err = Error::span("boom", "first\n{{x}}", 6..11);
        assert_eq!(
            format!("{:#}", err),
            "
   |
 2 | {{x}}
   | ^^^^^ boom
"
        );
    }
}
