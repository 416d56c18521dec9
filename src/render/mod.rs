//! Expands templates.
//!
//! Rendering works directly on the template text. All tags are located up
//! front, then each tag is resolved in order and every occurrence of its text
//! is replaced with the result. Block bodies, includes and backtick
//! expressions are rendered by recursing into the same process.

mod resolve;

use std::borrow::Cow;

use crate::filters;
use crate::scan;
use crate::types::span::Span;
use crate::types::tag::{self, Tag};
use crate::value::{Iter, Map, Sign, ValueCow};
use crate::{Engine, Error, Include, Result, Value};

/// Renders templates for a single session.
pub(crate) struct Renderer<'a, 'engine> {
    engine: &'a Engine<'engine>,
    globals: &'a mut Map<String, Value>,
    depth: usize,
}

impl<'a, 'engine> Renderer<'a, 'engine> {
    pub fn new(engine: &'a Engine<'engine>, globals: &'a mut Map<String, Value>) -> Self {
        Self {
            engine,
            globals,
            depth: 0,
        }
    }

    /// Renders the template against the context, with the iterator of the
    /// enclosing loop if there is one.
    pub fn render(&mut self, template: &str, ctx: &Value, iter: Option<Iter>) -> Result<String> {
        if self.depth >= self.engine.max_depth {
            return Err(Error::max_depth(self.engine.max_depth));
        }
        self.depth += 1;
        let result = self.render_impl(template, ctx, iter);
        self.depth -= 1;
        result
    }

    fn render_impl(&mut self, template: &str, ctx: &Value, iter: Option<Iter>) -> Result<String> {
        let spans: Vec<Span> = scan::tags(template).collect();
        let mut out = template.to_owned();
        let mut i = 0;
        while let Some(&span) = spans.get(i) {
            i += 1;
            let skip = self
                .render_tag(&mut out, &template[span], ctx, iter)
                .map_err(|err| err.enrich(template, span))?;
            i += skip;
        }
        if self.engine.compact {
            out = compact(&out);
        }
        Ok(out)
    }

    /// Renders a single tag, replacing it in `out`.
    ///
    /// Returns the number of following tags that were consumed as part of the
    /// tag's block.
    fn render_tag(
        &mut self,
        out: &mut String,
        raw: &str,
        ctx: &Value,
        iter: Option<Iter>,
    ) -> Result<usize> {
        let (inner, self_closing) = tag::unwrap(raw);
        let inner = self.substitute(inner, ctx, iter)?;
        let tag = Tag::parse(&inner, self_closing);

        let mut text = Cow::Borrowed(raw);
        let mut body = None;
        let mut skip = 0;
        if !tag.self_closing
            && !tag.token.is_empty()
            && out.contains(&format!("{{{{/{}", tag.token))
        {
            match scan::find_block(out, tag.token) {
                Some(block) => {
                    let full = &out.as_str()[block.full];
                    skip = scan::tags(full).count().saturating_sub(1);
                    body = Some(out.as_str()[block.body].to_owned()).filter(|b| !b.is_empty());
                    text = Cow::Owned(full.to_owned());
                }
                None => log::debug!("unterminated block `{}`", tag.token),
            }
        }

        if tag::is_else(&text) {
            return Ok(skip);
        }

        let mut result = self.classify(&tag, body.as_deref(), ctx, iter)?;
        if tag.conditional {
            let branch = self.conditional(&result, body.as_deref(), ctx, iter)?;
            result = ValueCow::Owned(Value::String(branch));
        }
        if result.is_composite() {
            log::trace!("tag `{}` resolved to a {}, leaving it", text, result.human());
            return Ok(skip);
        }
        *out = out.replace(&*text, &result.to_string());
        Ok(skip)
    }

    /// Replaces each `` `expr` `` in the tag with the result of rendering
    /// `{{expr}}`.
    fn substitute<'s>(
        &mut self,
        inner: &'s str,
        ctx: &Value,
        iter: Option<Iter>,
    ) -> Result<Cow<'s, str>> {
        if !inner.contains('`') {
            return Ok(Cow::Borrowed(inner));
        }
        let mut buf = String::with_capacity(inner.len());
        let mut rest = inner;
        while let Some(i) = rest.find('`') {
            let after = &rest[i + 1..];
            let Some(first) = after.chars().next() else { break };
            let Some(j) = after[first.len_utf8()..].find('`') else { break };
            let expr = &after[..first.len_utf8() + j];
            buf.push_str(&rest[..i]);
            buf.push_str(&self.render(&format!("{{{{{expr}}}}}"), ctx, iter)?);
            rest = &after[expr.len() + 1..];
        }
        buf.push_str(rest);
        Ok(Cow::Owned(buf))
    }

    /// Resolves the value of a tag, first match wins.
    fn classify<'c>(
        &mut self,
        tag: &Tag<'_>,
        body: Option<&str>,
        ctx: &'c Value,
        iter: Option<Iter>,
    ) -> Result<ValueCow<'c>> {
        let engine = self.engine;
        let property = tag.property;
        let filters = &tag.filters;
        // a conditional body is rendered by `conditional`, never per value
        let body = if tag.conditional { None } else { body };

        if let Some(global) = self.globals.get(property).filter(|v| !v.is_none()) {
            log::trace!("`{property}` is a global");
            let global = global.clone();
            return self.eval_block(ValueCow::Owned(global), filters, body);
        }

        if let Some(include) = engine.includes.get(property) {
            log::trace!("`{property}` is an include");
            let source = match include {
                Include::Source(source) => Cow::Borrowed(&**source),
                Include::Fn(f) => Cow::Owned(f()),
            };
            let rendered = self.render(&source, ctx, None)?;
            return Ok(self.pipe(ValueCow::Owned(Value::String(rendered)), filters));
        }

        if property.contains('#') {
            return Ok(match iter {
                Some(iter) => {
                    let iter = iter.with_sign(Sign::from_marker(property));
                    self.pipe(ValueCow::Owned(Value::Iter(iter)), filters)
                }
                None => ValueCow::Owned(Value::Undefined),
            });
        }

        if property == "." {
            return Ok(self.pipe(ValueCow::Borrowed(ctx), filters));
        }

        if property.contains('.') {
            let value = self.resolve_path(ctx, property);
            return self.eval_block(value, filters, body);
        }

        let value = resolve::lookup(ctx, property);
        if tag.conditional {
            let value = value.unwrap_or(ValueCow::Owned(Value::None));
            return Ok(self.pipe(value, filters));
        }
        match value {
            Some(value) if value.is_composite() || body.is_some() => {
                self.eval_block(value, filters, body)
            }
            None if body.is_some() => self.eval_block(ValueCow::Owned(Value::None), filters, body),
            Some(value) => Ok(self.pipe(value, filters)),
            None => Ok(ValueCow::Owned(Value::Undefined)),
        }
    }

    /// Resolves a dotted path such as `user.address.city`. Paths that start
    /// with the name of a global are resolved against the globals.
    fn resolve_path<'c>(&self, ctx: &'c Value, path: &str) -> ValueCow<'c> {
        let segments: Vec<&str> = path.split('.').collect();
        match self.globals.get(segments[0]) {
            Some(global) if global.is_truthy() => {
                ValueCow::Owned(resolve::walk(global, &segments[1..]).into_owned())
            }
            _ => resolve::walk(ctx, &segments),
        }
    }

    /// Pipes the value through the filters and expands it against the body.
    fn eval_block<'c>(
        &mut self,
        value: ValueCow<'c>,
        filters: &[&str],
        body: Option<&str>,
    ) -> Result<ValueCow<'c>> {
        let value = self.pipe(value, filters);
        if !value.is_composite() {
            return match body {
                Some(body) if value.is_truthy() => {
                    let rendered = self.render(body, &value, None)?;
                    Ok(ValueCow::Owned(Value::String(rendered)))
                }
                Some(_) => Ok(ValueCow::Owned(Value::Undefined)),
                None => Ok(value),
            };
        }
        let rendered = match &*value {
            Value::List(list) => {
                let mut buf = String::new();
                for (idx, item) in list.iter().enumerate() {
                    match body {
                        Some(body) => {
                            let iter = Iter::new(idx, list.len());
                            buf.push_str(&self.render(body, item, Some(iter))?);
                        }
                        None => buf.push_str(&item.as_text()),
                    }
                }
                buf
            }
            _ => self.render(body.unwrap_or_default(), &value, None)?,
        };
        Ok(ValueCow::Owned(Value::String(rendered)))
    }

    /// Renders the body and picks the branch around the first `{{else}}`.
    ///
    /// The else branch is chosen only if the result is exactly `false`.
    fn conditional(
        &mut self,
        result: &Value,
        body: Option<&str>,
        ctx: &Value,
        iter: Option<Iter>,
    ) -> Result<String> {
        let rendered = self.render(body.unwrap_or_default(), ctx, iter)?;
        let (then, otherwise) = match tag::find_else(&rendered) {
            Some(marker) => {
                let rest = &rendered[marker.n..];
                let end = tag::find_else(rest).map_or(rest.len(), |s| s.m);
                (&rendered[..marker.m], &rest[..end])
            }
            None => (rendered.as_str(), ""),
        };
        let branch = if *result == Value::Bool(false) {
            otherwise
        } else {
            then
        };
        Ok(branch.to_owned())
    }

    fn pipe<'c>(&mut self, value: ValueCow<'c>, exprs: &[&str]) -> ValueCow<'c> {
        if exprs.is_empty() {
            return value;
        }
        let engine = self.engine;
        ValueCow::Owned(filters::pipe(
            &engine.filters,
            engine.delimiter,
            self.globals,
            value.into_owned(),
            exprs,
        ))
    }
}

/// Removes whitespace between a `>` and the next `<`.
pub(crate) fn compact(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find('>') {
        out.push_str(&rest[..=i]);
        rest = &rest[i + 1..];
        let trimmed = rest.trim_start_matches(is_space);
        if trimmed.len() < rest.len() && trimmed.starts_with('<') {
            rest = trimmed;
        }
    }
    out.push_str(rest);
    out
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_between_tags() {
        assert_eq!(compact("<ul>\n  <li>a</li>\n</ul>"), "<ul><li>a</li></ul>");
        assert_eq!(compact("a > b < c"), "a >< c");
        assert_eq!(compact("<p> text </p>"), "<p> text </p>");
        assert_eq!(compact("no markup"), "no markup");
    }

    #[test]
    fn compact_is_idempotent() {
        let once = compact("<a> \n <b>\t\t<c>x</c> </b>");
        assert_eq!(compact(&once), once);
    }
}
