//! The filters every [`Engine`] starts with.

use std::fmt::Write;

use regex::{Regex, RegexBuilder};

use crate::filters::FilterState;
use crate::value::{parse_numeric, parse_prefix, List};
use crate::{Engine, Error, Result, Value};

pub(crate) fn register(engine: &mut Engine<'_>) {
    engine.add_filter("empty", empty);
    engine.add_filter("notempty", notempty);
    engine.add_filter("blank", blank);
    engine.add_filter("more", more);
    engine.add_filter("less", less);
    engine.add_filter("ormore", ormore);
    engine.add_filter("orless", orless);
    engine.add_filter("between", between);
    engine.add_filter("equals", equals);
    engine.add_filter("notequals", notequals);
    engine.add_filter("like", like);
    engine.add_filter("notlike", notlike);
    engine.add_filter("upcase", upcase);
    engine.add_filter("downcase", downcase);
    engine.add_filter("capcase", capcase);
    engine.add_filter("chop", chop);
    engine.add_filter("tease", tease);
    engine.add_filter("trim", trim);
    engine.add_filter("pack", pack);
    engine.add_filter("round", round);
    engine.add_filter("clean", clean);
    engine.add_filter("size", size);
    engine.add_filter("length", size);
    engine.add_filter("reverse", reverse);
    engine.add_filter("join", join);
    engine.add_filter("limit", limit);
    engine.add_filter("split", split);
    engine.add_filter("choose", choose);
    engine.add_filter("toggle", toggle);
    engine.add_filter("sort", sort);
    engine.add_filter("fix", fix);
    engine.add_filter("mod", modulo);
    engine.add_filter("divisible", divisible);
    engine.add_filter("even", even);
    engine.add_filter("odd", odd);
    engine.add_filter("number", number);
    engine.add_filter("url", url);
    engine.add_filter("bool", truthy);
    engine.add_filter("falsy", falsy);
    engine.add_filter("first", first);
    engine.add_filter("last", last);
    engine.filters.insert("call", Box::new(call));
    engine.filters.insert("set", Box::new(set));
}

/// Passes the value if the condition holds, otherwise `false`.
fn gate(value: Value, pass: bool) -> Value {
    if pass {
        value
    } else {
        Value::Bool(false)
    }
}

/// Integral results become integers so that they render without a fraction.
fn from_f64(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Integer(n as i64)
    } else {
        Value::Float(n)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

pub fn empty(value: Value) -> Value {
    let blank = value.is_blank();
    gate(value, blank)
}

pub fn notempty(value: Value) -> Value {
    let blank = value.is_blank();
    gate(value, !blank)
}

pub fn blank(value: Value, fallback: String) -> Value {
    if value.is_truthy() || value == Value::Integer(0) {
        value
    } else {
        Value::String(fallback)
    }
}

pub fn more(value: Value, n: f64) -> Value {
    let pass = value.size() > n;
    gate(value, pass)
}

pub fn less(value: Value, n: f64) -> Value {
    let pass = value.size() < n;
    gate(value, pass)
}

pub fn ormore(value: Value, n: f64) -> Value {
    let pass = value.size() >= n;
    gate(value, pass)
}

pub fn orless(value: Value, n: f64) -> Value {
    let pass = value.size() <= n;
    gate(value, pass)
}

pub fn between(value: Value, lo: f64, hi: f64) -> Value {
    let size = value.size();
    gate(from_f64(size), size >= lo && size <= hi)
}

pub fn equals(value: Value, other: String) -> Value {
    let pass = value.loose_eq(&other);
    gate(value, pass)
}

pub fn notequals(value: Value, other: String) -> Value {
    let pass = !value.loose_eq(&other);
    gate(value, pass)
}

fn regex(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|err| Error::new(format!("invalid pattern `{pattern}`: {err}")))
}

pub fn like(s: String, pattern: String) -> Result<bool> {
    Ok(regex(&pattern)?.is_match(&s))
}

pub fn notlike(s: String, pattern: String) -> Result<bool> {
    Ok(!regex(&pattern)?.is_match(&s))
}

pub fn truthy(value: Value) -> bool {
    value.is_truthy()
}

pub fn falsy(value: Value) -> bool {
    !value.is_truthy()
}

pub fn first(value: Value) -> bool {
    matches!(value, Value::Iter(iter) if iter.is_first())
}

pub fn last(value: Value) -> bool {
    matches!(value, Value::Iter(iter) if iter.is_last())
}

////////////////////////////////////////////////////////////////////////////////
// Strings
////////////////////////////////////////////////////////////////////////////////

pub fn upcase(s: String) -> String {
    s.to_uppercase()
}

pub fn downcase(s: String) -> String {
    s.to_lowercase()
}

/// Uppercases the first character of each whitespace separated word.
pub fn capcase(s: String) -> String {
    let mut out = String::with_capacity(s.len());
    let mut boundary = true;
    for c in s.chars() {
        if boundary {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        boundary = c.is_whitespace();
    }
    out
}

pub fn chop(s: String, n: usize) -> String {
    match s.char_indices().nth(n) {
        Some((i, _)) => format!("{}...", &s[..i]),
        None => s,
    }
}

pub fn tease(s: String, n: usize) -> String {
    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() > n {
        format!("{}...", words[..n].join(" "))
    } else {
        words.join(" ")
    }
}

pub fn trim(s: String) -> String {
    s.trim().to_owned()
}

/// Trims the string and collapses runs of two or more whitespace characters
/// into a single space.
pub fn pack(s: String) -> String {
    let mut out = String::with_capacity(s.len());
    let mut run = String::new();
    for c in s.trim().chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        if run.chars().nth(1).is_some() {
            out.push(' ');
        } else {
            out.push_str(&run);
        }
        run.clear();
        out.push(c);
    }
    out
}

/// Removes anything that looks like an HTML tag.
pub fn clean(s: String) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s.as_str();
    while let Some(i) = rest.find('<') {
        out.push_str(&rest[..i]);
        let after = &rest[i + 1..];
        match after.find('>') {
            Some(j) if j > 0 => rest = &after[j + 1..],
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn split(s: String, sep: Option<String>) -> Result<Vec<String>> {
    let sep = sep.unwrap_or_else(|| String::from(","));
    if sep.is_empty() {
        return Err(Error::new("split separator must not be empty"));
    }
    Ok(s.split(sep.as_str()).map(String::from).collect())
}

pub fn choose(value: Value, then: String, otherwise: Option<String>) -> String {
    if value.is_truthy() {
        then
    } else {
        otherwise.unwrap_or_default()
    }
}

/// Looks the value up in a list of names and returns the value at the same
/// position in a comma separated list of alternatives.
///
/// ```text
/// {{ status | toggle>on,off>enabled,disabled>unknown }}
/// ```
pub fn toggle(value: Value, names: String, values: String, fallback: Option<String>) -> String {
    let values: Vec<&str> = values.split(',').collect();
    names
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|name| !name.is_empty())
        .position(|name| value.loose_eq(name))
        .and_then(|i| values.get(i))
        .map(|v| (*v).to_owned())
        .or(fallback)
        .unwrap_or_default()
}

/// Percent-encodes everything except alphanumerics, the unreserved marks
/// `-_.!~*'()`, the reserved characters `;,/?:@&=+$` and `#`.
pub fn url(s: String) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(char::from(b)),
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => out.push(char::from(b)),
            b';' | b',' | b'/' | b'?' | b':' | b'@' | b'&' | b'=' | b'+' | b'$' | b'#' => {
                out.push(char::from(b))
            }
            b => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

////////////////////////////////////////////////////////////////////////////////
// Numbers
////////////////////////////////////////////////////////////////////////////////

pub fn round(n: f64) -> f64 {
    n.round()
}

/// Formats the number with `n` decimals and `,` as thousands separator.
pub fn fix(value: Value, n: usize) -> Result<String> {
    if n > usize::from(u16::MAX) {
        return Err(Error::new(format!(
            "precision must be at most {}, got {n}",
            u16::MAX
        )));
    }
    let num = value.to_float();
    let rounded = if n <= 15 {
        let factor = 10f64.powi(n as i32);
        (num.abs() * factor).round() / factor
    } else {
        num.abs()
    };
    let formatted = format!("{rounded:.n$}");
    let (int, frac) = match formatted.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int.len() / 3 + 1);
    if num < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    Ok(out)
}

pub fn modulo(value: Value, n: i64) -> Result<i64> {
    value
        .to_int()
        .checked_rem(n)
        .ok_or_else(|| Error::new("modulo by zero"))
}

pub fn divisible(value: Value, n: i64) -> Result<Value> {
    if value == Value::Bool(false) {
        return Ok(value);
    }
    Ok(Value::Bool(modulo(value, n)? == 0))
}

fn parity(value: &Value) -> Result<bool> {
    match value {
        Value::String(s) if parse_numeric(s).is_none() => Err(Error::new(format!(
            "expected a number, found `{s}`"
        ))),
        Value::List(_) | Value::Map(_) | Value::Object(_) => Err(Error::new(format!(
            "expected a number, found {}",
            value.human()
        ))),
        v => Ok(v.to_int() % 2 == 0),
    }
}

pub fn even(value: Value) -> Result<Value> {
    let value = value.unwrap_iter();
    let even = parity(&value)?;
    Ok(gate(value, even))
}

pub fn odd(value: Value) -> Result<Value> {
    let value = value.unwrap_iter();
    let even = parity(&value)?;
    Ok(gate(value, !even))
}

/// Parses a number after dropping everything except digits, `-` and `.`.
pub fn number(s: String) -> f64 {
    let s: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | '.'))
        .collect();
    parse_prefix(&s)
}

////////////////////////////////////////////////////////////////////////////////
// Collections
////////////////////////////////////////////////////////////////////////////////

pub fn size(value: Value) -> i64 {
    let n = match value {
        Value::List(list) => list.len(),
        Value::Map(map) => map.len(),
        Value::Iter(iter) => iter.index(),
        v => v.as_text().chars().count(),
    };
    i64::try_from(n).unwrap_or(i64::MAX)
}

pub fn reverse(value: Value) -> Result<Value> {
    match value {
        Value::List(mut list) => {
            list.reverse();
            Ok(Value::List(list))
        }
        Value::String(s) => Ok(Value::String(s.chars().rev().collect())),
        v => Err(Error::new(format!(
            "expected list or string, found {}",
            v.human()
        ))),
    }
}

pub fn join(value: Value, sep: Option<String>) -> Result<String> {
    let items: Vec<Value> = match value {
        Value::List(list) => list,
        Value::Map(map) => map.into_values().collect(),
        v => {
            return Err(Error::new(format!(
                "expected list or map, found {}",
                v.human()
            )))
        }
    };
    let sep = sep.as_deref().unwrap_or(",");
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(&item.as_text());
    }
    Ok(out)
}

/// Takes `count` elements starting at `offset`. A negative offset counts from
/// the end of the list, a negative count stops that many elements before the
/// end.
pub fn limit(list: List<Value>, count: i64, offset: Option<i64>) -> List<Value> {
    let len = i64::try_from(list.len()).unwrap_or(i64::MAX);
    let start = match offset.unwrap_or(0) {
        o if o < 0 => (len + o).max(0),
        o => o.min(len),
    };
    let end = if count < 0 {
        (len + count).max(start)
    } else {
        start.saturating_add(count).min(len)
    };
    list.into_iter()
        .skip(start as usize)
        .take((end - start) as usize)
        .collect()
}

/// Sorts ascending. When a key is given and both elements are maps holding
/// it, they are compared by that entry instead.
pub fn sort(mut list: List<Value>, key: Option<String>) -> List<Value> {
    list.sort_by(|a, b| {
        let entry = |v: &Value| match (v, key.as_deref()) {
            (Value::Map(map), Some(key)) => map.get(key).filter(|v| !v.is_none()).cloned(),
            _ => None,
        };
        match (entry(a), entry(b)) {
            (Some(a), Some(b)) => a.loose_cmp(&b),
            _ => a.loose_cmp(b),
        }
    });
    list
}

////////////////////////////////////////////////////////////////////////////////
// Session and objects
////////////////////////////////////////////////////////////////////////////////

/// Invokes a method on an object, `{{ user | call>greet>Hello }}`.
fn call(state: FilterState<'_>) -> Result<Value> {
    let Value::Object(obj) = state.value else {
        return Err(Error::new(format!(
            "filter `{}` expected object value, found {}",
            state.name,
            state.value.human()
        )));
    };
    let (method, args) = state
        .args
        .split_first()
        .ok_or_else(|| Error::new(format!("filter `{}` expected a method name", state.name)))?;
    let args: Vec<Value> = args.iter().map(|arg| Value::from(*arg)).collect();
    obj.call_method(method.trim(), &args)
}

/// Stores the value in the session globals, `{{ name | set>greeting }}`.
fn set(state: FilterState<'_>) -> Result<Value> {
    let key = state
        .args
        .first()
        .map(|key| key.trim())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| Error::new(format!("filter `{}` expected a global name", state.name)))?;
    state.globals.insert(key.to_owned(), state.value.clone());
    Ok(Value::from(""))
}
