//! Defines the [`Value`] enum, representing any valid renderable data.

mod cow;
mod fmt;
mod from;
mod iter;
mod object;
#[cfg(feature = "serde")]
mod ser;

use std::cmp::Ordering;
pub use std::collections::BTreeMap as Map;
use std::mem;
use std::sync::Arc;
pub use std::vec::Vec as List;

pub(crate) use crate::value::cow::ValueCow;
pub use crate::value::iter::{Iter, Sign};
pub use crate::value::object::Object;
#[cfg(feature = "serde")]
pub use crate::value::ser::to_value;

/// Data to be rendered represented as a recursive enum.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(List<Value>),
    Map(Map<String, Value>),
    /// The position of the enclosing loop iteration, see [`Iter`].
    Iter(Iter),
    /// A host object exposing fields and methods to templates.
    Object(Arc<dyn Object>),
    /// The result of a reference that could not be resolved. Renders as
    /// `???`.
    Undefined,
}

impl Default for Value {
    fn default() -> Self {
        Self::None
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(s), Self::Bool(o)) => s == o,
            (Self::Integer(s), Self::Integer(o)) => s == o,
            (Self::Float(s), Self::Float(o)) => s == o,
            (Self::String(s), Self::String(o)) => s == o,
            (Self::List(s), Self::List(o)) => s == o,
            (Self::Map(s), Self::Map(o)) => s == o,
            (Self::Iter(s), Self::Iter(o)) => s == o,
            (Self::Object(s), Self::Object(o)) => Arc::ptr_eq(s, o),
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}

impl Eq for Value {}

impl Value {
    pub(crate) fn human(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Iter(_) => "iterator",
            Value::Object(_) => "object",
            Value::Undefined => "undefined",
        }
    }

    pub(crate) fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub(crate) fn is_composite(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_))
    }

    /// Returns whether the value counts as true in a condition.
    ///
    /// `None`, `false`, zero, `""`, `"0"`, empty lists and maps, and
    /// [`Value::Undefined`] are false, everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None | Value::Undefined => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::List(l) => !l.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Iter(_) | Value::Object(_) => true,
        }
    }

    /// Like [`is_truthy`][Value::is_truthy] but whitespace-only strings are
    /// also considered blank.
    pub(crate) fn is_blank(&self) -> bool {
        match self {
            Value::String(s) if s.trim().is_empty() => true,
            v => !v.is_truthy(),
        }
    }

    /// The numeric "size" of the value used by the comparison filters: the
    /// length of a list or map, the value of a number or numeric string, the
    /// effective index of an iterator, and zero otherwise.
    pub(crate) fn size(&self) -> f64 {
        match self {
            Value::List(l) => l.len() as f64,
            Value::Map(m) => m.len() as f64,
            Value::Bool(true) => 1.0,
            Value::Integer(i) => *i as f64,
            Value::Float(f) => *f,
            Value::String(s) => parse_numeric(s).unwrap_or(0.0),
            Value::Iter(iter) => iter.index() as f64,
            _ => 0.0,
        }
    }

    /// Returns the value as a number if it is numeric.
    ///
    /// Numeric strings are parsed, iterators return their effective index.
    pub(crate) fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => parse_numeric(s),
            Value::Iter(iter) => Some(iter.index() as f64),
            _ => None,
        }
    }

    /// Returns the value as an integer, reading the numeric prefix of
    /// strings and truncating floats.
    pub(crate) fn to_int(&self) -> i64 {
        match self {
            Value::Bool(b) => i64::from(*b),
            Value::Integer(i) => *i,
            Value::Float(f) => *f as i64,
            Value::String(s) => parse_prefix(s) as i64,
            Value::Iter(iter) => iter.index() as i64,
            _ => 0,
        }
    }

    /// Returns the value as a float, reading the numeric prefix of strings.
    pub(crate) fn to_float(&self) -> f64 {
        match self {
            Value::String(s) => parse_prefix(s),
            v => v.as_number().unwrap_or_else(|| v.to_int() as f64),
        }
    }

    /// Loosely compares the value with a raw template argument.
    ///
    /// Numbers and numeric strings compare numerically, booleans compare by
    /// truthiness, `None` equals the empty string.
    pub(crate) fn loose_eq(&self, other: &str) -> bool {
        match self {
            Value::None | Value::Undefined => other.is_empty(),
            Value::Bool(b) => *b == Value::String(other.to_owned()).is_truthy(),
            Value::List(_) | Value::Map(_) => false,
            v => match (v.as_number(), parse_numeric(other)) {
                (Some(a), Some(b)) => a == b,
                _ => v.as_text() == other,
            },
        }
    }

    /// Orders two values, numerically when both are numeric and by their text
    /// otherwise.
    pub(crate) fn loose_cmp(&self, other: &Value) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => self.as_text().cmp(&other.as_text()),
        }
    }

    /// Returns the iterator's effective index as an integer, any other value
    /// is returned unchanged.
    pub(crate) fn unwrap_iter(self) -> Value {
        match self {
            Value::Iter(iter) => Value::Integer(iter.index() as i64),
            v => v,
        }
    }
}

/// Parses a string that is entirely a decimal number, surrounding whitespace
/// allowed.
pub(crate) fn parse_numeric(s: &str) -> Option<f64> {
    let s = s.trim();
    let valid = s.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if valid {
        s.parse().ok()
    } else {
        None
    }
}

/// Parses the longest numeric prefix of the string, or zero.
pub(crate) fn parse_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits = |mut i: usize| {
        while bytes.get(i).map_or(false, u8::is_ascii_digit) {
            i += 1;
        }
        i
    };
    end = digits(end);
    if bytes.get(end) == Some(&b'.') {
        end = digits(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let after = digits(exp);
        if after > exp {
            end = after;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_truthiness() {
        let falsy = [
            Value::None,
            Value::Undefined,
            Value::Bool(false),
            Value::Integer(0),
            Value::Float(0.0),
            Value::from(""),
            Value::from("0"),
            Value::List(List::new()),
            Value::Map(Map::new()),
        ];
        for v in falsy {
            assert!(!v.is_truthy(), "{v:?} should be falsy");
        }
        let truthy = [
            Value::Bool(true),
            Value::Integer(-1),
            Value::from(" "),
            Value::from("false"),
            Value::from(vec![0]),
            Value::Iter(Iter::new(0, 1)),
        ];
        for v in truthy {
            assert!(v.is_truthy(), "{v:?} should be truthy");
        }
    }

    #[test]
    fn value_blank() {
        assert!(Value::from("  \t").is_blank());
        assert!(!Value::from(" x ").is_blank());
    }

    #[test]
    fn value_size() {
        assert_eq!(Value::from(vec![1, 2, 3]).size(), 3.0);
        assert_eq!(Value::from("12").size(), 12.0);
        assert_eq!(Value::from("twelve").size(), 0.0);
        assert_eq!(Value::Float(2.5).size(), 2.5);
        assert_eq!(Value::None.size(), 0.0);
    }

    #[test]
    fn value_loose_eq() {
        assert!(Value::Integer(3).loose_eq("3"));
        assert!(Value::Integer(3).loose_eq("3.0"));
        assert!(Value::from("abc").loose_eq("abc"));
        assert!(!Value::from("abc").loose_eq("ABC"));
        assert!(Value::Bool(true).loose_eq("yes"));
        assert!(Value::Bool(false).loose_eq(""));
        assert!(Value::None.loose_eq(""));
        assert!(!Value::from(vec![1]).loose_eq("1"));
    }

    #[test]
    fn value_parse_prefix() {
        assert_eq!(parse_prefix("12abc"), 12.0);
        assert_eq!(parse_prefix("  -1.5e2x"), -150.0);
        assert_eq!(parse_prefix("1.2.3"), 1.2);
        assert_eq!(parse_prefix("1e"), 1.0);
        assert_eq!(parse_prefix("abc"), 0.0);
        assert_eq!(parse_prefix(""), 0.0);
    }

    #[test]
    fn value_parse_numeric() {
        assert_eq!(parse_numeric(" 42 "), Some(42.0));
        assert_eq!(parse_numeric("-0.5"), Some(-0.5));
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("4two"), None);
        assert_eq!(parse_numeric(""), None);
    }
}
