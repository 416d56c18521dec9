//! How a [`Value`] is turned into template output.

use std::borrow::Cow;
use std::fmt;
use std::fmt::Write;

use crate::Value;

/// Formats the value the way a tag renders it.
///
/// Values are formatted as follows:
/// - [`Value::None`]: `null`
/// - [`Value::Bool`]: `true` or `false`
/// - [`Value::Integer`] and [`Value::Float`]: using [`Display`][fmt::Display],
///   so `3.0` renders as `3`
/// - [`Value::String`]: the string, unescaped
/// - [`Value::List`]: the elements joined with a comma
/// - [`Value::Map`]: empty string
/// - [`Value::Iter`]: the effective index
/// - [`Value::Object`]: the object's own [`Display`][fmt::Display]
/// - [`Value::Undefined`]: `???`
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::List(list) => {
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    f.write_str(&item.as_text())?;
                }
                Ok(())
            }
            Value::Map(_) => Ok(()),
            Value::Iter(iter) => write!(f, "{}", iter.index()),
            Value::Object(obj) => fmt::Display::fmt(obj, f),
            Value::Undefined => f.write_str("???"),
        }
    }
}

impl Value {
    /// Returns the value as text for filters and concatenation. Same as
    /// [`Display`][fmt::Display] except that `None` and `Undefined` are empty.
    pub(crate) fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            Value::None | Value::Undefined => Cow::Borrowed(""),
            v => Cow::Owned(v.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::value::Iter;
    use crate::Value;

    #[test]
    fn value_display() {
        let tests = [
            (Value::None, "null"),
            (Value::Bool(false), "false"),
            (Value::Integer(-7), "-7"),
            (Value::Float(3.0), "3"),
            (Value::Float(0.25), "0.25"),
            (Value::from("raw <b>"), "raw <b>"),
            (Value::from(vec![Value::from("a"), Value::None, 2.into()]), "a,,2"),
            (Value::from([("a", 1)]), ""),
            (Value::Iter(Iter::new(4, 9)), "4"),
            (Value::Undefined, "???"),
        ];
        for (value, expected) in tests {
            assert_eq!(value.to_string(), expected);
        }
    }

    #[test]
    fn value_as_text() {
        assert_eq!(Value::None.as_text(), "");
        assert_eq!(Value::Undefined.as_text(), "");
        assert_eq!(Value::Integer(1).as_text(), "1");
    }
}
