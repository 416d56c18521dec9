use crate::filters::FilterArg;
use crate::value::{parse_numeric, Iter, List, Map};
use crate::Value;

pub type Result<T> = std::result::Result<T, Error>;

pub enum Error {
    /// When there is a type mismatch.
    Type(
        /// Expected
        &'static str,
        /// Got
        &'static str,
    ),
    /// When a template argument can't be parsed as the expected type.
    Parse(
        /// Expected
        &'static str,
    ),
    /// Failed to convert from i64 to the integer type.
    TryFromInt(
        /// Type
        &'static str,
        /// Value
        i64,
    ),
}

impl FilterArg for Value {
    fn from_value(v: &Value) -> Result<Self> {
        Ok(v.clone())
    }

    fn from_arg(arg: &str) -> Result<Self> {
        Ok(Value::from(arg))
    }
}

impl FilterArg for String {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::List(_) | Value::Map(_) => Err(Error::Type("string", v.human())),
            v => Ok(v.as_text().into_owned()),
        }
    }

    fn from_arg(arg: &str) -> Result<Self> {
        Ok(arg.to_owned())
    }
}

impl FilterArg for bool {
    fn from_value(v: &Value) -> Result<Self> {
        Ok(v.is_truthy())
    }

    fn from_arg(arg: &str) -> Result<Self> {
        match arg.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            _ => Err(Error::Parse("bool")),
        }
    }
}

impl FilterArg for i64 {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Integer(i) => Ok(*i),
            Value::Bool(b) => Ok(i64::from(*b)),
            v => v
                .as_number()
                .map(|n| n as i64)
                .ok_or_else(|| Error::Type("integer", v.human())),
        }
    }

    fn from_arg(arg: &str) -> Result<Self> {
        let arg = arg.trim();
        arg.parse()
            .ok()
            .or_else(|| parse_numeric(arg).map(|n| n as i64))
            .ok_or(Error::Parse("integer"))
    }
}

impl FilterArg for usize {
    fn from_value(v: &Value) -> Result<Self> {
        let i = i64::from_value(v)?;
        usize::try_from(i).map_err(|_| Error::TryFromInt("usize", i))
    }

    fn from_arg(arg: &str) -> Result<Self> {
        let i = i64::from_arg(arg)?;
        usize::try_from(i).map_err(|_| Error::TryFromInt("usize", i))
    }
}

impl FilterArg for f64 {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Bool(b) => Ok(f64::from(u8::from(*b))),
            v => v.as_number().ok_or_else(|| Error::Type("float", v.human())),
        }
    }

    fn from_arg(arg: &str) -> Result<Self> {
        parse_numeric(arg).ok_or(Error::Parse("float"))
    }
}

impl FilterArg for List<Value> {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::List(list) => Ok(list.clone()),
            v => Err(Error::Type("list", v.human())),
        }
    }

    fn from_arg(_: &str) -> Result<Self> {
        Err(Error::Type("list", "string"))
    }
}

impl FilterArg for Map<String, Value> {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Map(map) => Ok(map.clone()),
            v => Err(Error::Type("map", v.human())),
        }
    }

    fn from_arg(_: &str) -> Result<Self> {
        Err(Error::Type("map", "string"))
    }
}

impl FilterArg for Iter {
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::Iter(iter) => Ok(*iter),
            v => Err(Error::Type("iterator", v.human())),
        }
    }

    fn from_arg(_: &str) -> Result<Self> {
        Err(Error::Type("iterator", "string"))
    }
}

impl<T> FilterArg for Option<T>
where
    T: FilterArg,
{
    fn from_value(v: &Value) -> Result<Self> {
        match v {
            Value::None | Value::Undefined => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }

    fn from_arg(arg: &str) -> Result<Self> {
        T::from_arg(arg).map(Some)
    }

    fn missing() -> Option<Self> {
        Some(None)
    }
}
