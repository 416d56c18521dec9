//! Resolution of properties against the render context.

use crate::value::ValueCow;
use crate::Value;

/// Looks up a single key on a value.
///
/// Maps are indexed by key, lists by a numeric index and objects through
/// [`Object::get`][crate::Object::get]. Returns `None` if the key doesn't
/// exist or the value has no keys, a key holding `None` is returned as is.
pub(crate) fn lookup<'a>(value: &'a Value, key: &str) -> Option<ValueCow<'a>> {
    match value {
        Value::Map(map) => map.get(key).map(ValueCow::Borrowed),
        Value::List(list) => key
            .parse::<usize>()
            .ok()
            .and_then(|i| list.get(i))
            .map(ValueCow::Borrowed),
        Value::Object(obj) => obj.get(key).map(ValueCow::Owned),
        _ => None,
    }
}

/// Walks the remaining segments of a dotted path starting at `value`.
///
/// The walk continues while the current value is a list or map or is truthy.
/// A segment that is missing or holds `None` ends the walk with
/// [`Value::Undefined`]. A falsy scalar ends the walk early and is the
/// result.
pub(crate) fn walk<'a>(value: &'a Value, segments: &[&str]) -> ValueCow<'a> {
    let mut current = ValueCow::Borrowed(value);
    for segment in segments {
        if !(current.is_composite() || current.is_truthy()) {
            break;
        }
        let next = match &current {
            ValueCow::Borrowed(v) => lookup(*v, segment),
            ValueCow::Owned(v) => lookup(v, segment).map(|v| ValueCow::Owned(v.into_owned())),
        };
        current = match next {
            Some(v) if !v.is_none() => v,
            _ => return ValueCow::Owned(Value::Undefined),
        };
    }
    current
}
