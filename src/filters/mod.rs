mod args;
mod builtins;

use std::collections::BTreeMap;

pub(crate) use crate::filters::builtins::register;
use crate::value::Map;
use crate::{Error, Result, Value};

pub(crate) type FilterFn = dyn Fn(FilterState<'_>) -> Result<Value> + Send + Sync + 'static;

/// Everything a single filter invocation can see.
pub struct FilterState<'a> {
    /// The name the filter was invoked with.
    pub(crate) name: &'a str,
    /// The piped value.
    pub(crate) value: &'a Value,
    /// The raw arguments, split on the engine delimiter.
    pub(crate) args: &'a [&'a str],
    /// The globals of the current session.
    pub(crate) globals: &'a mut Map<String, Value>,
}

pub(crate) fn new<F, R, A>(f: F) -> Box<FilterFn>
where
    F: Filter<R, A> + Send + Sync + 'static,
    R: FilterReturn,
    A: FilterArgs,
{
    Box::new(move |state: FilterState<'_>| -> Result<Value> {
        let args = A::from_state(&state)?;
        let result = Filter::filter(&f, args);
        FilterReturn::to_value(result)
    })
}

/// Passes the value through each filter expression in turn.
///
/// An expression is the filter name followed by its arguments, separated by
/// `delimiter`, e.g. `chop>10`. Unknown filters pass the value through
/// unchanged. A filter that fails leaves the value it was given in place and
/// the chain continues with the next expression.
pub(crate) fn pipe(
    filters: &BTreeMap<&str, Box<FilterFn>>,
    delimiter: char,
    globals: &mut Map<String, Value>,
    mut value: Value,
    exprs: &[&str],
) -> Value {
    for expr in exprs {
        let mut parts = expr.split(delimiter);
        let name = parts.next().unwrap_or_default().trim();
        let args: Vec<&str> = parts.collect();
        let Some(f) = filters.get(name) else {
            log::trace!("unknown filter `{name}`, passing value through");
            continue;
        };
        let state = FilterState {
            name,
            value: &value,
            args: &args,
            globals: &mut *globals,
        };
        match f(state) {
            Ok(v) => value = v,
            Err(err) => log::debug!("filter `{name}` failed, keeping previous value: {err}"),
        }
    }
    value
}

/// Represents any filter function.
///
/// This trait is used by the [`Engine::add_filter`][crate::Engine::add_filter]
/// method to abstract over a variety of function and closure types. This
/// includes filters with variable argument types, return types and arity. The
/// first argument to a filter function always receives the piped value. It
/// can then have up to four more arguments which receive the text written
/// after each delimiter in the template, converted to the declared type.
///
/// [`Filter`] is implemented for functions that return any of the following
/// types.
///
/// - `R` where `R` implements `Into<Value>`, including `Option<R>`
/// - `Result<R>` where `R` implements `Into<Value>`
///
/// [`Filter`] is implemented for functions that take any of the following
/// types as arguments.
///
/// - [`bool`]
/// - [`i64`] and [`usize`]
/// - [`f64`]
/// - [`String`]
/// - [`Vec<Value>`]
/// - [`BTreeMap<String, Value>`][std::collections::BTreeMap]
/// - [`Iter`][crate::Iter]
/// - [`Value`]
/// - [`Option<T>`] of any of the above, which makes a trailing argument
///   optional
///
/// If the template passes too few arguments, or an argument or the value
/// can't be converted, the filter is skipped and the value passes through
/// unchanged. Extra arguments are ignored.
///
/// ## Examples
///
/// Consider the following template.
///
/// ```text
/// {{ price | add>10 | times>2 }}
/// ```
///
/// We could implement the `add` and `times` filters like this:
///
/// ```rust
/// use mark::Engine;
///
/// let mut engine = Engine::new();
/// engine.add_filter("add", add);
/// engine.add_filter("times", times);
///
/// fn add(a: i64, b: i64) -> i64 {
///     a + b
/// }
///
/// fn times(a: i64, b: i64) -> i64 {
///     a * b
/// }
///
/// let result = engine.render("{{ price | add>10 | times>2 }}", mark::value! { price: 5 })?;
/// assert_eq!(result, "30");
/// # Ok::<(), mark::Error>(())
/// ```
pub trait Filter<R, A> {
    #[doc(hidden)]
    fn filter(&self, args: A) -> R;
}

pub trait FilterArgs: Sized {
    #[doc(hidden)]
    fn from_state(state: &FilterState<'_>) -> Result<Self>;
}

pub trait FilterArg: Sized {
    #[doc(hidden)]
    fn from_value(v: &Value) -> args::Result<Self>;

    #[doc(hidden)]
    fn from_arg(arg: &str) -> args::Result<Self>;

    /// The value used when the argument is not given, `None` if it is
    /// required.
    #[doc(hidden)]
    fn missing() -> Option<Self> {
        None
    }
}

pub trait FilterReturn {
    #[doc(hidden)]
    fn to_value(self) -> Result<Value>;
}

////////////////////////////////////////////////////////////////////////////////
// Filter and FilterArgs
////////////////////////////////////////////////////////////////////////////////

macro_rules! impl_filter {
    ($($ty:ident $arg:ident $idx:tt)*) => {
        impl<Func, R, V, $($ty,)*> Filter<R, (V, $($ty,)*)> for Func
        where
            Func: Fn(V, $($ty,)*) -> R,
            R: FilterReturn,
            V: FilterArg,
            $($ty: FilterArg,)*
        {
            #[doc(hidden)]
            fn filter(&self, (v, $($arg,)*): (V, $($ty,)*)) -> R {
                self(v, $($arg,)*)
            }
        }

        impl<V, $($ty,)*> FilterArgs for (V, $($ty,)*)
        where
            V: FilterArg,
            $($ty: FilterArg,)*
        {
            fn from_state(state: &FilterState<'_>) -> Result<Self> {
                let v = V::from_value(state.value).map_err(|e| err_expected_val(e, state.name))?;
                Ok((v, $(get_arg::<$ty>(state, $idx)?,)*))
            }
        }
    };
}

impl_filter! {}
impl_filter! { A a 0 }
impl_filter! { A a 0 B b 1 }
impl_filter! { A a 0 B b 1 C c 2 }
impl_filter! { A a 0 B b 1 C c 2 D d 3 }

fn get_arg<T: FilterArg>(state: &FilterState<'_>, i: usize) -> Result<T> {
    match state.args.get(i) {
        Some(arg) => T::from_arg(arg).map_err(|e| err_expected_arg(e, state.name, arg)),
        None => T::missing().ok_or_else(|| {
            Error::new(format!(
                "filter `{}` expected at least {} arguments, found {}",
                state.name,
                i + 1,
                state.args.len()
            ))
        }),
    }
}

fn err_expected_arg(err: args::Error, name: &str, arg: &str) -> Error {
    let msg = match err {
        args::Error::Type(exp, got) => {
            format!("filter `{name}` expected {exp} argument, found {got}")
        }
        args::Error::Parse(exp) => {
            format!("filter `{name}` expected {exp} argument, found `{arg}`")
        }
        args::Error::TryFromInt(ty, i) => {
            format!("filter `{name}` argument {i} is out of range for {ty}")
        }
    };
    Error::new(msg)
}

fn err_expected_val(err: args::Error, name: &str) -> Error {
    let msg = match err {
        args::Error::Type(exp, got) => {
            format!("filter `{name}` expected {exp} value, found {got}")
        }
        args::Error::Parse(exp) => format!("filter `{name}` expected {exp} value"),
        args::Error::TryFromInt(ty, i) => {
            format!("filter `{name}` value {i} is out of range for {ty}")
        }
    };
    Error::new(msg)
}

////////////////////////////////////////////////////////////////////////////////
// FilterReturn
////////////////////////////////////////////////////////////////////////////////

impl<T> FilterReturn for T
where
    T: Into<Value>,
{
    fn to_value(self) -> Result<Value> {
        Ok(self.into())
    }
}

impl<T> FilterReturn for Result<T>
where
    T: Into<Value>,
{
    fn to_value(self) -> Result<Value> {
        self.map(Into::into)
    }
}
