/// Construct a [`Value`][crate::Value] map.
///
/// Keys are identifiers or string literals. Values are nested maps `{...}`,
/// lists `[...]`, `None`, or any expression with a `From` conversion into a
/// `Value`.
///
/// # Examples
///
/// ```
/// let ctx = mark::value! {
///     user: {
///         name: "John",
///         "first-seen": 2019,
///         roles: ["admin", None],
///     },
///     count: 3 + 4,
/// };
///
/// let result = mark::render_from("{{user.name}} {{count}}", &ctx)?;
/// assert_eq!(result, "John 7");
/// # Ok::<(), mark::Error>(())
/// ```
#[macro_export]
macro_rules! value {
    ($($tt:tt)*) => {
        $crate::_value!({ $($tt)* })
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! _value {
    //////////////////////////////////////////////////////////////////////////
    // Elements of a list [...], collected as expressions.
    //////////////////////////////////////////////////////////////////////////

    (@list [$($elems:expr,)*]) => {
        ::std::vec![$($elems,)*]
    };

    (@list [$($elems:expr,)*] None $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::Value::None,] $($($rest)*)?)
    };

    (@list [$($elems:expr,)*] [$($list:tt)*] $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!([$($list)*]),] $($($rest)*)?)
    };

    (@list [$($elems:expr,)*] {$($map:tt)*} $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!({$($map)*}),] $($($rest)*)?)
    };

    (@list [$($elems:expr,)*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::Value::from($next),] $($($rest)*)?)
    };

    //////////////////////////////////////////////////////////////////////////
    // Entries of a map {...}, each inserted into the given map variable.
    //////////////////////////////////////////////////////////////////////////

    (@map $map:ident) => {};

    (@map $map:ident $key:ident : $($rest:tt)*) => {
        $crate::_value!(@entry $map (stringify!($key)) $($rest)*);
    };

    (@map $map:ident $key:literal : $($rest:tt)*) => {
        $crate::_value!(@entry $map ($key) $($rest)*);
    };

    (@entry $map:ident ($key:expr) None $(, $($rest:tt)*)?) => {
        let _ = $map.insert(::std::string::String::from($key), $crate::Value::None);
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (@entry $map:ident ($key:expr) [$($list:tt)*] $(, $($rest:tt)*)?) => {
        let _ = $map.insert(::std::string::String::from($key), $crate::_value!([$($list)*]));
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (@entry $map:ident ($key:expr) {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        let _ = $map.insert(::std::string::String::from($key), $crate::_value!({$($inner)*}));
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (@entry $map:ident ($key:expr) $value:expr $(, $($rest:tt)*)?) => {
        let _ = $map.insert(::std::string::String::from($key), $crate::Value::from($value));
        $crate::_value!(@map $map $($($rest)*)?);
    };

    //////////////////////////////////////////////////////////////////////////
    // A single value.
    //////////////////////////////////////////////////////////////////////////

    (None) => {
        $crate::Value::None
    };

    ([]) => {
        $crate::Value::List(::std::vec::Vec::new())
    };

    ([ $($tt:tt)+ ]) => {
        $crate::Value::List($crate::_value!(@list [] $($tt)+))
    };

    ({}) => {
        $crate::Value::Map(::std::collections::BTreeMap::new())
    };

    ({ $($tt:tt)+ }) => {
        $crate::Value::Map({
            let mut map = ::std::collections::BTreeMap::new();
            $crate::_value!(@map map $($tt)+);
            map
        })
    };

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
