use std::fmt;

use crate::{Error, Result, Value};

/// A host object that can be placed in the render context.
///
/// Templates can read fields of an object using dotted properties such as
/// `{{user.name}}`, which calls [`get`][Object::get], and invoke methods using
/// the `call` filter, `{{user|call>greet>Hello}}`, which calls
/// [`call_method`][Object::call_method]. The [`Display`][fmt::Display]
/// implementation is used when the object itself is rendered.
///
/// # Examples
///
/// ```
/// use std::fmt;
/// use std::sync::Arc;
///
/// use mark::{Object, Result, Value};
///
/// #[derive(Debug)]
/// struct User {
///     name: String,
/// }
///
/// impl fmt::Display for User {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(&self.name)
///     }
/// }
///
/// impl Object for User {
///     fn get(&self, key: &str) -> Option<Value> {
///         match key {
///             "name" => Some(Value::from(self.name.as_str())),
///             _ => None,
///         }
///     }
///
///     fn call_method(&self, name: &str, args: &[Value]) -> Result<Value> {
///         match name {
///             "greet" => {
///                 let greeting = args.first().ok_or("`greet` takes a greeting")?;
///                 Ok(Value::from(format!("{greeting} {}", self.name)))
///             }
///             _ => Err(format!("unknown method `{name}`").into()),
///         }
///     }
/// }
///
/// let user = Value::from(Arc::new(User { name: "John".into() }));
/// let ctx = mark::value! { user: user };
/// let result = mark::render_from("{{user.name}}, {{user|call>greet>Hi}}", &ctx)?;
/// assert_eq!(result, "John, Hi John");
/// # Ok::<(), mark::Error>(())
/// ```
pub trait Object: fmt::Display + fmt::Debug + Send + Sync {
    /// Returns the value of the named field, if any.
    fn get(&self, key: &str) -> Option<Value> {
        let _ = key;
        None
    }

    /// Invokes the named method with the given arguments.
    fn call_method(&self, name: &str, args: &[Value]) -> Result<Value> {
        let _ = args;
        Err(Error::new(format!("object has no method `{name}`")))
    }
}
