//! A lightweight, logic-embedded text template engine.
//!
//! Templates are plain text containing `{{ ... }}` tags. There is no compile
//! step, the template text is expanded directly each time it is rendered.
//!
//! # Features
//!
//! ### Syntax
//!
//! - Properties: `{{ name }}`, `{{ user.address.city }}`, `{{ items.0 }}`
//! - Filters: `{{ name | upcase | chop>10 }}`
//! - Conditionals: `{{ if age | more>17 }} adult {{ else }} minor {{/if}}`
//! - Loops: `{{ items }} {{ # }}: {{ . }} {{/items}}`
//! - Includes: `{{ header }}`
//! - Session globals: `{{ title | set>page }} ... {{ page }}`
//! - Nested evaluation of arguments: ``{{ price | more>`limit` }}``
//!
//! ### Engine
//!
//! - Typed filter functions: `engine.add_filter("add", |a: i64, b: i64| a + b)`
//! - A catalog of builtin filters
//! - Render using any [`serde`] serializable values
//! - Host objects with fields and methods, see [`Object`]
//! - Convenient macro for quick rendering:
//!   `mark::value!{ name: "John", age: 42 }`
//!
//! # Getting started
//!
//! For a one-off render the [`render`] function uses a default engine.
//!
//! ```
//! let result = mark::render("Hello {{ user.name }}!", mark::value! { user: { name: "John Smith" } })?;
//! assert_eq!(result, "Hello John Smith!");
//! # Ok::<(), mark::Error>(())
//! ```
//!
//! Otherwise your entry point is the [`Engine`] struct. The engine stores the
//! filters, includes, global variables and options. Generally, you only need
//! to construct one engine during the lifetime of a program.
//!
//! ```
//! let mut engine = mark::Engine::new();
//! engine.add_include("header", "<h1>{{ title }}</h1>");
//!
//! let result = engine.render("{{ header }}<p>{{ body }}</p>", mark::value! {
//!     title: "Hi",
//!     body: "Welcome",
//! })?;
//! assert_eq!(result, "<h1>Hi</h1><p>Welcome</p>");
//! # Ok::<(), mark::Error>(())
//! ```
//!
//! # Examples
//!
//! ### Render using structured data
//!
//! ```
//! #[derive(serde::Serialize)]
//! struct Context { users: Vec<User> }
//!
//! #[derive(serde::Serialize)]
//! struct User { name: String }
//!
//! let ctx = Context {
//!     users: vec![User { name: "Ann".into() }, User { name: "Bob".into() }],
//! };
//!
//! let result = mark::render("{{users}}{{##}}. {{name}}\n{{/users}}", &ctx)?;
//! assert_eq!(result, "1. Ann\n2. Bob\n");
//! # Ok::<(), mark::Error>(())
//! ```
//!
//! ### Transform data using filters
//!
//! ```
//! let mut engine = mark::Engine::new();
//! engine.add_filter("lower", |s: String| s.to_lowercase());
//!
//! let result = engine.render("Hello {{ value | lower }}", mark::value! { value: "WORLD!" })?;
//! assert_eq!(result, "Hello world!");
//! # Ok::<(), mark::Error>(())
//! ```
//!
//! See the [`Filter`] trait documentation for more information on filters.
//!
//! ### Global variables
//!
//! The `set` filter stores a value in the globals. Globals written while
//! rendering with [`Engine::render`] stay in the engine for later renders.
//! Use a [`Session`] to keep them separate.
//!
//! ```
//! let mut engine = mark::Engine::new();
//! engine.render("{{ name | set>who }}", mark::value! { name: "World" })?;
//!
//! let result = engine.render("Hello {{ who }}!", mark::value! {})?;
//! assert_eq!(result, "Hello World!");
//! # Ok::<(), mark::Error>(())
//! ```

mod error;
mod filters;
mod macros;
mod render;
mod scan;
mod types;
mod value;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

pub use crate::error::Error;
pub use crate::filters::Filter;
#[cfg(feature = "serde")]
pub use crate::value::to_value;
pub use crate::value::{Iter, Object, Sign, Value};

use crate::filters::{FilterArgs, FilterFn, FilterReturn};
use crate::render::Renderer;
use crate::value::Map;

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The default maximum render depth.
const DEFAULT_MAX_DEPTH: usize = 64;

/// The rendering engine.
///
/// Holds the filters, includes and global variables available to templates
/// and the options that control rendering.
pub struct Engine<'engine> {
    filters: BTreeMap<&'engine str, Box<FilterFn>>,
    includes: BTreeMap<&'engine str, Include<'engine>>,
    globals: Map<String, Value>,
    delimiter: char,
    compact: bool,
    max_depth: usize,
}

/// A sub-template that can be referenced by name from other templates.
enum Include<'engine> {
    Source(Cow<'engine, str>),
    Fn(Box<IncludeFn>),
}

/// A function producing the source of an include each time it is used.
type IncludeFn = dyn Fn() -> String + Send + Sync + 'static;

/// A render session.
///
/// A session borrows an [`Engine`] and owns a copy of its global variables.
/// Globals written by templates rendered in this session are only visible to
/// this session. Separate sessions can be used to render concurrently from one
/// shared engine.
///
/// # Examples
///
/// ```
/// let mut engine = mark::Engine::new();
/// engine.add_global("site", "example.com");
///
/// let mut session = engine.session();
/// let result = session.render("{{ site | upcase | set>site }}{{ site }}", ())?;
/// assert_eq!(result, "EXAMPLE.COM");
///
/// // the engine is unaffected
/// assert_eq!(engine.global("site"), Some(&mark::Value::from("example.com")));
/// # Ok::<(), mark::Error>(())
/// ```
pub struct Session<'a, 'engine> {
    engine: &'a Engine<'engine>,
    globals: Map<String, Value>,
}

impl<'engine> Default for Engine<'engine> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'engine> Engine<'engine> {
    /// Construct a new engine with the builtin filters.
    #[inline]
    pub fn new() -> Self {
        let mut engine = Self {
            filters: BTreeMap::new(),
            includes: BTreeMap::new(),
            globals: Map::new(),
            delimiter: '>',
            compact: false,
            max_depth: DEFAULT_MAX_DEPTH,
        };
        filters::register(&mut engine);
        engine
    }

    /// Add a new filter to the engine.
    ///
    /// A filter with the same name as an existing one, including the builtin
    /// filters, replaces it.
    #[inline]
    pub fn add_filter<F, R, A>(&mut self, name: &'engine str, f: F)
    where
        F: Filter<R, A> + Send + Sync + 'static,
        R: FilterReturn,
        A: FilterArgs,
    {
        self.filters.insert(name, filters::new(f));
    }

    /// Add a named sub-template.
    ///
    /// A tag whose property is the name renders the include against the
    /// current context.
    #[inline]
    pub fn add_include<S>(&mut self, name: &'engine str, source: S)
    where
        S: Into<Cow<'engine, str>>,
    {
        self.includes.insert(name, Include::Source(source.into()));
    }

    /// Add a named sub-template whose source is produced by calling `f` each
    /// time it is rendered.
    #[inline]
    pub fn add_include_fn<F>(&mut self, name: &'engine str, f: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.includes.insert(name, Include::Fn(Box::new(f)));
    }

    /// Add a global variable.
    ///
    /// Globals take precedence over the context. A global set to
    /// [`Value::None`] is ignored.
    #[inline]
    pub fn add_global<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.globals.insert(name.into(), value.into());
    }

    /// Lookup a global variable by name.
    #[inline]
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// Set the character that separates a filter name from its arguments.
    ///
    /// Defaults to `>`, as in `{{ name | chop>10 }}`.
    #[inline]
    pub fn set_delimiter(&mut self, delimiter: char) {
        self.delimiter = delimiter;
    }

    /// Set whether whitespace between a `>` and the next `<` is removed from
    /// the output.
    ///
    /// Defaults to `false`.
    #[inline]
    pub fn set_compact(&mut self, compact: bool) {
        self.compact = compact;
    }

    /// Set the maximum render depth.
    ///
    /// Each block body, include and backtick expression is rendered one level
    /// deeper than the template containing it. Rendering fails with an error
    /// when the depth is exceeded, for example when an include includes
    /// itself.
    ///
    /// Defaults to 64.
    #[inline]
    pub fn set_max_depth(&mut self, depth: usize) {
        self.max_depth = depth;
    }

    /// Start a render session, see [`Session`].
    #[inline]
    pub fn session(&self) -> Session<'_, 'engine> {
        Session {
            engine: self,
            globals: self.globals.clone(),
        }
    }

    /// Render the template using the provided value.
    ///
    /// Globals written by the template are kept in the engine if rendering
    /// succeeds.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render<S>(&mut self, template: &str, ctx: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        self.render_from(template, &to_value(ctx)?)
    }

    /// Render the template using the provided [`Value`].
    ///
    /// Globals written by the template are kept in the engine if rendering
    /// succeeds.
    #[inline]
    pub fn render_from(&mut self, template: &str, ctx: &Value) -> Result<String> {
        let mut session = self.session();
        let result = session.render_from(template, ctx)?;
        let globals = session.into_globals();
        self.globals = globals;
        Ok(result)
    }
}

impl fmt::Debug for Engine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("filters", &self.filters.keys())
            .field("includes", &self.includes.keys())
            .field("globals", &self.globals)
            .field("delimiter", &self.delimiter)
            .field("compact", &self.compact)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl<'a, 'engine> Session<'a, 'engine> {
    /// Render the template using the provided value.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render<S>(&mut self, template: &str, ctx: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        self.render_from(template, &to_value(ctx)?)
    }

    /// Render the template using the provided [`Value`].
    #[inline]
    pub fn render_from(&mut self, template: &str, ctx: &Value) -> Result<String> {
        Renderer::new(self.engine, &mut self.globals).render(template, ctx, None)
    }

    /// Returns the global variables of this session.
    #[inline]
    pub fn globals(&self) -> &BTreeMap<String, Value> {
        &self.globals
    }

    /// Consumes the session and returns its global variables.
    #[inline]
    pub fn into_globals(self) -> BTreeMap<String, Value> {
        self.globals
    }
}

impl fmt::Debug for Session<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("engine", &self.engine)
            .field("globals", &self.globals)
            .finish()
    }
}

/// Render the template using the provided value and a default [`Engine`].
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[inline]
pub fn render<S>(template: &str, ctx: S) -> Result<String>
where
    S: serde::Serialize,
{
    Engine::new().render(template, ctx)
}

/// Render the template using the provided [`Value`] and a default [`Engine`].
#[inline]
pub fn render_from(template: &str, ctx: &Value) -> Result<String> {
    Engine::new().render_from(template, ctx)
}
