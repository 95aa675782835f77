//! The line-template language.
//!
//! A template is literal text with two kinds of directive:
//!
//! - `[mods name]` reads a registered variable; `[mods'body]` renders `body`
//!   as a nested template and formats the result as a string.
//! - `{mods keyword}` formats the next positional argument, where `keyword`
//!   (`int`, `str`, `float`, …) names the argument's kind.
//!
//! Modifiers are `^` upper case, `$` lower case, `>` right align, `0` zero
//! fill, `+` unsigned, `x`/`X`/`b` hex/upper hex/binary, a width, and `.N`
//! precision.
//!
//! # Quick start
//!
//! ```rust
//! use dlog::template::{expand, Value};
//!
//! let scope = |name: &str| (name == "who").then(|| Value::from("world"));
//! let line = expand("[^who]: {>05int}", &scope, &[Value::from(42)]);
//! assert_eq!(line, "WORLD: 00042");
//! ```

pub mod expand;
pub mod format;
pub mod keyword;
pub mod modifier;
pub mod token;
pub mod value;

// Re-exports for convenience.
pub use expand::{expand, expand_into, expand_prefix, RenderCursor, Scope};
pub use keyword::ArgCursor;
pub use modifier::ModifierSet;
pub use value::{Value, ValueKind};
