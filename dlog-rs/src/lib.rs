//! Debug logger driven by a small line-template language.
//!
//! See [`template`] for the language and [`Logger`] for the owner of
//! variables, prefixes and counters.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod level;
pub mod logger;
pub mod template;
pub mod var;

pub use error::{DlogError, Result};
pub use level::Level;
pub use logger::Logger;
pub use template::{expand, Scope, Value};
pub use var::{Binding, VarStore, VarType};
