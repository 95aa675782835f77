//! Variable registry.
//!
//! Maps names to [`Binding`]s: typed read accessors into storage the caller
//! owns.  The registry never copies a value; it reads the binding each time
//! a `[name]` directive is rendered.
//!
//! The logger's own variables (times, level, counters) are registered as
//! read-only [`Binding::Internal`] entries and read from a [`Snapshot`] the
//! logger refreshes before every message.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;

use crate::clock::{TimeParts, TimeUnit};
use crate::level::Level;
use crate::template::{Scope, Value};

/// Boxed read accessor into externally owned storage.
pub type Reader<T> = Box<dyn Fn() -> T>;

/// Declared type of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Char,
    Int32,
    Int64,
    Float32,
    Float64,
    Str,
}

/// A live, typed view of a value.
pub enum Binding {
    Char(Reader<char>),
    Int32(Reader<i32>),
    Int64(Reader<i64>),
    Float32(Reader<f32>),
    Float64(Reader<f64>),
    Str(Reader<String>),
    Internal(Internal),
}

impl Binding {
    pub fn char(f: impl Fn() -> char + 'static) -> Self {
        Binding::Char(Box::new(f))
    }

    pub fn int32(f: impl Fn() -> i32 + 'static) -> Self {
        Binding::Int32(Box::new(f))
    }

    pub fn int64(f: impl Fn() -> i64 + 'static) -> Self {
        Binding::Int64(Box::new(f))
    }

    pub fn float32(f: impl Fn() -> f32 + 'static) -> Self {
        Binding::Float32(Box::new(f))
    }

    pub fn float64(f: impl Fn() -> f64 + 'static) -> Self {
        Binding::Float64(Box::new(f))
    }

    pub fn string(f: impl Fn() -> String + 'static) -> Self {
        Binding::Str(Box::new(f))
    }

    pub fn var_type(&self) -> VarType {
        match self {
            Binding::Char(_) => VarType::Char,
            Binding::Int32(_) => VarType::Int32,
            Binding::Int64(_) => VarType::Int64,
            Binding::Float32(_) => VarType::Float32,
            Binding::Float64(_) => VarType::Float64,
            Binding::Str(_) => VarType::Str,
            Binding::Internal(i) => i.var_type(),
        }
    }

    /// Read the current value.  Internal bindings read from `snapshot`.
    pub fn read(&self, snapshot: &Snapshot) -> Value {
        match self {
            Binding::Char(f) => Value::Char(f()),
            Binding::Int32(f) => Value::Int32(f()),
            Binding::Int64(f) => Value::Int64(f()),
            Binding::Float32(f) => Value::Float(f64::from(f())),
            Binding::Float64(f) => Value::Float(f()),
            Binding::Str(f) => Value::Str(f()),
            Binding::Internal(i) => i.read(snapshot),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Internal(i) => f.debug_tuple("Internal").field(i).finish(),
            other => f.debug_tuple("Binding").field(&other.var_type()).finish(),
        }
    }
}

macro_rules! shared_cell_binding {
    ($($t:ty => $ctor:ident),* $(,)?) => {
        $(
            impl From<Rc<Cell<$t>>> for Binding {
                fn from(cell: Rc<Cell<$t>>) -> Self {
                    Binding::$ctor(move || cell.get())
                }
            }
        )*
    };
}

shared_cell_binding! {
    char => char,
    i32 => int32,
    i64 => int64,
    f32 => float32,
    f64 => float64,
}

impl From<Rc<RefCell<String>>> for Binding {
    fn from(cell: Rc<RefCell<String>>) -> Self {
        Binding::string(move || cell.borrow().clone())
    }
}

// ── Internal variables ────────────────────────────────────────────────────────

/// Per-message state the internal variables read from.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Time since the logger was created.
    pub total: TimeParts,
    /// Time since the previous message.
    pub elapsed: TimeParts,
    pub logger_name: String,
    /// Level of the message being rendered.
    pub level: Level,
    /// Messages emitted at `level`, this one included.
    pub level_count: u64,
    /// Messages emitted at any level, this one included.
    pub total_count: u64,
}

/// One of the logger's built-in variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Internal {
    TotalTime(TimeUnit),
    ElapsedTime(TimeUnit),
    LoggerName,
    LevelName,
    LevelNumber,
    LevelMessageCount,
    MessageCount,
    Literal(char),
}

impl Internal {
    /// Every built-in variable and its name.
    pub fn all() -> Vec<(String, Internal)> {
        let mut out = Vec::new();
        for unit in TimeUnit::ALL {
            out.push((format!("t{}", unit.suffix()), Internal::TotalTime(unit)));
            out.push((format!("et{}", unit.suffix()), Internal::ElapsedTime(unit)));
        }
        let fixed = [
            ("name", Internal::LoggerName),
            ("ln", Internal::LevelName),
            ("dl", Internal::LevelNumber),
            ("lmc", Internal::LevelMessageCount),
            ("mc", Internal::MessageCount),
            ("lbc", Internal::Literal('[')),
            ("rbc", Internal::Literal(']')),
            ("lcb", Internal::Literal('{')),
            ("rcb", Internal::Literal('}')),
            ("bks", Internal::Literal('\\')),
        ];
        out.extend(fixed.into_iter().map(|(n, i)| (n.to_owned(), i)));
        out
    }

    pub fn var_type(self) -> VarType {
        match self {
            Internal::TotalTime(_) | Internal::ElapsedTime(_) => VarType::Float64,
            Internal::LoggerName | Internal::LevelName => VarType::Str,
            Internal::LevelNumber => VarType::Int32,
            Internal::LevelMessageCount | Internal::MessageCount => VarType::Int64,
            Internal::Literal(_) => VarType::Char,
        }
    }

    pub fn read(self, s: &Snapshot) -> Value {
        match self {
            Internal::TotalTime(unit) => Value::Float(s.total.in_unit(unit)),
            Internal::ElapsedTime(unit) => Value::Float(s.elapsed.in_unit(unit)),
            Internal::LoggerName => Value::Str(s.logger_name.clone()),
            Internal::LevelName => Value::from(s.level.name()),
            Internal::LevelNumber => Value::Int32(s.level.index() as i32),
            Internal::LevelMessageCount => Value::Int64(s.level_count as i64),
            Internal::MessageCount => Value::Int64(s.total_count as i64),
            Internal::Literal(c) => Value::Char(c),
        }
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// A registered binding.
#[derive(Debug)]
pub struct Var {
    pub binding: Binding,
    pub read_only: bool,
}

/// Name → binding table.
#[derive(Debug, Default)]
pub struct VarStore {
    vars: HashMap<String, Var>,
}

/// Whether `name` matches `[A-Za-z_][A-Za-z0-9_]*` and is not one of the
/// single-letter base markers `x`, `X`, `b`, which a directive always reads
/// as modifiers.
pub fn is_valid_name(name: &str) -> bool {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    let ident = IDENT
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"));
    ident.is_match(name) && !matches!(name, "x" | "X" | "b")
}

impl VarStore {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every [`Internal`] variable pre-registered read-only.
    pub fn with_internals() -> Self {
        let mut store = Self::new();
        for (name, internal) in Internal::all() {
            store.register_read_only(name, Binding::Internal(internal));
        }
        store
    }

    /// Add a removable binding.  Fails if `name` is taken or not a valid
    /// identifier (see [`is_valid_name`]).
    pub fn register(&mut self, name: impl Into<String>, binding: Binding) -> bool {
        self.insert(name.into(), binding, false)
    }

    /// Add a binding that [`unregister`](Self::unregister) refuses to remove.
    pub fn register_read_only(&mut self, name: impl Into<String>, binding: Binding) -> bool {
        self.insert(name.into(), binding, true)
    }

    fn insert(&mut self, name: String, binding: Binding, read_only: bool) -> bool {
        if !is_valid_name(&name) {
            tracing::debug!(name, "rejected invalid variable name");
            return false;
        }
        if self.vars.contains_key(&name) {
            tracing::debug!(name, "variable already registered");
            return false;
        }
        self.vars.insert(name, Var { binding, read_only });
        true
    }

    /// Remove a binding.  Fails if it is absent or read-only.
    pub fn unregister(&mut self, name: &str) -> bool {
        match self.vars.get(name) {
            Some(var) if !var.read_only => {
                self.vars.remove(name);
                true
            }
            Some(_) => {
                tracing::debug!(name, "refusing to remove read-only variable");
                false
            }
            None => false,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Var> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Read the current value of `name`.
    pub fn read(&self, name: &str, snapshot: &Snapshot) -> Option<Value> {
        self.vars.get(name).map(|v| v.binding.read(snapshot))
    }

    /// Iterate over registered names (unordered).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Pair the registry with a snapshot for rendering.
    pub fn scope<'a>(&'a self, snapshot: &'a Snapshot) -> VarScope<'a> {
        VarScope { vars: self, snapshot }
    }
}

/// [`Scope`] over a registry and the snapshot its internal bindings read.
#[derive(Debug, Clone, Copy)]
pub struct VarScope<'a> {
    vars: &'a VarStore,
    snapshot: &'a Snapshot,
}

impl Scope for VarScope<'_> {
    fn get_var(&self, name: &str) -> Option<Value> {
        self.vars.read(name, self.snapshot)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
