//! Runtime values handed to the value renderers.
//!
//! Positional arguments are a `&[Value]` built at the call site, and every
//! variable binding reads out as a `Value` at render time.

use std::fmt;

/// A tagged value of one of the renderable kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Char(char),
    Int32(i32),
    Int64(i64),
    Float(f64),
    Str(String),
}

/// The closed set of argument kinds a type keyword can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Char,
    Int32,
    Int64,
    Float,
    Str,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Char => "char",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Char(c) => write!(f, "{c}"),
            Value::Int32(n) => write!(f, "{n}"),
            Value::Int64(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Char(_) => ValueKind::Char,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
        }
    }

    /// Convert to `kind`, or `None` when there is no sensible conversion
    /// (an unparsable string, an empty string as a char, a code point that
    /// is not a `char`).
    ///
    /// Numeric conversions are `as` casts: they truncate and wrap.
    pub fn coerce(self, kind: ValueKind) -> Option<Value> {
        if self.kind() == kind {
            return Some(self);
        }
        let v = match (self, kind) {
            (v, ValueKind::Str) => Value::Str(v.to_string()),

            (Value::Int32(n), ValueKind::Int64) => Value::Int64(i64::from(n)),
            (Value::Int32(n), ValueKind::Float) => Value::Float(f64::from(n)),
            (Value::Int64(n), ValueKind::Int32) => Value::Int32(n as i32),
            (Value::Int64(n), ValueKind::Float) => Value::Float(n as f64),
            (Value::Float(x), ValueKind::Int32) => Value::Int32(x as i32),
            (Value::Float(x), ValueKind::Int64) => Value::Int64(x as i64),

            (Value::Char(c), ValueKind::Int32) => Value::Int32(c as i32),
            (Value::Char(c), ValueKind::Int64) => Value::Int64(i64::from(u32::from(c))),
            (Value::Char(c), ValueKind::Float) => Value::Float(f64::from(u32::from(c))),
            (Value::Int32(n), ValueKind::Char) => Value::Char(char::from_u32(n as u32)?),
            (Value::Int64(n), ValueKind::Char) => {
                Value::Char(char::from_u32(u32::try_from(n).ok()?)?)
            }
            (Value::Float(_), ValueKind::Char) => return None,

            (Value::Str(s), ValueKind::Char) => Value::Char(s.chars().next()?),
            (Value::Str(s), ValueKind::Int32) => Value::Int32(s.trim().parse().ok()?),
            (Value::Str(s), ValueKind::Int64) => Value::Int64(s.trim().parse().ok()?),
            (Value::Str(s), ValueKind::Float) => Value::Float(s.trim().parse().ok()?),

            // Same-kind pairs returned above.
            (v, _) => v,
        };
        Some(v)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int32(n as i32)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Int64(n as i64)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
