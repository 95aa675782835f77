//! Message severity levels.
//!
//! | Level      | Meaning |
//! |------------|---------|
//! | `None`     | nothing is output |
//! | `Trace`    | basic trace information |
//! | `Warning`  | small non-critical errors; the program carries on |
//! | `Error`    | large, potentially problematic issues |
//! | `Critical` | errors that break the program |

use std::fmt;
use std::str::FromStr;

use crossterm::style::Color;

/// Severity of a message, and the threshold a logger filters at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    None,
    Trace,
    #[default]
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const COUNT: usize = 5;

    pub const ALL: [Level; Level::COUNT] = [
        Level::None,
        Level::Trace,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Level::None => "NONE",
            Level::Trace => "TRACE",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Position in [`Level::ALL`]; also the value of the `dl` variable.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether a message at `self` passes a logger set to `threshold`.
    pub fn passes(self, threshold: Level) -> bool {
        self != Level::None && threshold != Level::None && self >= threshold
    }

    /// Foreground colour used when colour output is on.
    pub fn color(self) -> Option<Color> {
        match self {
            Level::None => None,
            Level::Trace => Some(Color::Grey),
            Level::Warning => Some(Color::Yellow),
            Level::Error => Some(Color::Red),
            Level::Critical => Some(Color::Magenta),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unrecognised level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(Level::None),
            "trace" => Ok(Level::Trace),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" | "crit" | "critical_error" => Ok(Level::Critical),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}
