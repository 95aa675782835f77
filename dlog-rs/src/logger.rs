//! The logger: owns a variable registry, a prefix and message counters, and
//! writes rendered lines to any [`Write`] sink.
//!
//! Every emitted line is `prefix + message + "\n"`.  The prefix is a template
//! too, rendered with no positional arguments, so it can only read variables:
//!
//! ```rust
//! use dlog::{Level, Logger, Value};
//!
//! let mut log = Logger::new("app", Level::Trace);
//! log.set_prefix("[name] [ln] #[mc]: ");
//!
//! let mut out = Vec::new();
//! log.error(&mut out, "disk {str} at {d}%", &[Value::from("sda"), Value::from(97)]).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "app ERROR #1: disk sda at 97%\n");
//! ```

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetForegroundColor};

use crate::clock::Clock;
use crate::level::Level;
use crate::template::{expand_into, expand_prefix, ArgCursor, Value};
use crate::var::{Binding, Snapshot, VarStore};

pub const DEFAULT_NAME: &str = "Debug:";

#[derive(Debug)]
pub struct Logger {
    name: String,
    level: Level,
    prefix: String,
    level_prefixes: [Option<String>; Level::COUNT],
    color: bool,
    vars: VarStore,
    clock: Clock,
    counts: [u64; Level::COUNT],
    total: u64,
    snapshot: Snapshot,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, Level::default())
    }
}

impl Logger {
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        let name = name.into();
        let snapshot = Snapshot {
            logger_name: name.clone(),
            level,
            ..Snapshot::default()
        };
        Self {
            name,
            level,
            prefix: String::new(),
            level_prefixes: Default::default(),
            color: false,
            vars: VarStore::with_internals(),
            clock: Clock::new(),
            counts: [0; Level::COUNT],
            total: 0,
            snapshot,
        }
    }

    // ── Settings ──────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.snapshot.logger_name = self.name.clone();
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    /// The prefix used for levels without their own override.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// Override the prefix for one level.  `None` reverts to the shared one.
    pub fn set_level_prefix(&mut self, level: Level, prefix: Option<String>) {
        self.level_prefixes[level.index()] = prefix;
    }

    /// The prefix template a message at `level` is written with.
    pub fn prefix_for(&self, level: Level) -> &str {
        self.level_prefixes[level.index()]
            .as_deref()
            .unwrap_or(&self.prefix)
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Colour emitted lines by level.
    pub fn set_color(&mut self, on: bool) {
        self.color = on;
    }

    // ── Variables ─────────────────────────────────────────────────────────────

    /// Register a variable.  Fails on an invalid or taken name, including
    /// the built-in ones.
    pub fn register(&mut self, name: impl Into<String>, binding: impl Into<Binding>) -> bool {
        self.vars.register(name, binding.into())
    }

    /// Remove a user variable.  Built-in variables cannot be removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.vars.unregister(name)
    }

    pub fn vars(&self) -> &VarStore {
        &self.vars
    }

    // ── Counters ──────────────────────────────────────────────────────────────

    /// Lines emitted at any level.
    pub fn message_count(&self) -> u64 {
        self.total
    }

    /// Lines emitted at `level`.
    pub fn level_count(&self, level: Level) -> u64 {
        self.counts[level.index()]
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render `template` against the current variables without logging.
    pub fn render(&self, template: &str, args: &[Value]) -> String {
        let mut out = String::with_capacity(template.len());
        self.render_to(&mut out, template, args);
        out
    }

    /// Render onto `out`; returns how many arguments were consumed.
    pub fn render_to(&self, out: &mut String, template: &str, args: &[Value]) -> usize {
        let scope = self.vars.scope(&self.snapshot);
        expand_into(out, template, &scope, ArgCursor::new(args)).consumed()
    }

    /// Render a prefix template: variables only.
    pub fn render_prefix(&self, template: &str) -> String {
        expand_prefix(template, &self.vars.scope(&self.snapshot))
    }

    // ── Logging ───────────────────────────────────────────────────────────────

    pub fn trace<W: Write>(
        &mut self,
        out: &mut W,
        template: &str,
        args: &[Value],
    ) -> io::Result<bool> {
        self.log(Level::Trace, out, template, args)
    }

    pub fn warning<W: Write>(
        &mut self,
        out: &mut W,
        template: &str,
        args: &[Value],
    ) -> io::Result<bool> {
        self.log(Level::Warning, out, template, args)
    }

    pub fn error<W: Write>(
        &mut self,
        out: &mut W,
        template: &str,
        args: &[Value],
    ) -> io::Result<bool> {
        self.log(Level::Error, out, template, args)
    }

    pub fn critical<W: Write>(
        &mut self,
        out: &mut W,
        template: &str,
        args: &[Value],
    ) -> io::Result<bool> {
        self.log(Level::Critical, out, template, args)
    }

    /// Write one line at `level` if it passes the logger's threshold.
    ///
    /// Returns `Ok(false)` when the line was filtered out; counters and
    /// clocks only advance for emitted lines.
    pub fn log<W: Write>(
        &mut self,
        level: Level,
        out: &mut W,
        template: &str,
        args: &[Value],
    ) -> io::Result<bool> {
        if !level.passes(self.level) {
            tracing::trace!(%level, threshold = %self.level, "message filtered");
            return Ok(false);
        }

        self.counts[level.index()] += 1;
        self.total += 1;
        let (total, elapsed) = self.clock.tick();
        self.snapshot = Snapshot {
            total,
            elapsed,
            logger_name: self.name.clone(),
            level,
            level_count: self.counts[level.index()],
            total_count: self.total,
        };

        let mut line = self.render_prefix(self.prefix_for(level));
        let consumed = self.render_to(&mut line, template, args);
        if consumed < args.len() {
            tracing::debug!(consumed, supplied = args.len(), "unused arguments");
        }

        match level.color().filter(|_| self.color) {
            Some(color) => queue!(out, SetForegroundColor(color), Print(&line), ResetColor)?,
            None => out.write_all(line.as_bytes())?,
        }
        out.write_all(b"\n")?;
        Ok(true)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
