//! `dlogrc` configuration file parser.
//!
//! | Directive | Action |
//! |-----------|--------|
//! | `/set <key>=<value>` or `/set <key> <value>` | set a logger setting |
//! | `/prefix <level> <template>` | prefix used only for `<level>` |
//! | Lines starting with `;` | comment, ignored |
//! | Any other `/command` | silently skipped |
//!
//! `/set` keys are `name`, `level`, `prefix` and `color`.  A value wrapped in
//! double quotes keeps its surrounding whitespace; `\"` inside it is a quote.
//! Other backslashes are left alone so template escapes survive.
//!
//! ```text
//! ; dlogrc
//! /set name=net
//! /set level warning
//! /set prefix "[name] [>8ln] +[>9.3ets]s: "
//! /prefix critical "[name] [^'!!! [ln]] "
//! /set color on
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::level::Level;
use crate::logger::Logger;

/// Environment variable that overrides the default config location.
pub const ENV_CONFIG: &str = "DLOGRC";

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

/// Logger settings read from a config file.  Unset fields leave the
/// logger's current value alone.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub name: Option<String>,
    pub level: Option<Level>,
    pub prefix: Option<String>,
    pub color: Option<bool>,
    /// `/prefix` overrides, in file order.
    pub level_prefixes: Vec<(Level, String)>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config string.
    ///
    /// Returns the config and a list of any errors on recognised lines.
    /// A bad line never stops the rest of the file from loading.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Config::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let Some(rest) = line.strip_prefix('/') else { continue };

            let (cmd, args) = rest
                .split_once(|c: char| c.is_ascii_whitespace())
                .unwrap_or((rest, ""));
            let args = args.trim_start();

            let result = match cmd {
                "set" => config.parse_set(args),
                "prefix" => config.parse_prefix(args),
                _ => {
                    tracing::trace!(line = lineno, cmd, "skipping unknown command");
                    Ok(())
                }
            };
            if let Err(message) = result {
                errors.push(ConfigError { line: lineno, message });
            }
        }

        (config, errors)
    }

    /// Read and parse a config file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        Ok(Self::load_str(&s))
    }

    /// Copy every setting present in this config onto `logger`.
    pub fn apply(&self, logger: &mut Logger) {
        if let Some(name) = &self.name {
            logger.set_name(name.clone());
        }
        if let Some(level) = self.level {
            logger.set_level(level);
        }
        if let Some(prefix) = &self.prefix {
            logger.set_prefix(prefix.clone());
        }
        if let Some(color) = self.color {
            logger.set_color(color);
        }
        for (level, prefix) in &self.level_prefixes {
            logger.set_level_prefix(*level, Some(prefix.clone()));
        }
    }

    // ── /set ──────────────────────────────────────────────────────────────────

    fn parse_set(&mut self, args: &str) -> Result<(), String> {
        if args.is_empty() {
            return Err("/set: requires an argument".into());
        }

        let key_end = args
            .find(|c: char| c == '=' || c.is_ascii_whitespace())
            .unwrap_or(args.len());
        let key = &args[..key_end];
        let rest = &args[key_end..];
        let value = match rest.strip_prefix('=') {
            Some(v) => v,
            None if rest.trim().is_empty() => {
                return Err(format!("/set: missing value for '{key}'"));
            }
            None => rest.trim_start(),
        };
        let value = unquote(value.trim_end());

        if key.is_empty() {
            return Err("/set: setting name cannot be empty".into());
        }

        match key {
            "name" => self.name = Some(value),
            "level" => {
                self.level = Some(value.parse::<Level>().map_err(|e| format!("/set: {e}"))?);
            }
            "prefix" => self.prefix = Some(value),
            "color" | "colour" => self.color = Some(parse_bool(&value)?),
            other => return Err(format!("/set: unknown setting '{other}'")),
        }
        Ok(())
    }

    // ── /prefix ───────────────────────────────────────────────────────────────

    fn parse_prefix(&mut self, args: &str) -> Result<(), String> {
        let (level, template) = args
            .split_once(|c: char| c.is_ascii_whitespace())
            .unwrap_or((args, ""));
        if level.is_empty() {
            return Err("/prefix: requires a level".into());
        }
        let level = level.parse::<Level>().map_err(|e| format!("/prefix: {e}"))?;
        let template = unquote(template.trim());
        self.level_prefixes.push((level, template));
        Ok(())
    }
}

/// Location of the user config: `$DLOGRC`, else `dlogrc` in the platform
/// config directory (`~/.config/dlog/dlogrc` on Linux).
pub fn default_path() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os(ENV_CONFIG) {
        return Some(PathBuf::from(p));
    }
    ProjectDirs::from("", "", "dlog").map(|dirs| dirs.config_dir().join("dlogrc"))
}

// ── Value helpers ─────────────────────────────────────────────────────────────

/// Strip one pair of surrounding double quotes, turning `\"` into `"`.
fn unquote(s: &str) -> String {
    match s.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\""),
        None => s.to_owned(),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "1" | "true" | "yes" => Ok(true),
        "off" | "0" | "false" | "no" => Ok(false),
        _ => Err(format!("/set: expected on or off, got '{s}'")),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
