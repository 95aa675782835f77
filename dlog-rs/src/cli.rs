//! Command-line argument parsing.
//!
//! Usage:
//!   dlog [-f[<rc>]] [-L<level>] [-m<level>] [-p<prefix>] [-n<name>] [-Cd] <template> [arg...]
//!
//! Each `arg` after the template becomes one positional value:
//!
//! | Form | Value |
//! |------|-------|
//! | `int:N` | 32-bit integer |
//! | `long:N` | 64-bit integer |
//! | `float:X` | floating point |
//! | `char:C` | single character |
//! | `str:S` | string `S` (use for text containing a known `kind:` prefix) |
//! | anything else | the whole argument as a string |

use std::path::PathBuf;

use crate::config;
use crate::level::Level;
use crate::template::Value;

pub const USAGE: &str =
    "Usage: dlog [-f[<rc>]] [-L<level>] [-m<level>] [-p<prefix>] [-n<name>] [-Cd] <template> [arg...]";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug)]
pub struct CliArgs {
    /// Which config file to load.
    pub config: ConfigFile,
    /// Logger threshold (`-L<level>`).
    pub level: Option<Level>,
    /// Level the line is written at (`-m<level>`).
    pub message_level: Level,
    /// Shared prefix (`-p<prefix>`).
    pub prefix: Option<String>,
    /// Logger name (`-n<name>`).
    pub name: Option<String>,
    /// Colour by level (`-C`).
    pub color: bool,
    /// Diagnostics to stderr (`-d`).
    pub debug: bool,
    pub template: String,
    pub args: Vec<Value>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            config: ConfigFile::default(),
            level: None,
            message_level: Level::Trace,
            prefix: None,
            name: None,
            color: false,
            debug: false,
            template: String::new(),
            args: Vec::new(),
        }
    }
}

/// How to choose the config file.
#[derive(Debug, Default, PartialEq)]
pub enum ConfigFile {
    /// `$DLOGRC` or the platform default, if it exists.
    #[default]
    Search,
    /// `-f` with no file argument: skip config.
    Skip,
    /// `-f<file>`: load this specific file.
    Explicit(PathBuf),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut positional: Vec<String> = Vec::new();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        if arg == "--" {
            positional.extend(argv[i + 1..].iter().cloned());
            break;
        }

        // Everything after the template is an argument, dashes included.
        if !positional.is_empty() || !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_owned());
            i += 1;
            continue;
        }

        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'C' => args.color = true,
                'd' => args.debug = true,

                // -f[<file>]
                'f' => {
                    if j + 1 < chars.len() {
                        let file: String = chars[j + 1..].iter().collect();
                        args.config = ConfigFile::Explicit(PathBuf::from(file));
                        j = chars.len();
                    } else {
                        args.config = ConfigFile::Skip;
                    }
                }

                flag @ ('L' | 'm' | 'p' | 'n') => {
                    let value = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err(format!("-{flag} requires an argument"));
                    };
                    match flag {
                        'L' | 'm' => {
                            let level = value
                                .parse::<Level>()
                                .map_err(|e| format!("-{flag}: {e}"))?;
                            if flag == 'L' {
                                args.level = Some(level);
                            } else {
                                args.message_level = level;
                            }
                        }
                        'p' => args.prefix = Some(value),
                        _ => args.name = Some(value),
                    }
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    args.template = positional.next().ok_or("missing template")?;
    args.args = positional.map(|a| parse_value(&a)).collect::<Result<_, _>>()?;
    Ok(args)
}

/// Turn one `kind:text` argument into a [`Value`].
pub fn parse_value(arg: &str) -> Result<Value, String> {
    let Some((kind, text)) = arg.split_once(':') else {
        return Ok(Value::from(arg));
    };
    let bad = |what: &str| format!("invalid {what} argument: {text:?}");
    match kind {
        "int" => text.trim().parse().map(Value::Int32).map_err(|_| bad("int")),
        "long" => text.trim().parse().map(Value::Int64).map_err(|_| bad("long")),
        "float" => text.trim().parse().map(Value::Float).map_err(|_| bad("float")),
        "char" => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(bad("char")),
            }
        }
        "str" => Ok(Value::from(text)),
        _ => Ok(Value::from(arg)),
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// The config file to load, if any.
pub fn resolve_config(choice: &ConfigFile) -> Option<PathBuf> {
    match choice {
        ConfigFile::Skip => None,
        ConfigFile::Explicit(path) => Some(path.clone()),
        ConfigFile::Search => config::default_path().filter(|p| p.exists()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
