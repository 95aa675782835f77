//! Modifier sets and the directive collector.
//!
//! [`collect`] consumes the tokens of one directive up to its terminator and
//! folds them into a [`ModifierSet`].  Later tokens of the same kind
//! overwrite earlier ones; nothing here reports a conflict.

use super::token::{next_token, skip_whitespace, Token};

/// Upper bound applied to a parsed field width.
pub const MAX_FIELD_WIDTH: usize = 4096;

/// Case folding applied to rendered characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    #[default]
    None,
    Upper,
    Lower,
}

/// Which side of the field the value sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Numeric base for integer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Base {
    #[default]
    Decimal,
    Hex,
    UpperHex,
    Binary,
}

/// Formatting options attached to a single directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierSet {
    pub case: Case,
    pub align: Align,
    pub zero_fill: bool,
    pub width: Option<usize>,
    /// `None` is "unspecified"; `Some(0)` is an explicit zero precision.
    pub precision: Option<usize>,
    pub base: Base,
    pub unsigned: bool,
}

impl ModifierSet {
    /// Fold one modifier token into the set.  Returns `false` for tokens
    /// that are not modifiers (names, numbers, quotes).
    fn apply(&mut self, tok: Token<'_>) -> bool {
        match tok {
            Token::Capitalize => self.case = Case::Upper,
            Token::Lowercase => self.case = Case::Lower,
            Token::ZeroFill => self.zero_fill = true,
            Token::RightAlign => self.align = Align::Right,
            Token::Unsigned => self.unsigned = true,
            Token::ExplicitZero => self.precision = Some(0),
            Token::Hex => self.base = Base::Hex,
            Token::UpperHex => self.base = Base::UpperHex,
            Token::Binary => self.base = Base::Binary,
            _ => return false,
        }
        true
    }
}

/// A fully collected directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `[mods name]` or `{mods keyword}`; `name` is the last identifier seen.
    Named {
        mods: ModifierSet,
        name: Option<&'a str>,
    },
    /// `[mods'body]`: `body` is rendered first and then formatted as a string.
    Nested { mods: ModifierSet, body: &'a str },
}

/// Outcome of [`collect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collected<'a> {
    /// The directive and the index just past its terminator.
    Complete(Directive<'a>, usize),
    /// An unrecognised character; resume scanning at the given index.
    Malformed(usize),
    /// End of input before the terminator.
    Unterminated,
}

/// Collect the directive whose body starts at `pos` (just after the opening
/// delimiter) and ends at `terminator` (`b']'` or `b'}'`).
pub fn collect(src: &str, pos: usize, terminator: u8) -> Collected<'_> {
    let bytes = src.as_bytes();
    let mut mods = ModifierSet::default();
    let mut name: Option<&str> = None;
    let mut after_decimal = false;
    let mut pos = pos;

    loop {
        pos = skip_whitespace(src, pos);
        match bytes.get(pos) {
            None => return Collected::Unterminated,
            Some(&b) if b == terminator => {
                return Collected::Complete(Directive::Named { mods, name }, pos + 1);
            }
            Some(_) => {}
        }

        let Some((tok, next)) = next_token(src, pos) else {
            tracing::debug!(pos, "malformed directive: unexpected character");
            return match find_terminator(src, pos, terminator) {
                Some(end) => Collected::Malformed(end + 1),
                None => Collected::Unterminated,
            };
        };

        match tok {
            Token::Quote if name.is_none() => {
                let Some(end) = find_terminator(src, next, terminator) else {
                    tracing::debug!(pos, "sub-template has no closing terminator");
                    return Collected::Unterminated;
                };
                let body = &src[next..end];
                return Collected::Complete(Directive::Nested { mods, body }, end + 1);
            }
            Token::Quote => {
                tracing::debug!(pos, "sub-template quote after a name");
                return match find_terminator(src, next, terminator) {
                    Some(end) => Collected::Malformed(end + 1),
                    None => Collected::Unterminated,
                };
            }
            Token::Number(digits) => {
                let n = parse_width(digits);
                if after_decimal {
                    mods.precision = Some(n);
                } else {
                    mods.width = Some(n);
                }
            }
            Token::Ident(ident) => name = Some(ident),
            other => {
                mods.apply(other);
            }
        }
        after_decimal = tok == Token::Decimal;
        pos = next;
    }
}

/// Find the index of the terminator that closes a directive body starting at
/// `pos`, honouring nested directives, doubled delimiters and backslash
/// escapes the same way the template renderer reads them.
pub fn find_terminator(src: &str, pos: usize, terminator: u8) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut open: Vec<u8> = Vec::new();
    let mut i = pos;

    while let Some(&b) = bytes.get(i) {
        match b {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' | b'{' => {
                if bytes.get(i + 1) == Some(&b) {
                    i += 2;
                    continue;
                }
                open.push(if b == b'[' { b']' } else { b'}' });
            }
            b']' | b'}' => {
                if open.last() == Some(&b) {
                    open.pop();
                } else if bytes.get(i + 1) == Some(&b) {
                    i += 2;
                    continue;
                } else if open.is_empty() && b == terminator {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn parse_width(digits: &str) -> usize {
    digits
        .bytes()
        .fold(0usize, |acc, d| {
            acc.saturating_mul(10).saturating_add(usize::from(d - b'0'))
        })
        .min(MAX_FIELD_WIDTH)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
