//! Directive tokenizer.
//!
//! Classifies exactly one lexical unit inside a `[...]` or `{...}` directive.
//! The scan position is passed in and handed back, never shared:
//! [`next_token`] returns the token together with the index just past it.
//!
//! | Symbol | Token |
//! |--------|-------|
//! | `^`    | [`Token::Capitalize`] |
//! | `0`    | [`Token::ZeroFill`] (only at the start of a token) |
//! | `$`    | [`Token::Lowercase`] |
//! | `>`    | [`Token::RightAlign`] |
//! | `+`    | [`Token::Unsigned`] |
//! | `.`    | [`Token::Decimal`] |
//! | `.0`   | [`Token::ExplicitZero`] |
//! | `x`    | [`Token::Hex`] |
//! | `X`    | [`Token::UpperHex`] |
//! | `b`    | [`Token::Binary`] |
//! | `'`    | [`Token::Quote`] |
//! | digits | [`Token::Number`] |
//! | ident  | [`Token::Ident`] |

/// One lexical unit of the modifier grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Capitalize,
    ZeroFill,
    Lowercase,
    RightAlign,
    Unsigned,
    Decimal,
    ExplicitZero,
    Hex,
    UpperHex,
    Binary,
    /// Start of a nested sub-template.
    Quote,
    /// Maximal run of ASCII digits (the raw text, not yet parsed).
    Number(&'a str),
    Ident(&'a str),
}

/// Skip spaces and tabs starting at `pos`, returning the first other index.
pub fn skip_whitespace(src: &str, mut pos: usize) -> usize {
    let bytes = src.as_bytes();
    while matches!(bytes.get(pos), Some(b' ' | b'\t')) {
        pos += 1;
    }
    pos
}

/// Classify the token at `pos` (after skipping whitespace).
///
/// Returns `None` when the character there starts no known token, including
/// at end of input; the caller treats that as a malformed directive.
pub fn next_token(src: &str, pos: usize) -> Option<(Token<'_>, usize)> {
    let bytes = src.as_bytes();
    let pos = skip_whitespace(src, pos);
    let ch = *bytes.get(pos)?;

    let single = match ch {
        b'^' => Some(Token::Capitalize),
        b'0' => Some(Token::ZeroFill),
        b'$' => Some(Token::Lowercase),
        b'>' => Some(Token::RightAlign),
        b'+' => Some(Token::Unsigned),
        b'.' => {
            if bytes.get(pos + 1) == Some(&b'0') {
                return Some((Token::ExplicitZero, pos + 2));
            }
            Some(Token::Decimal)
        }
        b'\'' => Some(Token::Quote),
        // Letter markers give way to an identifier they would otherwise split.
        b'x' | b'X' | b'b' if !bytes.get(pos + 1).copied().is_some_and(is_ident_continue) => {
            Some(match ch {
                b'x' => Token::Hex,
                b'X' => Token::UpperHex,
                _ => Token::Binary,
            })
        }
        _ => None,
    };
    if let Some(tok) = single {
        return Some((tok, pos + 1));
    }

    if ch.is_ascii_digit() {
        let end = scan_while(bytes, pos, |b| b.is_ascii_digit());
        return Some((Token::Number(&src[pos..end]), end));
    }
    if is_ident_start(ch) {
        let end = scan_while(bytes, pos, is_ident_continue);
        return Some((Token::Ident(&src[pos..end]), end));
    }
    None
}

pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn scan_while(bytes: &[u8], mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    while bytes.get(pos).copied().is_some_and(&pred) {
        pos += 1;
    }
    pos
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token<'_>> {
        let mut out = Vec::new();
        let mut pos = 0;
        while let Some((tok, next)) = next_token(src, pos) {
            out.push(tok);
            pos = next;
        }
        out
    }

    #[test]
    fn single_symbols() {
        assert_eq!(
            tokens("^ $ > + '"),
            vec![
                Token::Capitalize,
                Token::Lowercase,
                Token::RightAlign,
                Token::Unsigned,
                Token::Quote
            ]
        );
    }

    #[test]
    fn zero_fill_then_width() {
        assert_eq!(tokens("08"), vec![Token::ZeroFill, Token::Number("8")]);
    }

    #[test]
    fn width_containing_zero() {
        assert_eq!(tokens("10"), vec![Token::Number("10")]);
    }

    #[test]
    fn decimal_and_explicit_zero() {
        assert_eq!(tokens(".2"), vec![Token::Decimal, Token::Number("2")]);
        assert_eq!(tokens(".0"), vec![Token::ExplicitZero]);
        assert_eq!(tokens(".05"), vec![Token::ExplicitZero, Token::Number("5")]);
    }

    #[test]
    fn base_markers_separated_by_space() {
        assert_eq!(
            tokens("0x long 16"),
            vec![Token::ZeroFill, Token::Hex, Token::Ident("long"), Token::Number("16")]
        );
        assert_eq!(tokens("X b"), vec![Token::UpperHex, Token::Binary]);
    }

    #[test]
    fn letter_marker_inside_identifier() {
        assert_eq!(tokens("bks"), vec![Token::Ident("bks")]);
        assert_eq!(tokens("xpos"), vec![Token::Ident("xpos")]);
    }

    #[test]
    fn marker_before_terminator() {
        // `]` is not an identifier character, so `b` stays a marker.
        let (tok, next) = next_token("b]", 0).unwrap();
        assert_eq!(tok, Token::Binary);
        assert_eq!(next, 1);
    }

    #[test]
    fn identifier_with_digits_and_underscore() {
        assert_eq!(tokens("_var_2"), vec![Token::Ident("_var_2")]);
    }

    #[test]
    fn skips_leading_whitespace() {
        let (tok, next) = next_token("  \tname", 0).unwrap();
        assert_eq!(tok, Token::Ident("name"));
        assert_eq!(next, 7);
    }

    #[test]
    fn unknown_character_is_no_token() {
        assert_eq!(next_token("@", 0), None);
        assert_eq!(next_token("[", 0), None);
        assert_eq!(next_token("", 0), None);
        assert_eq!(next_token("   ", 0), None);
    }
}
