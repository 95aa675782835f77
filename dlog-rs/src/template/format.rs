//! Per-type value renderers.
//!
//! Each renderer appends to an output `String` and applies the subset of a
//! [`ModifierSet`] that is meaningful for its type:
//!
//! | Type    | case | width/align | zero-fill | base | unsigned | precision |
//! |---------|------|-------------|-----------|------|----------|-----------|
//! | char    | yes  | yes         | no        | no   | no       | no        |
//! | integer | no   | yes         | yes       | yes  | yes      | no        |
//! | float   | no   | yes         | yes       | no   | no       | yes       |
//! | string  | yes  | yes         | no        | no   | no       | no        |

use super::modifier::{Align, Base, Case, ModifierSet};
use super::value::Value;

/// Precision used when a directive does not specify one.
pub const DEFAULT_PRECISION: usize = 6;
/// Largest precision honoured by the float renderer.
pub const MAX_PRECISION: usize = 5;

/// Render any [`Value`] with its type's renderer.
pub fn render_value(out: &mut String, value: &Value, mods: &ModifierSet) {
    match value {
        Value::Char(c) => render_char(out, *c, mods),
        Value::Int32(n) => render_int(out, i64::from(*n), u64::from(*n as u32), mods),
        Value::Int64(n) => render_int(out, *n, *n as u64, mods),
        Value::Float(x) => render_float(out, *x, mods),
        Value::Str(s) => render_str(out, s, mods),
    }
}

pub fn render_char(out: &mut String, c: char, mods: &ModifierSet) {
    let mut body = String::new();
    push_folded(&mut body, c, mods.case);
    pad(out, &body, mods, ' ');
}

pub fn render_str(out: &mut String, s: &str, mods: &ModifierSet) {
    let body: String = match mods.case {
        Case::None => s.to_owned(),
        case => {
            let mut folded = String::with_capacity(s.len());
            for c in s.chars() {
                push_folded(&mut folded, c, case);
            }
            folded
        }
    };
    pad(out, &body, mods, ' ');
}

/// Render an integer.  `signed` is the value as declared and `bits` its
/// two's-complement bit pattern at the declared width; unsigned decimal and
/// every non-decimal base print `bits`.
pub fn render_int(out: &mut String, signed: i64, bits: u64, mods: &ModifierSet) {
    let body = match mods.base {
        Base::Decimal if mods.unsigned => bits.to_string(),
        Base::Decimal => signed.to_string(),
        Base::Hex => to_radix(bits, 16, false),
        Base::UpperHex => to_radix(bits, 16, true),
        Base::Binary => to_radix(bits, 2, false),
    };
    pad_numeric(out, &body, mods);
}

pub fn render_float(out: &mut String, x: f64, mods: &ModifierSet) {
    if !x.is_finite() {
        let body = if x.is_nan() {
            "nan"
        } else if x < 0.0 {
            "-inf"
        } else {
            "inf"
        };
        pad(out, body, mods, ' ');
        return;
    }
    let precision = mods.precision.unwrap_or(DEFAULT_PRECISION);
    pad_numeric(out, &to_fixed(x, precision), mods);
}

/// Format `x` with `precision` fractional digits (capped at
/// [`MAX_PRECISION`]).
///
/// Rounding is half away from zero on purpose: `-0.125` at precision 2 is
/// `-0.13`, the mirror of `0.125`.  Once `x` scaled by the precision no
/// longer fits the 53-bit mantissa there is nothing left to round, and the
/// digits come from the exact decimal expansion instead.
pub fn to_fixed(x: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    let scale = 10f64.powi(precision as i32);
    let magnitude = x.abs() * scale;

    if magnitude >= EXACT_LIMIT {
        let sign = if x.is_sign_negative() { "-" } else { "" };
        return format!("{sign}{:.precision$}", x.abs());
    }

    let scaled = (magnitude + 0.5).trunc();
    let int_part = (scaled / scale).trunc();
    let frac = (scaled - int_part * scale).clamp(0.0, scale - 1.0) as u64;

    let mut s = String::new();
    if x.is_sign_negative() && scaled != 0.0 {
        s.push('-');
    }
    s.push_str(&format!("{int_part:.0}"));
    if precision > 0 {
        s.push('.');
        s.push_str(&format!("{frac:0precision$}"));
    }
    s
}

/// 2^53: above this every `f64` is an integer.
const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Digits of `n` in `radix`, produced least-significant first and reversed.
fn to_radix(mut n: u64, radix: u64, upper: bool) -> String {
    if n == 0 {
        return "0".to_owned();
    }
    let digits: &[u8; 16] = if upper {
        b"0123456789ABCDEF"
    } else {
        b"0123456789abcdef"
    };
    let mut scratch = Vec::with_capacity(64);
    while n > 0 {
        scratch.push(digits[(n % radix) as usize]);
        n /= radix;
    }
    scratch.reverse();
    scratch.into_iter().map(char::from).collect()
}

fn push_folded(out: &mut String, c: char, case: Case) {
    match case {
        Case::None => out.push(c),
        Case::Upper => out.extend(c.to_uppercase()),
        Case::Lower => out.extend(c.to_lowercase()),
    }
}

/// Pad `body` to the field width, putting `fill` on the side away from the
/// alignment.
fn pad(out: &mut String, body: &str, mods: &ModifierSet, fill: char) {
    let n = pad_len(body, mods);
    match mods.align {
        Align::Right => {
            out.extend(std::iter::repeat(fill).take(n));
            out.push_str(body);
        }
        Align::Left => {
            out.push_str(body);
            out.extend(std::iter::repeat(fill).take(n));
        }
    }
}

/// Numeric padding: `0` or space per the zero-fill flag.  Right-aligned
/// zeros go between a leading minus sign and the digits.
fn pad_numeric(out: &mut String, body: &str, mods: &ModifierSet) {
    if !mods.zero_fill {
        pad(out, body, mods, ' ');
        return;
    }
    match (mods.align, body.strip_prefix('-')) {
        (Align::Right, Some(digits)) => {
            let n = pad_len(body, mods);
            out.push('-');
            out.extend(std::iter::repeat('0').take(n));
            out.push_str(digits);
        }
        _ => pad(out, body, mods, '0'),
    }
}

fn pad_len(body: &str, mods: &ModifierSet) -> usize {
    mods.width.unwrap_or(0).saturating_sub(body.chars().count())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
