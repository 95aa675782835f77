//! Reserved type keywords and the positional-argument dispatcher.
//!
//! A `{...}` directive names the *kind* of the next positional argument
//! rather than the argument itself.  Several spellings map to each kind;
//! any keyword beginning with `u` also forces an unsigned rendering.

use super::modifier::ModifierSet;
use super::value::{Value, ValueKind};

/// Surface aliases and the argument kind each one consumes.
const RESERVED: &[(&str, ValueKind)] = &[
    ("char", ValueKind::Char),
    ("c", ValueKind::Char),
    ("int", ValueKind::Int32),
    ("i", ValueKind::Int32),
    ("d", ValueKind::Int32),
    ("short", ValueKind::Int32),
    ("u", ValueKind::Int32),
    ("uint", ValueKind::Int32),
    ("ushort", ValueKind::Int32),
    ("long", ValueKind::Int64),
    ("l", ValueKind::Int64),
    ("ld", ValueKind::Int64),
    ("ll", ValueKind::Int64),
    ("ul", ValueKind::Int64),
    ("ulong", ValueKind::Int64),
    ("lu", ValueKind::Int64),
    ("ull", ValueKind::Int64),
    ("float", ValueKind::Float),
    ("f", ValueKind::Float),
    ("double", ValueKind::Float),
    ("lf", ValueKind::Float),
    ("str", ValueKind::Str),
    ("s", ValueKind::Str),
    ("string", ValueKind::Str),
];

/// Marker character of the unsigned aliases.
const UNSIGNED_ALIAS: char = 'u';

/// Look up a type keyword.
pub fn lookup_keyword(word: &str) -> Option<ValueKind> {
    RESERVED.iter().find(|(alias, _)| *alias == word).map(|&(_, kind)| kind)
}

/// All registered aliases for `kind`, in table order.
pub fn aliases(kind: ValueKind) -> impl Iterator<Item = &'static str> {
    RESERVED.iter().filter(move |(_, k)| *k == kind).map(|&(alias, _)| alias)
}

/// The positional-argument sequence and the index of the next unread value.
///
/// Cheap to copy; renderers take it by value and hand back the advanced
/// copy so nested sub-templates consume arguments in order of appearance.
#[derive(Debug, Clone, Copy)]
pub struct ArgCursor<'a> {
    args: &'a [Value],
    next: usize,
}

impl<'a> ArgCursor<'a> {
    pub fn new(args: &'a [Value]) -> Self {
        Self { args, next: 0 }
    }

    /// An empty sequence, used when rendering prefixes.
    pub fn empty() -> Self {
        Self { args: &[], next: 0 }
    }

    /// Number of values consumed so far.
    pub fn consumed(&self) -> usize {
        self.next
    }

    pub fn remaining(&self) -> usize {
        self.args.len() - self.next
    }
}

/// What the dispatcher resolved for one `{...}` directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Render `value` with the (possibly unsigned-adjusted) modifiers.
    Render(Value, ModifierSet),
    /// Nothing to render.
    Skip,
}

/// Resolve `keyword` against the reserved table and pull one argument.
///
/// An unknown keyword renders nothing and consumes nothing, so later
/// positional directives read the value this one would have taken.  A known
/// keyword always consumes exactly one value when one is available, even if
/// that value cannot be converted to the requested kind.
pub fn dispatch<'a>(
    keyword: Option<&str>,
    mut mods: ModifierSet,
    cursor: ArgCursor<'a>,
) -> (Dispatch, ArgCursor<'a>) {
    let Some(keyword) = keyword else {
        tracing::debug!("positional directive without a type keyword");
        return (Dispatch::Skip, cursor);
    };
    let Some(kind) = lookup_keyword(keyword) else {
        tracing::debug!(keyword, "unknown type keyword; no argument consumed");
        return (Dispatch::Skip, cursor);
    };
    let Some(raw) = cursor.args.get(cursor.next) else {
        tracing::debug!(keyword, consumed = cursor.next, "positional arguments exhausted");
        return (Dispatch::Skip, cursor);
    };
    let advanced = ArgCursor { next: cursor.next + 1, ..cursor };

    if keyword.starts_with(UNSIGNED_ALIAS) {
        mods.unsigned = true;
    }
    match raw.clone().coerce(kind) {
        Some(value) => (Dispatch::Render(value, mods), advanced),
        None => {
            tracing::debug!(
                keyword,
                expected = kind.name(),
                got = raw.kind().name(),
                "positional argument not convertible"
            );
            (Dispatch::Skip, advanced)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_a_kind() {
        assert_eq!(lookup_keyword("int"), Some(ValueKind::Int32));
        assert_eq!(lookup_keyword("d"), Some(ValueKind::Int32));
        assert_eq!(lookup_keyword("uint"), Some(ValueKind::Int32));
        assert_eq!(lookup_keyword("ulong"), Some(ValueKind::Int64));
        assert_eq!(lookup_keyword("str"), Some(ValueKind::Str));
        assert_eq!(lookup_keyword("double"), Some(ValueKind::Float));
        assert_eq!(lookup_keyword("char"), Some(ValueKind::Char));
        assert_eq!(lookup_keyword("nope"), None);
    }

    #[test]
    fn aliases_listing() {
        let chars: Vec<_> = aliases(ValueKind::Char).collect();
        assert_eq!(chars, vec!["char", "c"]);
    }

    #[test]
    fn consumes_in_order() {
        let args = [Value::Int32(1), Value::Str("two".into())];
        let cursor = ArgCursor::new(&args);
        let (first, cursor) = dispatch(Some("int"), ModifierSet::default(), cursor);
        let (second, cursor) = dispatch(Some("str"), ModifierSet::default(), cursor);
        assert_eq!(first, Dispatch::Render(Value::Int32(1), ModifierSet::default()));
        assert_eq!(second, Dispatch::Render(Value::Str("two".into()), ModifierSet::default()));
        assert_eq!(cursor.consumed(), 2);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn unknown_keyword_consumes_nothing() {
        let args = [Value::Int32(1)];
        let (d, cursor) = dispatch(Some("bogus"), ModifierSet::default(), ArgCursor::new(&args));
        assert_eq!(d, Dispatch::Skip);
        assert_eq!(cursor.consumed(), 0);
    }

    #[test]
    fn missing_keyword_consumes_nothing() {
        let args = [Value::Int32(1)];
        let (d, cursor) = dispatch(None, ModifierSet::default(), ArgCursor::new(&args));
        assert_eq!(d, Dispatch::Skip);
        assert_eq!(cursor.consumed(), 0);
    }

    #[test]
    fn exhausted_arguments() {
        let (d, cursor) = dispatch(Some("int"), ModifierSet::default(), ArgCursor::empty());
        assert_eq!(d, Dispatch::Skip);
        assert_eq!(cursor.consumed(), 0);
    }

    #[test]
    fn unsigned_alias_sets_flag() {
        let args = [Value::Int32(-1)];
        let (d, _) = dispatch(Some("u"), ModifierSet::default(), ArgCursor::new(&args));
        match d {
            Dispatch::Render(Value::Int32(-1), mods) => assert!(mods.unsigned),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn value_is_coerced_to_keyword_kind() {
        let args = [Value::Int32(7)];
        let (d, _) = dispatch(Some("long"), ModifierSet::default(), ArgCursor::new(&args));
        assert_eq!(d, Dispatch::Render(Value::Int64(7), ModifierSet::default()));
    }

    #[test]
    fn failed_coercion_still_consumes() {
        let args = [Value::Str("abc".into()), Value::Int32(5)];
        let (d, cursor) = dispatch(Some("int"), ModifierSet::default(), ArgCursor::new(&args));
        assert_eq!(d, Dispatch::Skip);
        assert_eq!(cursor.consumed(), 1);
    }
}
