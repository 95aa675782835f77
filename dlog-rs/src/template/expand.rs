//! Template rendering.
//!
//! Walks a template once, copying literal text and expanding directives:
//!
//! | Sequence          | Meaning                                              |
//! |-------------------|------------------------------------------------------|
//! | `[mods name]`     | Variable `name` from the [`Scope`]                   |
//! | `[mods'body]`     | Render `body`, then format the result as a string    |
//! | `{mods keyword}`  | Next positional argument, of the kind `keyword` names |
//! | `[[` `]]` `{{` `}}` | Literal delimiter                                  |
//! | `\c`              | Literal `c`                                          |
//!
//! Nothing is pre-parsed: every call re-scans the template.  Broken
//! directives produce no output and never abort the rest of the line,
//! except that an unterminated one swallows the remainder of the template.

use super::format::{render_str, render_value};
use super::keyword::{dispatch, ArgCursor, Dispatch};
use super::modifier::{collect, Collected, Directive};
use super::value::Value;

/// Characters that end a run of literal text.
const SPECIAL: &[char] = &['[', ']', '{', '}', '\\'];

/// Source of variable values for `[name]` directives.
pub trait Scope {
    fn get_var(&self, name: &str) -> Option<Value>;
}

impl<F> Scope for F
where
    F: Fn(&str) -> Option<Value>,
{
    fn get_var(&self, name: &str) -> Option<Value> {
        self(name)
    }
}

/// Scan position within one template plus the shared argument cursor.
///
/// Passed by value into each step and handed back advanced; a nested
/// sub-template starts its own scan at zero but continues the caller's
/// argument cursor.
#[derive(Debug, Clone, Copy)]
pub struct RenderCursor<'a> {
    pub pos: usize,
    pub args: ArgCursor<'a>,
}

/// Render `template` with positional `args`.
pub fn expand(template: &str, scope: &dyn Scope, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    expand_into(&mut out, template, scope, ArgCursor::new(args));
    out
}

/// Render a line prefix: variables only, no positional arguments.
pub fn expand_prefix(template: &str, scope: &dyn Scope) -> String {
    let mut out = String::with_capacity(template.len());
    expand_into(&mut out, template, scope, ArgCursor::empty());
    out
}

/// Render `template` onto `out`, returning the argument cursor after the
/// last consumed argument.
pub fn expand_into<'a>(
    out: &mut String,
    template: &str,
    scope: &dyn Scope,
    args: ArgCursor<'a>,
) -> ArgCursor<'a> {
    let mut cursor = RenderCursor { pos: 0, args };
    while cursor.pos < template.len() {
        cursor = step(out, template, scope, cursor);
    }
    cursor.args
}

/// Render the lexical unit at `cursor.pos`.
fn step<'a>(
    out: &mut String,
    src: &str,
    scope: &dyn Scope,
    cursor: RenderCursor<'a>,
) -> RenderCursor<'a> {
    let bytes = src.as_bytes();
    let pos = cursor.pos;

    let next = match bytes[pos] {
        b'\\' => match src[pos + 1..].chars().next() {
            Some(c) => {
                out.push(c);
                pos + 1 + c.len_utf8()
            }
            None => src.len(),
        },
        open @ (b'[' | b'{') => {
            if bytes.get(pos + 1) == Some(&open) {
                out.push(char::from(open));
                pos + 2
            } else {
                return directive(out, src, scope, cursor, open);
            }
        }
        close @ (b']' | b'}') => {
            // A doubled closer is one literal; a stray single one is kept too.
            out.push(char::from(close));
            if bytes.get(pos + 1) == Some(&close) {
                pos + 2
            } else {
                pos + 1
            }
        }
        _ => {
            let end = src[pos..].find(SPECIAL).map_or(src.len(), |i| pos + i);
            out.push_str(&src[pos..end]);
            end
        }
    };
    RenderCursor { pos: next, ..cursor }
}

/// Expand the directive opened by `open` at `cursor.pos`.
fn directive<'a>(
    out: &mut String,
    src: &str,
    scope: &dyn Scope,
    cursor: RenderCursor<'a>,
    open: u8,
) -> RenderCursor<'a> {
    let terminator = if open == b'[' { b']' } else { b'}' };

    match collect(src, cursor.pos + 1, terminator) {
        Collected::Unterminated => {
            tracing::debug!(pos = cursor.pos, "unterminated directive");
            RenderCursor { pos: src.len(), ..cursor }
        }
        Collected::Malformed(next) => RenderCursor { pos: next, ..cursor },
        Collected::Complete(Directive::Nested { mods, body }, next) => {
            let mut inner = String::new();
            let args = expand_into(&mut inner, body, scope, cursor.args);
            render_str(out, &inner, &mods);
            RenderCursor { pos: next, args }
        }
        Collected::Complete(Directive::Named { mods, name }, next) if open == b'[' => {
            match name.and_then(|n| scope.get_var(n)) {
                Some(value) => render_value(out, &value, &mods),
                None => tracing::debug!(name, "unknown variable"),
            }
            RenderCursor { pos: next, ..cursor }
        }
        Collected::Complete(Directive::Named { mods, name }, next) => {
            let (resolved, args) = dispatch(name, mods, cursor.args);
            if let Dispatch::Render(value, mods) = resolved {
                render_value(out, &value, &mods);
            }
            RenderCursor { pos: next, args }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TestScope {
        vars: HashMap<String, Value>,
    }

    impl TestScope {
        fn new() -> Self {
            let mut vars = HashMap::new();
            vars.insert("ln".to_owned(), Value::from("TRACE"));
            vars.insert("lmc".to_owned(), Value::Int64(7));
            vars.insert("var1".to_owned(), Value::Int32(100));
            vars.insert("testVar".to_owned(), Value::Float(100.156));
            vars.insert("newChar".to_owned(), Value::Char('c'));
            TestScope { vars }
        }
    }

    impl Scope for TestScope {
        fn get_var(&self, name: &str) -> Option<Value> {
            self.vars.get(name).cloned()
        }
    }

    fn exp(src: &str, args: &[Value]) -> String {
        expand(src, &TestScope::new(), args)
    }

    #[test]
    fn no_substitution() {
        assert_eq!(exp("hello world", &[]), "hello world");
    }

    #[test]
    fn variable_reference() {
        assert_eq!(exp("32 bit var: [var1]", &[]), "32 bit var: 100");
        assert_eq!(exp("[ newChar ]", &[]), "c");
    }

    #[test]
    fn variable_modifiers() {
        assert_eq!(exp("[$ln]", &[]), "trace");
        assert_eq!(exp("[>05lmc]", &[]), "00007");
        assert_eq!(exp("([10.2testVar])", &[]), "(100.16    )");
    }

    #[test]
    fn unknown_variable_is_empty() {
        assert_eq!(exp("A[nope]B", &[]), "AB");
    }

    #[test]
    fn positional_arguments() {
        let args = [Value::Char('B'), Value::Int32(16), Value::Int32(-1)];
        assert_eq!(
            exp("char: {char}, int: {d}, another int: {int}", &args),
            "char: B, int: 16, another int: -1"
        );
    }

    #[test]
    fn positional_modifiers() {
        let args = [Value::Int32(10), Value::Int32(10)];
        assert_eq!(exp("({10d}) ({>10d})", &args), "(10        ) (        10)");
        let args = [Value::from("text"), Value::Int32(-1), Value::Int32(-1)];
        assert_eq!(
            exp("({10>^str}) ({+d}) ({u})", &args),
            "(      TEXT) (4294967295) (4294967295)"
        );
    }

    #[test]
    fn hex_with_zero_fill() {
        let args = [Value::Int32(0xDEAD), Value::Int64(0xBEEF)];
        assert_eq!(exp("{>08X int}{0x long 16}", &args), "0000DEADbeef000000000000");
    }

    #[test]
    fn doubled_delimiters() {
        assert_eq!(exp("[[", &[]), "[");
        assert_eq!(exp("]]", &[]), "]");
        assert_eq!(exp("{{", &[]), "{");
        assert_eq!(exp("}}", &[]), "}");
        assert_eq!(exp("{{{>+3uint}}}", &[Value::Int32(10)]), "{ 10}");
    }

    #[test]
    fn backslash_escapes() {
        assert_eq!(exp(r"\[[lmc]\]", &[]), "[7]");
        assert_eq!(exp(r"a\\b", &[]), r"a\b");
        assert_eq!(exp(r"\{int}", &[Value::Int32(1)]), "{int}");
        assert_eq!(exp(r"\é", &[]), "é");
        assert_eq!(exp("trailing\\", &[]), "trailing");
    }

    #[test]
    fn stray_closers_are_literal() {
        assert_eq!(exp("a]b}c", &[]), "a]b}c");
    }

    #[test]
    fn sub_template_applies_outer_modifiers() {
        assert_eq!(exp("[^'abc]", &[]), "ABC");
        assert_eq!(exp("[$'THIS IS [^'also] LOWER]", &[]), "this is also lower");
    }

    #[test]
    fn sub_template_consumes_arguments_in_order() {
        let args = [Value::from("FORMAT")];
        assert_eq!(exp("['this is a [^'sub {$str}]]", &args), "this is a SUB FORMAT");
        let args = [Value::from("a"), Value::from("b"), Value::from("c")];
        assert_eq!(exp("{str}['{str}]{str}", &args), "abc");
    }

    #[test]
    fn sub_template_alignment() {
        let short = exp("[10'{str}:] {str}", &[Value::from("Hi"), Value::from("X")]);
        let long = exp("[10'{str}:] {str}", &[Value::from("Hello"), Value::from("X")]);
        assert_eq!(short, "Hi:        X");
        assert_eq!(long, "Hello:     X");
        assert_eq!(short.find('X'), long.find('X'));
    }

    #[test]
    fn sub_template_keeps_quotes() {
        assert_eq!(
            exp("['other single quotes don't have to be escaped: 'this']", &[]),
            "other single quotes don't have to be escaped: 'this'"
        );
    }

    #[test]
    fn escapes_inside_sub_template() {
        assert_eq!(exp(r"['\{\}\[\]]\\", &[]), r"{}[]\");
    }

    #[test]
    fn unterminated_directive_writes_nothing() {
        assert_eq!(exp("A[lmc", &[]), "A");
        assert_eq!(exp("A['abc", &[]), "A");
        assert_eq!(exp("A{int", &[Value::Int32(1)]), "A");
    }

    #[test]
    fn malformed_directive_is_skipped() {
        assert_eq!(exp("A[l@mc]B", &[]), "AB");
        assert_eq!(exp("A{in#t}B{int}", &[Value::Int32(3)]), "AB3");
    }

    #[test]
    fn unknown_keyword_does_not_consume() {
        let args = [Value::Int32(1), Value::Int32(2)];
        assert_eq!(exp("{bogus}{int}{int}", &args), "12");
    }

    #[test]
    fn prefix_ignores_positional_directives() {
        let scope = TestScope::new();
        assert_eq!(expand_prefix("[ln]-{int}: ", &scope), "TRACE-: ");
    }

    #[test]
    fn closure_scope() {
        let scope = |name: &str| (name == "who").then(|| Value::from("world"));
        assert_eq!(expand("hello [^who]", &scope, &[]), "hello WORLD");
    }

    #[test]
    fn expand_into_reports_consumption() {
        let args = [Value::Int32(1), Value::Int32(2), Value::Int32(3)];
        let mut out = String::new();
        let cursor = expand_into(&mut out, "{int}['{int}]", &TestScope::new(), ArgCursor::new(&args));
        assert_eq!(out, "12");
        assert_eq!(cursor.consumed(), 2);
        assert_eq!(cursor.remaining(), 1);
    }
}
