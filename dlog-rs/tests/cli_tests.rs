//! Run the `dlog` binary end to end and check what it prints.
//!
//! Every run passes `-f` (skip config) or an explicit rc file so the user's
//! own config never leaks into the results.

use std::io::Write;
use std::process::{Command, Output};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn dlog(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dlog"))
        .args(args)
        .env_remove("DLOGRC")
        .output()
        .expect("failed to run dlog")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn plain_template() {
    let out = dlog(&["-f", "hello world"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "hello world\n");
}

#[test]
fn typed_positional_arguments() {
    let out = dlog(&["-f", "{c}|{>5d}|{.2f}|{^s}|{s}", "char:x", "int:42", "float:3.14159", "str:ok", "raw"]);
    assert_eq!(stdout(&out), "x|   42|3.14|OK|raw\n");
}

#[test]
fn prefix_name_and_levels() {
    let out = dlog(&["-f", "-n", "app", "-p", "[name]/[ln]: ", "-m", "error", "failed"]);
    assert_eq!(stdout(&out), "app/ERROR: failed\n");
}

#[test]
fn filtered_message_prints_nothing() {
    let out = dlog(&["-f", "-Lerror", "-mwarning", "quiet"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "");
}

#[test]
fn rc_file_is_applied_and_flags_override() {
    let mut rc = tempfile::NamedTempFile::new().unwrap();
    writeln!(rc, "; test config").unwrap();
    writeln!(rc, "/set name=fromrc").unwrap();
    writeln!(rc, "/set prefix \"[name]> \"").unwrap();
    let rc_flag = format!("-f{}", rc.path().display());

    let out = dlog(&[&rc_flag, "one"]);
    assert_eq!(stdout(&out), "fromrc> one\n");

    let out = dlog(&[&rc_flag, "-nflag", "two"]);
    assert_eq!(stdout(&out), "flag> two\n");
}

#[test]
fn rc_errors_are_warnings() {
    let mut rc = tempfile::NamedTempFile::new().unwrap();
    writeln!(rc, "/set level=loud").unwrap();
    writeln!(rc, "/set prefix=ok: ").unwrap();
    let rc_flag = format!("-f{}", rc.path().display());

    let out = dlog(&[&rc_flag, "line"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "ok:line\n");
    assert!(stderr(&out).contains("line 1: /set: unknown level: loud"));
}

#[test]
fn missing_rc_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let rc_flag = format!("-f{}", dir.path().join("absent").display());
    let out = dlog(&[&rc_flag, "x"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("dlog: "));
}

#[test]
fn usage_errors() {
    let out = dlog(&["-f"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("missing template"));
    assert!(stderr(&out).contains("Usage: dlog"));

    let out = dlog(&["-f", "{d}", "int:nope"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("invalid int argument"));
}
