//! End-to-end tests of the find-and-replace binary
//!
//! Each run points FIND_AND_REPLACE_CONFIG at a file inside its temp dir so
//! the user's own configuration never leaks in.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_find-and-replace"))
        .args(args)
        .env("FIND_AND_REPLACE_CONFIG", dir.join("config.toml"))
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start find-and-replace");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn fixture() -> (TempDir, String) {
    let tmp = TempDir::new().unwrap();
    let x = tmp.path().join("x");
    fs::create_dir(&x).unwrap();
    fs::write(x.join("a.txt"), "foo bar").unwrap();
    fs::write(x.join("b.txt"), "baz").unwrap();
    let dir = x.display().to_string();
    (tmp, dir)
}

#[test]
fn test_no_confirm_run() {
    let (tmp, dir) = fixture();
    let output = run(tmp.path(), &["*.txt", &dir, "foo", "qux", "-n"], "");

    assert_eq!(output.status.code(), Some(0));
    let x = tmp.path().join("x");
    assert_eq!(fs::read_to_string(x.join("a.txt")).unwrap(), "qux bar");
    assert_eq!(fs::read_to_string(x.join("b.txt")).unwrap(), "baz");
    let out = stdout(&output);
    assert!(out.contains("OPERATION COMPLETE: 1 file(s) modified"));
    assert!(out.contains("Total files processed: 2"));
}

#[test]
fn test_invalid_regex_exits_1() {
    let (tmp, dir) = fixture();
    let output = run(tmp.path(), &["*.txt", &dir, "(foo", "qux", "-n"], "");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_to_string(tmp.path().join("x/a.txt")).unwrap(), "foo bar");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid regular expression pattern"));
}

#[test]
fn test_missing_directory_exits_0() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing").display().to_string();
    let output = run(tmp.path(), &["*.txt", &missing, "foo", "qux"], "");

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("No matching files found."));
}

#[test]
fn test_interactive_quit_exits_0() {
    let (tmp, dir) = fixture();
    let output = run(tmp.path(), &["*.txt", &dir, "foo|baz", "qux"], "y\nq\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(tmp.path().join("x/a.txt")).unwrap(), "foo bar");
    assert_eq!(fs::read_to_string(tmp.path().join("x/b.txt")).unwrap(), "baz");
    assert!(stdout(&output).contains("Operation cancelled by user."));
}

#[test]
fn test_backreference_swap() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("mail.txt"), "user@host").unwrap();
    let dir = tmp.path().display().to_string();

    let output = run(tmp.path(), &["mail.txt", &dir, r"(\w+)@(\w+)", r"\2@\1", "--no-confirm"], "");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(tmp.path().join("mail.txt")).unwrap(), "host@user");
}

#[test]
fn test_dry_run_reports_without_writing() {
    let (tmp, dir) = fixture();
    let output = run(tmp.path(), &["*.txt", &dir, "foo", "qux", "--dry-run"], "");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(tmp.path().join("x/a.txt")).unwrap(), "foo bar");
    let out = stdout(&output);
    assert!(out.contains("[DRY RUN] Would process:"));
    assert!(out.contains("DRY RUN COMPLETE: 1 file(s) would be modified"));
}

#[test]
fn test_recursive_flag() {
    let (tmp, dir) = fixture();
    let sub = tmp.path().join("x/sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("c.txt"), "foo").unwrap();

    let output = run(tmp.path(), &["*.txt", &dir, "foo", "qux", "-n"], "");
    assert_eq!(fs::read_to_string(sub.join("c.txt")).unwrap(), "foo");
    assert!(stdout(&output).contains("Total files processed: 2"));

    let output = run(tmp.path(), &["*.txt", &dir, "foo", "qux", "-n", "-r"], "");
    assert_eq!(fs::read_to_string(sub.join("c.txt")).unwrap(), "qux");
    let out = stdout(&output);
    assert!(out.contains("(Searching recursively)"));
    assert!(out.contains("Total files processed: 3"));
}

#[test]
fn test_broken_config_is_fatal() {
    let (tmp, dir) = fixture();
    let config = tmp.path().join("bad.toml");
    fs::write(&config, "[display]\ncolor = \"rainbow\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_find-and-replace"))
        .args(["*.txt", &dir, "foo", "qux", "-n"])
        .env("FIND_AND_REPLACE_CONFIG", &config)
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_to_string(tmp.path().join("x/a.txt")).unwrap(), "foo bar");
}

#[test]
fn test_invalid_regex_leaves_home_untouched() {
    let (tmp, dir) = fixture();
    let home = tmp.path().join("home");
    fs::create_dir(&home).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_find-and-replace"))
        .args(["*.txt", &dir, "(foo", "bar", "-n"])
        .env("HOME", &home)
        .env_remove("FIND_AND_REPLACE_CONFIG")
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_dir(&home).unwrap().count(), 0);
    assert_eq!(fs::read_to_string(tmp.path().join("x/a.txt")).unwrap(), "foo bar");
}

#[test]
fn test_color_always_applies_to_piped_output() {
    let (tmp, dir) = fixture();
    fs::write(tmp.path().join("config.toml"), "[display]\ncolor = \"always\"\n").unwrap();

    let output = run(tmp.path(), &["*.txt", &dir, "foo", "qux", "--dry-run"], "");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("\x1b["));

    let output = run(tmp.path(), &["*.txt", &dir, "foo", "qux", "--dry-run", "--no-color"], "");
    assert!(!stdout(&output).contains("\x1b["));
}

#[test]
fn test_directory_glob() {
    let (tmp, _) = fixture();
    let y = tmp.path().join("xy");
    fs::create_dir(&y).unwrap();
    fs::write(y.join("c.txt"), "foo").unwrap();
    let pattern = tmp.path().join("x*").display().to_string();

    let output = run(tmp.path(), &["*.txt", &pattern, "foo", "qux", "-n"], "");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(tmp.path().join("x/a.txt")).unwrap(), "qux bar");
    assert_eq!(fs::read_to_string(y.join("c.txt")).unwrap(), "qux");
    assert!(stdout(&output).contains("Total files processed: 3"));
}
