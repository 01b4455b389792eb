//! # treesh CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behaviour of the `treesh` binary: standard flags, startup errors,
//! configuration handling and the interactive loop on piped stdin.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_and_version() {
    treesh_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dir").and(predicate::str::contains("--config")));

    treesh_cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_start_directory_fails() {
    let sandbox = Sandbox::new();
    treesh_cmd()
        .arg("--config")
        .arg(sandbox.config_path())
        .arg("--dir")
        .arg(sandbox.path().join("does-not-exist"))
        .args(["-c", "cwd"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: No such directory"));
}

#[test]
fn test_missing_config_file_fails() {
    let sandbox = Sandbox::new();
    treesh_cmd()
        .arg("--config")
        .arg(sandbox.path().join("nope.toml"))
        .args(["-c", "cwd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let sandbox = Sandbox::with_config("[tree]\nindent = \"\"\n");
    sandbox
        .run(&["cwd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tree.indent must not be empty"));

    let sandbox = Sandbox::with_config("colour = true\n");
    sandbox.run(&["cwd"]).assert().failure();
}

#[test]
fn test_config_controls_tree_style() {
    let sandbox = Sandbox::with_config("[tree]\nindent = \"--\"\nmarker = \"+\"\ndefault_depth = 1\n");
    sandbox.file("src/lib.rs", "");

    sandbox
        .run(&["tree"])
        .assert()
        .success()
        .stdout("src\n--+lib.rs\n");
}

#[test]
fn test_config_from_environment_variable() {
    let sandbox = Sandbox::with_config("[tree]\nmarker = \"*\"\n");
    sandbox.file("a/b.txt", "");

    treesh_cmd()
        .env("TREESH_CONFIG", sandbox.config_path())
        .arg("--no-color")
        .arg("--dir")
        .arg(sandbox.path())
        .args(["-c", "tree"])
        .assert()
        .success()
        .stdout("a\n\t*b.txt\n");
}

#[test]
fn test_interactive_loop_on_piped_stdin() {
    let sandbox = Sandbox::new();
    sandbox.file("notes.txt", "hello\n");

    treesh_cmd()
        .arg("--no-color")
        .arg("--config")
        .arg(sandbox.config_path())
        .arg("--dir")
        .arg(sandbox.path())
        .write_stdin("read notes.txt\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\n> hello\n").and(predicate::str::contains(" @ ")));
}

#[test]
fn test_color_is_applied_by_default() {
    let sandbox = Sandbox::new();
    treesh_cmd()
        .arg("--config")
        .arg(sandbox.config_path())
        .arg("--dir")
        .arg(sandbox.path())
        .args(["-c", "nonsense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[31mUnknown internal or external command"));
}
