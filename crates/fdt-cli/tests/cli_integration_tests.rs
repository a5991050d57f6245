//! Integration tests for the `fdt` binary
//!
//! The binary bundles the suites under `demos/`; every command runs from
//! the crate directory so the demo paths resolve.

use assert_cmd::Command;
use predicates::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn fdt() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fdt");
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("NO_COLOR", "1")
        .env_remove("FDT_LOG");
    cmd
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_help() {
    fdt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fdt [OPTIONS] [TEST_FILE]..."))
        .stdout(predicate::str::contains("--fail-fast"));
}

#[test]
fn test_version() {
    fdt()
        .arg("-V")
        .assert()
        .success()
        .stdout(format!("fdt v{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_option() {
    fdt()
        .args(["--bogus", "demos/passing_test.rs"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr("fdt: --bogus: invalid option\n");
}

#[test]
fn test_fail_fast_not_a_number() {
    fdt()
        .args(["--fail-fast=soon", "demos/passing_test.rs"])
        .assert()
        .code(2)
        .stderr("fdt: --fail-fast: expected a number, got \"soon\"\n");
}

#[test]
fn test_invalid_filter_pattern() {
    fdt()
        .args(["--filter", "/(unclosed/", "demos/passing_test.rs"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("fdt: --filter: invalid filter pattern"));
}

// ============================================================================
// Runs
// ============================================================================

#[test]
fn test_no_files() {
    fdt()
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "test result: ok. 0 passed; 0 failed; 0 ignored; 0 filtered out",
        ))
        .stderr(predicate::str::contains(
            "fdt: no test files specified. Do you need --help?",
        ));
}

#[test]
fn test_passing_module() {
    fdt()
        .arg("demos/passing_test.rs")
        .assert()
        .success()
        .stdout(predicate::str::contains("running 6 tests from file://"))
        .stdout(predicate::str::contains("test name and body ... ok"))
        .stdout(predicate::str::contains("test adds_numbers ... ok"))
        .stdout(predicate::str::contains("test not yet ... ignored"))
        .stdout(predicate::str::contains("test waits_for_timer ... ok"))
        .stdout(predicate::str::contains(
            "test result: ok. 5 passed; 0 failed; 1 ignored; 0 filtered out",
        ));
}

#[test]
fn test_failing_module() {
    fdt()
        .arg("demos/failing_test.rs")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("test returns an error ... FAILED"))
        .stdout(predicate::str::contains("test runs after exit ... ok"))
        .stdout(predicate::str::contains(
            "Test case attempted to exit with exit code: 3",
        ))
        .stdout(predicate::str::contains("test panicked: "))
        .stdout(predicate::str::contains("math is off"))
        .stdout(predicate::str::contains(
            "test result: FAILED. 2 passed; 3 failed; 0 ignored; 0 filtered out",
        ));
}

#[test]
fn test_fail_fast_stops_run() {
    fdt()
        .args(["demos/failing_test.rs", "demos/passing_test.rs", "--fail-fast"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("test exits the process").not())
        .stdout(predicate::str::contains("passing_test.rs").not())
        .stdout(predicate::str::contains(
            "test result: FAILED. 1 passed; 1 failed; 0 ignored; 0 filtered out",
        ));
}

#[test]
fn test_fail_fast_limit() {
    fdt()
        .args(["--fail-fast=2", "demos/failing_test.rs"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("test runs after exit").not())
        .stdout(predicate::str::contains(
            "test result: FAILED. 1 passed; 2 failed; 0 ignored; 0 filtered out",
        ));
}

#[test]
fn test_filter_substring() {
    fdt()
        .args(["--filter", "body", "demos/passing_test.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("running 2 tests from"))
        .stdout(predicate::str::contains(
            "test result: ok. 2 passed; 0 failed; 0 ignored; 4 filtered out",
        ));
}

#[test]
fn test_filter_pattern() {
    fdt()
        .args(["--filter=/^(adds|waits)_/", "demos/passing_test.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "test result: ok. 2 passed; 0 failed; 0 ignored; 4 filtered out",
        ));
}

#[test]
fn test_filter_lone_slash_selects_everything() {
    fdt()
        .args(["--filter", "/", "demos/passing_test.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "test result: ok. 5 passed; 0 failed; 1 ignored; 0 filtered out",
        ));
}

#[test]
fn test_only_fails_run() {
    fdt()
        .arg("demos/only_test.rs")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("test focused ... ok"))
        .stdout(predicate::str::contains("skipped by only").not())
        .stdout(predicate::str::contains(
            "test result: FAILED. 1 passed; 0 failed; 0 ignored; 1 filtered out",
        ))
        .stdout(predicate::str::contains(
            "error: Test failed because the \"only\" option was used",
        ));
}

#[test]
fn test_registration_error_aborts() {
    fdt()
        .args(["demos/broken_test.rs", "demos/passing_test.rs"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("running").not())
        .stderr(predicate::str::contains("error evaluating module"))
        .stderr(predicate::str::contains("The test name can't be empty"));
}

#[test]
fn test_unknown_module() {
    fdt()
        .arg("demos/missing_test.rs")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("module not found: file://"))
        .stderr(predicate::str::contains("missing_test.rs"));
}

#[test]
fn test_no_color_output_is_plain() {
    fdt()
        .arg("demos/only_test.rs")
        .assert()
        .stdout(predicate::str::contains("\u{1b}[").not());
}
