//! Integration tests for the HDIFF CLI tool.
//!
//! These tests verify the complete end-to-end behavior of the CLI,
//! including argument parsing, file processing, and output formatting.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a Command for the hdiff-rs binary
fn hdiff() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("hdiff-rs"))
}

#[test]
fn test_identical_files_exit_0() {
    hdiff()
        .arg("tests/fixtures/identical_1.html")
        .arg("tests/fixtures/identical_2.html")
        .assert()
        .success()
        .code(0)
        .stdout(predicate::str::contains("No changes"));
}

#[test]
fn test_different_files_exit_1() {
    hdiff()
        .arg("tests/fixtures/table_old.html")
        .arg("tests/fixtures/table_new.html")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("@class"));
}

#[test]
fn test_file_not_found_exit_2() {
    hdiff()
        .arg("tests/fixtures/nonexistent.html")
        .arg("tests/fixtures/identical_1.html")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_table_changes_plain() {
    hdiff()
        .arg("tests/fixtures/table_old.html")
        .arg("tests/fixtures/table_new.html")
        .arg("--format=plain")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("• 0 @class: \"old\" → \"new\""))
        .stdout(predicate::str::contains("<td> → <th>"))
        .stdout(predicate::str::contains("{+H+}ello W"))
        .stdout(predicate::str::contains("Summary"));
}

#[test]
fn test_added_subtree() {
    hdiff()
        .arg("tests/fixtures/added_old.html")
        .arg("tests/fixtures/added_new.html")
        .arg("--format=plain")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("+ 0/1: <li class=\"fresh\"><em>second</em></li>"))
        .stdout(predicate::str::contains("1 added"));
}

#[test]
fn test_plain_text_files() {
    hdiff()
        .arg("tests/fixtures/note_old.txt")
        .arg("tests/fixtures/note_new.txt")
        .arg("--format=plain")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("~ (text):"))
        .stdout(predicate::str::contains("1 text"));
}

#[test]
fn test_json_output_format() {
    hdiff()
        .arg("tests/fixtures/table_old.html")
        .arg("tests/fixtures/table_new.html")
        .arg("--format=json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"differences\""))
        .stdout(predicate::str::contains("\"stats\""))
        .stdout(predicate::str::contains("\"attributeChanged\""));
}

#[test]
fn test_preview_output_format() {
    hdiff()
        .arg("tests/fixtures/table_old.html")
        .arg("tests/fixtures/table_new.html")
        .arg("--format=preview")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("<div class=\"diff-preview\">"))
        .stdout(predicate::str::contains("<ins class=\"diff-inserted\">H</ins>"))
        .stdout(predicate::str::contains("data-diff=\"changed\""));
}

#[test]
fn test_preview_unchanged_is_verbatim() {
    hdiff()
        .arg("tests/fixtures/identical_1.html")
        .arg("tests/fixtures/identical_2.html")
        .arg("--format=preview")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("<ul class=\"menu\">\n  <li>"))
        .stdout(predicate::str::contains("diff-inserted").not());
}

#[test]
fn test_preview_invalid_container_tag() {
    hdiff()
        .arg("tests/fixtures/table_old.html")
        .arg("tests/fixtures/table_new.html")
        .arg("--format=preview")
        .arg("--container-tag=not a tag")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_keep_whitespace_flag() {
    hdiff()
        .arg("tests/fixtures/identical_1.html")
        .arg("tests/fixtures/identical_2.html")
        .arg("--keep-whitespace")
        .assert()
        .code(1);
}

#[test]
fn test_forced_text_mode() {
    hdiff()
        .arg("tests/fixtures/table_old.html")
        .arg("tests/fixtures/table_new.html")
        .arg("--mode=text")
        .arg("--format=plain")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("(text)"))
        .stdout(predicate::str::contains("@class").not());
}

#[test]
fn test_verbose_flag() {
    hdiff()
        .arg("tests/fixtures/identical_1.html")
        .arg("tests/fixtures/identical_2.html")
        .arg("--verbose")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("reading old content"))
        .stderr(predicate::str::contains("computing diff"));
}

#[test]
fn test_quiet_flag() {
    hdiff()
        .arg("tests/fixtures/table_old.html")
        .arg("tests/fixtures/table_new.html")
        .arg("--quiet")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Summary").not());
}

#[test]
fn test_help_flag() {
    hdiff()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Structural diff tool"))
        .stdout(predicate::str::contains("OLD"))
        .stdout(predicate::str::contains("NEW"));
}

#[test]
fn test_version_flag() {
    hdiff()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hdiff"));
}

#[test]
fn test_max_value_length() {
    hdiff()
        .arg("tests/fixtures/added_old.html")
        .arg("tests/fixtures/added_new.html")
        .arg("--format=plain")
        .arg("--max-value-length=10")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("<li cla..."));
}

#[test]
fn test_hide_unchanged_text() {
    hdiff()
        .arg("tests/fixtures/table_old.html")
        .arg("tests/fixtures/table_new.html")
        .arg("--format=plain")
        .arg("--show-unchanged-text=false")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("{+H+}..."))
        .stdout(predicate::str::contains("ello W").not());
}
