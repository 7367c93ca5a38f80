use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bershark"))
}

/// INTEGER 5 followed by OCTET STRING ca fe.
const TWO_RECORDS: &[u8] = &[0x02, 0x01, 0x05, 0x04, 0x02, 0xca, 0xfe];

/// SEQUENCE { INTEGER 5 }.
const NESTED: &[u8] = &[0x30, 0x03, 0x02, 0x01, 0x05];

#[test]
fn tree_is_the_default_format() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("records.ber");
    fs::write(&input, NESTED).expect("write input");

    cmd()
        .arg(&input)
        .assert()
        .success()
        .stdout("[16] {\n  [2] 05\n}\n");
}

#[test]
fn flat_format_selected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("records.ber");
    fs::write(&input, TWO_RECORDS).expect("write input");

    cmd()
        .arg("-f")
        .arg("flat")
        .arg(&input)
        .assert()
        .success()
        .stdout("2|05\n4|cafe\n");
}

#[test]
fn path_format_includes_full_chain() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("records.ber");
    fs::write(&input, NESTED).expect("write input");

    cmd()
        .arg("--format")
        .arg("path")
        .arg(&input)
        .assert()
        .success()
        .stdout("16|BEGIN\n16,2|05\n16|END\n");
}

#[test]
fn invalid_format_is_rejected() {
    cmd()
        .arg("-f")
        .arg("csv")
        .assert()
        .failure()
        .stderr(contains("invalid value"));
}

#[test]
fn reads_stdin_when_no_inputs() {
    cmd()
        .arg("-f")
        .arg("flat")
        .write_stdin(TWO_RECORDS)
        .assert()
        .success()
        .stdout("2|05\n4|cafe\n");
}

#[test]
fn dash_reads_stdin() {
    cmd()
        .arg("-")
        .write_stdin(NESTED)
        .assert()
        .success()
        .stdout("[16] {\n  [2] 05\n}\n");
}

#[test]
fn missing_file_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.ber");

    cmd()
        .arg(missing)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn remaining_inputs_processed_after_a_failure() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.ber");
    let good = temp.path().join("good.ber");
    fs::write(&good, TWO_RECORDS).expect("write input");

    cmd()
        .arg("-f")
        .arg("flat")
        .arg(&missing)
        .arg(&good)
        .assert()
        .failure()
        .stdout("2|05\n4|cafe\n")
        .stderr(contains("input file not found"));
}

#[test]
fn truncated_input_keeps_prior_records() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("truncated.ber");
    // One complete record, then a tag with its length byte missing.
    fs::write(&input, [0x02u8, 0x01, 0x05, 0x30]).expect("write input");

    cmd()
        .arg(&input)
        .assert()
        .failure()
        .stdout("[2] 05\n")
        .stderr(contains("error:").and(contains("truncated")));
}

#[test]
fn summary_reports_record_count() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("records.ber");
    fs::write(&input, TWO_RECORDS).expect("write input");

    cmd()
        .arg(&input)
        .assert()
        .success()
        .stderr(contains("OK: 2 records"));
}

#[test]
fn quiet_suppresses_summary() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("records.ber");
    fs::write(&input, TWO_RECORDS).expect("write input");

    cmd()
        .arg("--quiet")
        .arg(&input)
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn glob_pattern_expands_to_all_matches() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("a.ber"), [0x02u8, 0x01, 0x05]).expect("write input");
    fs::write(temp.path().join("b.ber"), [0x04u8, 0x01, 0xff]).expect("write input");
    let pattern = temp.path().join("*.ber");

    cmd()
        .arg("-f")
        .arg("flat")
        .arg(pattern)
        .assert()
        .success()
        .stdout("2|05\n4|ff\n");
}

#[test]
fn unmatched_pattern_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let pattern = temp.path().join("*.ber");

    cmd()
        .arg(pattern)
        .assert()
        .failure()
        .stderr(contains("no files match").and(contains("hint:")));
}
