//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("phrasebook").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("check-db"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("phrasebook").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--session-key"))
        .stdout(predicate::str::contains("--db-host"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("phrasebook").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_session_key_value_is_hidden() {
    let mut cmd = Command::cargo_bin("phrasebook").unwrap();
    cmd.env("PHRASEBOOK_SESSION_KEY", "c3VwZXItc2VjcmV0LXZhbHVl")
        .arg("serve")
        .arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("c3VwZXItc2VjcmV0LXZhbHVl").not());
}

#[test]
fn test_unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("phrasebook").unwrap();
    cmd.arg("frobnicate");

    cmd.assert().failure();
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("phrasebook").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("phrasebook"));
}
