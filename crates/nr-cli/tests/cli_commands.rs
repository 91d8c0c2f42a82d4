//! Integration tests for the `nr-cli` binary commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn nachtrat() -> Command {
    Command::cargo_bin("nachtrat").unwrap()
}

// ---------------------------------------------------------------------------
// roles
// ---------------------------------------------------------------------------

#[test]
fn roles_prints_the_distribution_table() {
    nachtrat()
        .args(["roles", "7"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Wolf")
                .and(predicate::str::contains("Guardian"))
                .and(predicate::str::contains("7 players, 7 roles dealt")),
        );
}

#[test]
fn roles_rejects_bad_counts() {
    nachtrat()
        .args(["roles", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("4 to 12 players"));

    nachtrat()
        .args(["roles", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("4 to 12 players"));
}

// ---------------------------------------------------------------------------
// demo
// ---------------------------------------------------------------------------

#[test]
fn demo_runs_a_full_match() {
    nachtrat()
        .args(["demo", "--seed", "42", "--players", "7"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Dealing")
                .and(predicate::str::contains("--- Night 1 ---"))
                .and(predicate::str::contains("The device makes its rounds"))
                .and(predicate::str::contains("win")),
        );
}

#[test]
fn demo_is_deterministic_for_a_seed() {
    let first = nachtrat()
        .args(["demo", "--seed", "7", "--players", "5"])
        .output()
        .unwrap();
    let second = nachtrat()
        .args(["demo", "--seed", "7", "--players", "5"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn demo_rejects_bad_counts() {
    nachtrat()
        .args(["demo", "--players", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("4 to 12 players"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_seats_players_and_quits_on_eof() {
    nachtrat()
        .args(["play", "--seed", "1", "--players", "Ada,Ben,Cleo,Dora"])
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Starting")
                .and(predicate::str::contains("Ada takes a seat"))
                .and(predicate::str::contains("Phase: Setup"))
                .and(predicate::str::contains("Good night.")),
        );
}

#[test]
fn play_runs_a_scripted_setup_from_a_file() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "add Ada").unwrap();
    writeln!(script, "add Ben").unwrap();
    writeln!(script, "add Cleo").unwrap();
    writeln!(script, "add Dora").unwrap();
    writeln!(script, "begin").unwrap();
    writeln!(script, "events").unwrap();
    writeln!(script, "quit").unwrap();

    let input = fs::read_to_string(script.path()).unwrap();
    nachtrat()
        .args(["play", "--seed", "3"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Tonight's deal")
                .and(predicate::str::contains("Roles have been dealt in secret")),
        );
}

#[test]
fn play_reports_bad_modes() {
    nachtrat()
        .args(["play", "--mode", "operatic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown narrator mode"));
}

#[test]
fn play_surfaces_session_errors_gently() {
    nachtrat()
        .args(["play", "--seed", "1"])
        .write_stdin("dance\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown command: dance"));
}
