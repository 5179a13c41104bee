// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use assert_cmd::Command;
use predicates::prelude::*;

fn gitmsg() -> Command {
    Command::cargo_bin("gitmsg").unwrap()
}

#[test]
fn help_lists_the_surface() {
    gitmsg()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--header-only"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn completions_emit_a_script() {
    gitmsg()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitmsg"));
}

#[test]
fn config_subcommand_prints_effective_values() {
    gitmsg()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Provider:"))
        .stdout(predicate::str::contains("Style:"));
}

#[test]
fn outside_a_repository_fails_with_guidance() {
    let dir = tempfile::tempdir().unwrap();
    gitmsg()
        .current_dir(dir.path())
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a git repository"));
}

#[test]
fn unknown_provider_is_rejected_at_startup() {
    gitmsg()
        .args(["--provider", "yolo", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider"));
}
