// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use std::path::Path;
use std::process::Command;

use gitmsg::domain::DiffSource;
use gitmsg::error::Error;
use gitmsg::services::git::GitService;

fn run_git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git must be runnable in tests");
    assert!(status.success(), "git {args:?} failed");
}

fn init_repo(dir: &Path) {
    run_git(dir, &["init", "--quiet"]);
    run_git(dir, &["config", "user.email", "test@example.com"]);
    run_git(dir, &["config", "user.name", "Test"]);
}

#[test]
fn staged_context_reports_files_in_git_order() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    std::fs::write(dir.path().join("alpha.txt"), "first\n").unwrap();
    std::fs::write(dir.path().join("beta.txt"), "second\n").unwrap();
    run_git(dir.path(), &["add", "alpha.txt", "beta.txt"]);

    let git = GitService::at(dir.path().to_path_buf());
    let context = git.collect_context(DiffSource::Staged).unwrap();

    assert_eq!(context.files, vec!["alpha.txt", "beta.txt"]);
    assert!(context.diff.contains("diff --git a/alpha.txt b/alpha.txt"));
    assert!(context.diff.contains("+first"));
    assert_eq!(context.source, DiffSource::Staged);
    assert!(!context.branch.is_empty());
}

#[test]
fn no_staged_changes_is_a_typed_error() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());

    let git = GitService::at(dir.path().to_path_buf());
    let result = git.collect_context(DiffSource::Staged);
    assert!(matches!(result, Err(Error::NoStagedChanges)));
}

#[test]
fn unstaged_source_sees_working_tree_edits() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    std::fs::write(dir.path().join("file.txt"), "v1\n").unwrap();
    run_git(dir.path(), &["add", "file.txt"]);
    run_git(dir.path(), &["commit", "--quiet", "-m", "chore: seed"]);

    std::fs::write(dir.path().join("file.txt"), "v2\n").unwrap();

    let git = GitService::at(dir.path().to_path_buf());
    let context = git.collect_context(DiffSource::Unstaged).unwrap();

    assert_eq!(context.files, vec!["file.txt"]);
    assert!(context.diff.contains("-v1"));
    assert!(context.diff.contains("+v2"));
    assert_eq!(context.source, DiffSource::Unstaged);
}

#[test]
fn commit_records_the_generated_message() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    std::fs::write(dir.path().join("file.txt"), "content\n").unwrap();
    run_git(dir.path(), &["add", "file.txt"]);

    let git = GitService::at(dir.path().to_path_buf());
    git.commit("feat: add file").unwrap();

    let log = Command::new("git")
        .args(["log", "-1", "--pretty=%s"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&log.stdout).trim(), "feat: add file");
}
