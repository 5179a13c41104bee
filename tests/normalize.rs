// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use gitmsg::domain::OutputStyle;
use gitmsg::services::normalize::normalize;
use proptest::prelude::*;

const HEADER: OutputStyle = OutputStyle::HeaderOnly;
const FULL: OutputStyle = OutputStyle::HeaderAndBody;

// ─── Label and quote stripping ────────────────────────────────────────────────

#[test]
fn strips_commit_message_label_header_only() {
    let raw = "Commit message: feat(api): add x\n\nDetails here\n";
    assert_eq!(normalize(raw, HEADER), "feat(api): add x");
}

#[test]
fn strips_bare_message_label() {
    let raw = "message: fix(core): handle empty input";
    insta::assert_snapshot!(normalize(raw, FULL), @"fix(core): handle empty input");
}

#[test]
fn strips_wrapping_quotes() {
    let raw = "\"feat(cli): add --dry-run flag\"";
    insta::assert_snapshot!(normalize(raw, FULL), @"feat(cli): add --dry-run flag");
}

#[test]
fn strips_wrapping_backticks() {
    let raw = "`fix: handle missing remote`";
    assert_eq!(normalize(raw, FULL), "fix: handle missing remote");
}

// ─── Code fences ──────────────────────────────────────────────────────────────

#[test]
fn well_formed_fence_keeps_inner_lines() {
    let raw = "```\nfeat(llm): stream tokens\n\nAdds SSE decoding.\n```";
    let result = normalize(raw, FULL);
    assert_eq!(result, "feat(llm): stream tokens\n\nAdds SSE decoding.");
}

#[test]
fn fence_with_language_tag_keeps_inner_lines() {
    let raw = "```text\nfix(git): quote paths\n```";
    assert_eq!(normalize(raw, FULL), "fix(git): quote paths");
}

#[test]
fn single_line_fence_is_dropped() {
    let raw = "```noise``` fix: real message";
    assert_eq!(normalize(raw, FULL), "fix: real message");
}

// ─── Line endings and blank runs ──────────────────────────────────────────────

#[test]
fn crlf_is_canonicalized() {
    let raw = "feat: subject\r\n\r\nbody line\r\n";
    assert_eq!(normalize(raw, FULL), "feat: subject\n\nbody line");
}

#[test]
fn blank_runs_collapse_to_one_blank_line() {
    let raw = "feat: subject\n\n\n\n\nbody";
    assert_eq!(normalize(raw, FULL), "feat: subject\n\nbody");
}

// ─── Header-only mode ─────────────────────────────────────────────────────────

#[test]
fn header_only_takes_first_non_blank_line() {
    let raw = "\n\n  feat: the header  \nbody text\nmore";
    assert_eq!(normalize(raw, HEADER), "feat: the header");
}

#[test]
fn header_only_of_empty_input_is_empty() {
    assert_eq!(normalize("", HEADER), "");
    assert_eq!(normalize("   \n \n", HEADER), "");
}

#[test]
fn header_only_is_idempotent_on_fixed_input() {
    let raw = "Commit message: feat(api): add x\n\nDetails here\n";
    let once = normalize(raw, HEADER);
    assert_eq!(normalize(&once, HEADER), once);
}

// ─── Properties ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn header_only_never_contains_newline(raw in ".{0,500}") {
        let result = normalize(&raw, HEADER);
        prop_assert!(!result.contains('\n'));
    }

    #[test]
    fn header_only_is_idempotent(raw in "[ -~\n]{0,300}") {
        let once = normalize(&raw, HEADER);
        let twice = normalize(&once, HEADER);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn never_panics(raw in ".*") {
        let _ = normalize(&raw, HEADER);
        let _ = normalize(&raw, FULL);
    }
}
