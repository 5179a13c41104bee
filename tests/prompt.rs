// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use gitmsg::domain::{CommitlintRules, DiffSource, OutputStyle, PromptContext};
use gitmsg::services::prompt::{DEFAULT_PROMPT, PromptOptions, build_prompt, language_display_name};

fn context(diff: &str, files: &[&str]) -> PromptContext {
    PromptContext {
        diff: diff.to_string(),
        files: files.iter().map(|s| s.to_string()).collect(),
        branch: "feature/streaming".to_string(),
        source: DiffSource::Staged,
    }
}

fn options(style: OutputStyle) -> PromptOptions<'static> {
    PromptOptions {
        template: None,
        language: "en",
        max_diff_chars: 4_000,
        style,
    }
}

#[test]
fn default_prompt_substitutes_context() {
    let ctx = context("+fn main() {}", &["src/main.rs", "src/lib.rs"]);
    let built = build_prompt(&ctx, None, &options(OutputStyle::HeaderAndBody));

    assert!(built.text.contains("+fn main() {}"));
    assert!(built.text.contains("src/main.rs\nsrc/lib.rs"));
    assert!(built.text.contains("feature/streaming"));
    assert!(built.text.contains("English"));
    assert!(!built.text.contains("{{diff}}"));
    assert!(!built.text.contains("{{#if"));
}

#[test]
fn rules_section_collapses_without_rules() {
    let ctx = context("+x", &["src/main.rs"]);
    let built = build_prompt(&ctx, None, &options(OutputStyle::HeaderAndBody));
    assert!(!built.text.contains("Project Commit Rules"));
}

#[test]
fn rules_section_renders_when_present() {
    let rules = CommitlintRules {
        types: Some(vec!["feat".into(), "fix".into()]),
        scopes: None,
        max_header_length: Some(72),
        body_max_line_length: None,
    };
    let ctx = context("+x", &["src/main.rs"]);
    let built = build_prompt(&ctx, Some(&rules), &options(OutputStyle::HeaderAndBody));

    assert!(built.text.contains("Project Commit Rules"));
    assert!(built.text.contains("- Allowed types: feat, fix"));
    assert!(built.text.contains("- Maximum header length: 72 characters"));
}

#[test]
fn style_selects_the_matching_template_branch() {
    let ctx = context("+x", &["src/main.rs"]);

    let header = build_prompt(&ctx, None, &options(OutputStyle::HeaderOnly));
    assert!(header.text.contains("Output a single line only"));
    assert!(!header.text.contains("Add a body"));

    let full = build_prompt(&ctx, None, &options(OutputStyle::HeaderAndBody));
    assert!(full.text.contains("Add a body"));
    assert!(!full.text.contains("Output a single line only"));
}

#[test]
fn heuristic_hints_flow_into_the_prompt() {
    let ctx = context("+x", &["src/auth/login.rs", "src/auth/token.rs"]);
    let built = build_prompt(&ctx, None, &options(OutputStyle::HeaderAndBody));

    assert_eq!(built.suggested_type, "feat");
    assert_eq!(built.suggested_scope, "auth");
    assert!(built.text.contains("Likely type: feat, likely scope: auth"));
}

#[test]
fn ambiguous_scope_hint_is_omitted() {
    let ctx = context("+x", &["src/a/x.rs", "src/b/y.rs"]);
    let built = build_prompt(&ctx, None, &options(OutputStyle::HeaderAndBody));

    assert_eq!(built.suggested_scope, "");
    assert!(built.text.contains("Likely type: feat"));
    assert!(!built.text.contains("likely scope:"));
}

#[test]
fn oversized_diff_is_trimmed_into_the_prompt() {
    let big_diff = format!(
        "diff --git a/a.rs b/a.rs\n@@ -1 +1 @@\n{}",
        "+very long line of changed code\n".repeat(500)
    );
    let ctx = context(&big_diff, &["a.rs"]);
    let mut opts = options(OutputStyle::HeaderAndBody);
    opts.max_diff_chars = 500;

    let built = build_prompt(&ctx, None, &opts);
    assert!(built.diff_trimmed);
    assert!(!built.text.contains(&big_diff));
}

#[test]
fn custom_template_replaces_default() {
    let ctx = context("+x", &["src/main.rs"]);
    let mut opts = options(OutputStyle::HeaderAndBody);
    opts.template = Some("Branch is {{branch}}, nothing else.");

    let built = build_prompt(&ctx, None, &opts);
    assert_eq!(built.text, "Branch is feature/streaming, nothing else.");
}

#[test]
fn blank_custom_template_falls_back_to_default() {
    let ctx = context("+x", &["src/main.rs"]);
    let mut opts = options(OutputStyle::HeaderAndBody);
    opts.template = Some("   ");

    let built = build_prompt(&ctx, None, &opts);
    assert!(built.text.contains("Conventional Commits"));
}

#[test]
fn language_names_resolve_with_fallback() {
    assert_eq!(language_display_name("en"), "English");
    assert_eq!(language_display_name("ja"), "日本語 (Japanese)");
    assert_eq!(language_display_name("fr"), "fr");
}

#[test]
fn default_template_mentions_output_discipline() {
    assert!(DEFAULT_PROMPT.contains("Output ONLY the commit message"));
}
