// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::domain::{CommitlintRules, OutputStyle, PromptContext, format_rules_for_prompt};
use crate::services::heuristics::{infer_scope, infer_type};
use crate::services::template;
use crate::services::trim::trim_diff;

pub const DEFAULT_PROMPT: &str = r#"You are a professional Git commit message generator.

## Code Changes
```diff
{{diff}}
```

## Changed Files
{{files}}

## Current Branch
{{branch}}

{{#if commitlint_rules}}
## Project Commit Rules
{{commitlint_rules}}
{{/if}}

{{#if suggested_type}}
## Hints
Likely type: {{suggested_type}}{{#if suggested_scope}}, likely scope: {{suggested_scope}}{{/if}}
Prefer these unless the diff clearly says otherwise.
{{/if}}

## Task
Generate a commit message based on the changes above.

Requirements:
- Use Conventional Commits format: <type>[optional scope]: <description>
- Available types: feat, fix, docs, style, refactor, perf, test, build, ci, chore
- Write the description in {{language}}
- Be concise and clear
- Focus on WHAT changed and WHY, not HOW
{{#if header_only}}
- Output a single line only, with no body
{{/if}}
{{#if allow_body}}
- Add a body with details if the change is complex
{{/if}}

Output ONLY the commit message, no explanations."#;

const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("zh-CN", "简体中文 (Simplified Chinese)"),
    ("zh-TW", "繁體中文 (Traditional Chinese)"),
    ("ja", "日本語 (Japanese)"),
    ("ko", "한국어 (Korean)"),
];

pub fn language_display_name(tag: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, name)| *name)
        .unwrap_or(tag)
}

#[derive(Debug, Clone, Copy)]
pub struct PromptOptions<'a> {
    /// Custom template; falls back to [`DEFAULT_PROMPT`] when None or blank.
    pub template: Option<&'a str>,
    pub language: &'a str,
    pub max_diff_chars: usize,
    pub style: OutputStyle,
}

#[derive(Debug)]
pub struct BuiltPrompt {
    pub text: String,
    pub diff_trimmed: bool,
    pub suggested_type: String,
    pub suggested_scope: String,
}

/// Assemble the final prompt string from a context, optional commitlint
/// rules, and rendering options. The diff variable is always the trimmed
/// text, never the raw one.
pub fn build_prompt(
    context: &PromptContext,
    rules: Option<&CommitlintRules>,
    opts: &PromptOptions<'_>,
) -> BuiltPrompt {
    let template = opts
        .template
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_PROMPT);

    let trimmed = trim_diff(&context.diff, opts.max_diff_chars);
    let rules_text = format_rules_for_prompt(rules);

    let allowed_types = rules.and_then(|r| r.types.as_deref());
    let allowed_scopes = rules.and_then(|r| r.scopes.as_deref());
    let suggested_type = infer_type(&context.files, allowed_types);
    let suggested_scope = infer_scope(&context.files, allowed_scopes);

    let header_only = opts.style.header_only();
    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("diff", trimmed.text);
    vars.insert("files", context.files.join("\n"));
    vars.insert("branch", context.branch.clone());
    vars.insert(
        "language",
        language_display_name(opts.language).to_string(),
    );
    vars.insert("commitlint_rules", rules_text);
    vars.insert("suggested_type", suggested_type.clone());
    vars.insert("suggested_scope", suggested_scope.clone());
    vars.insert("header_only", flag(header_only));
    vars.insert("allow_body", flag(!header_only));

    BuiltPrompt {
        text: template::render(template, &vars),
        diff_trimmed: trimmed.trimmed,
        suggested_type,
        suggested_scope,
    }
}

/// Boolean template flags share the non-empty-string truthiness rule.
fn flag(on: bool) -> String {
    if on { "1".to_string() } else { String::new() }
}
