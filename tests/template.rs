// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use gitmsg::services::template::render;

fn vars(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
    pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

#[test]
fn plain_substitution_replaces_all_occurrences() {
    let result = render(
        "{{branch}} and {{branch}} again",
        &vars(&[("branch", "main")]),
    );
    assert_eq!(result, "main and main again");
}

#[test]
fn unknown_tokens_stay_literal() {
    let result = render("keep {{mystery}} as-is", &vars(&[]));
    assert_eq!(result, "keep {{mystery}} as-is");
}

#[test]
fn substituted_values_are_not_rescanned() {
    // A diff legitimately containing template syntax must not expand
    let result = render(
        "{{diff}}",
        &vars(&[("diff", "{{branch}}"), ("branch", "main")]),
    );
    assert_eq!(result, "{{branch}}");
}

#[test]
fn empty_conditional_removes_block_and_markers() {
    let result = render(
        "before {{#if commitlint_rules}}X{{/if}} after",
        &vars(&[("commitlint_rules", "")]),
    );
    assert!(!result.contains('X'));
    assert!(!result.contains("{{#if"));
    assert!(!result.contains("{{/if}}"));
    assert_eq!(result, "before  after");
}

#[test]
fn missing_conditional_variable_removes_block() {
    let result = render("{{#if nothing}}gone{{/if}}kept", &vars(&[]));
    assert_eq!(result, "kept");
}

#[test]
fn truthy_conditional_keeps_inner_and_strips_markers() {
    let result = render(
        "{{#if rules}}use {{rules}}{{/if}}",
        &vars(&[("rules", "r1")]),
    );
    assert_eq!(result, "use r1");
}

#[test]
fn nested_conditionals_resolve_correctly() {
    let template = "{{#if outer}}O{{#if inner}}I{{/if}}o{{/if}}";

    let both = render(template, &vars(&[("outer", "1"), ("inner", "1")]));
    assert_eq!(both, "OIo");

    let outer_only = render(template, &vars(&[("outer", "1"), ("inner", "")]));
    assert_eq!(outer_only, "Oo");

    let neither = render(template, &vars(&[("outer", ""), ("inner", "1")]));
    assert_eq!(neither, "");
}

#[test]
fn sibling_conditionals_are_independent() {
    let template = "{{#if a}}A{{/if}}-{{#if b}}B{{/if}}";
    let result = render(template, &vars(&[("a", "1"), ("b", "")]));
    assert_eq!(result, "A-");
}

#[test]
fn false_outer_drops_nested_content_entirely() {
    let template = "{{#if outer}}{{#if inner}}deep{{/if}}{{/if}}end";
    let result = render(template, &vars(&[("outer", ""), ("inner", "1")]));
    assert_eq!(result, "end");
}

#[test]
fn unbalanced_open_marker_stays_literal() {
    let result = render("text {{#if a}}never closed", &vars(&[("a", "1")]));
    assert_eq!(result, "text {{#if a}}never closed");
}

#[test]
fn boolean_flags_use_truthiness_rule() {
    let template = "{{#if header_only}}single line{{/if}}{{#if allow_body}}with body{{/if}}";

    let header = render(template, &vars(&[("header_only", "1"), ("allow_body", "")]));
    assert_eq!(header, "single line");

    let body = render(template, &vars(&[("header_only", ""), ("allow_body", "1")]));
    assert_eq!(body, "with body");
}

#[test]
fn output_is_trimmed_of_outer_whitespace() {
    let result = render("\n\n  {{x}}  \n", &vars(&[("x", "value")]));
    assert_eq!(result, "value");
}

#[test]
fn deeply_nested_adversarial_template_terminates() {
    let open = "{{#if a}}".repeat(64);
    let close = "{{/if}}".repeat(64);
    let template = format!("{open}core{close}");
    // Must terminate; content survives because `a` is truthy all the way down
    let result = render(&template, &vars(&[("a", "1")]));
    assert!(result.contains("core"));
}
