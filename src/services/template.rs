// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Nesting limit for conditional blocks. Deeper templates stop resolving
/// instead of recursing further, which bounds work on adversarial input.
const MAX_DEPTH: usize = 16;

const IF_OPEN: &str = "{{#if ";
const IF_CLOSE: &str = "{{/if}}";

static VAR_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([a-z_]+)\}\}").unwrap());

/// Render a template against a variable map.
///
/// `{{#if name}}...{{/if}}` blocks are kept (markers stripped) iff the
/// variable is a non-empty string, with correct handling of nested blocks.
/// Remaining `{{name}}` tokens are substituted in a single pass, so variable
/// values are never re-scanned for tokens. Unknown tokens stay literal.
/// The result is trimmed of outer whitespace.
pub fn render(template: &str, vars: &HashMap<&str, String>) -> String {
    let resolved = resolve_conditionals(template, vars, MAX_DEPTH);

    let substituted = VAR_TOKEN.replace_all(&resolved, |caps: &Captures| {
        let name = &caps[1];
        match vars.get(name) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        }
    });

    substituted.trim().to_string()
}

fn is_truthy(vars: &HashMap<&str, String>, name: &str) -> bool {
    vars.get(name).is_some_and(|v| !v.is_empty())
}

fn resolve_conditionals(input: &str, vars: &HashMap<&str, String>, depth: usize) -> String {
    if depth == 0 {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(IF_OPEN) {
        out.push_str(&rest[..start]);

        let after_open = &rest[start + IF_OPEN.len()..];
        let Some(name_end) = after_open.find("}}") else {
            // Malformed open marker: keep it literal.
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after_open[..name_end].trim();
        let body_start = start + IF_OPEN.len() + name_end + 2;

        match find_matching_close(&rest[body_start..]) {
            Some(body_len) => {
                if is_truthy(vars, name) {
                    let body = &rest[body_start..body_start + body_len];
                    out.push_str(&resolve_conditionals(body, vars, depth - 1));
                }
                rest = &rest[body_start + body_len + IF_CLOSE.len()..];
            }
            None => {
                // Unbalanced block: keep everything from the marker literal.
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Offset of the `{{/if}}` belonging to an already-consumed open marker,
/// skipping over nested pairs. None when the template is unbalanced.
fn find_matching_close(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut idx = 0usize;

    loop {
        let open = s[idx..].find(IF_OPEN);
        let close = s[idx..].find(IF_CLOSE)?;

        if let Some(open) = open
            && open < close
        {
            depth += 1;
            idx += open + IF_OPEN.len();
            continue;
        }

        if depth == 0 {
            return Some(idx + close);
        }
        depth -= 1;
        idx += close + IF_CLOSE.len();
    }
}
