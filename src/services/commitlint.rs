// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::CommitlintRules;

/// Probed in order; first parseable file wins.
const JSON_CONFIG_FILES: &[&str] = &[".commitlintrc", ".commitlintrc.json"];

/// Recognized but not evaluated: executing JS or parsing YAML is out of
/// reach for this process. Their presence is logged so the skip is visible.
const UNSUPPORTED_CONFIG_FILES: &[&str] = &[
    ".commitlintrc.yaml",
    ".commitlintrc.yml",
    ".commitlintrc.js",
    ".commitlintrc.cjs",
    "commitlint.config.js",
    "commitlint.config.cjs",
];

const CONVENTIONAL_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

/// Discover commitlint rules in the repository root. The result is a prompt
/// hint only; generation output is never validated against it.
pub fn load_rules(root: &Path) -> Option<CommitlintRules> {
    for name in JSON_CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(value) => {
                    debug!(config = %path.display(), "loaded commitlint rules");
                    return Some(extract_rules(&value));
                }
                Err(e) => {
                    warn!(config = %path.display(), error = %e, "unparseable commitlint config, skipping");
                }
            },
            Err(e) => {
                warn!(config = %path.display(), error = %e, "unreadable commitlint config, skipping");
            }
        }
    }

    for name in UNSUPPORTED_CONFIG_FILES {
        if root.join(name).exists() {
            debug!(config = name, "script/yaml commitlint configs are not evaluated, skipping");
        }
    }

    let package_json = root.join("package.json");
    if let Ok(content) = std::fs::read_to_string(&package_json)
        && let Ok(value) = serde_json::from_str::<Value>(&content)
        && let Some(commitlint) = value.get("commitlint")
    {
        debug!(config = %package_json.display(), "loaded commitlint rules from package.json");
        return Some(extract_rules(commitlint));
    }

    None
}

/// Pull the generation-relevant subset out of a commitlint config object.
pub fn extract_rules(config: &Value) -> CommitlintRules {
    let mut rules = CommitlintRules::default();

    // `extends` naming a conventional preset implies the standard type set.
    let mentions_conventional = match config.get("extends") {
        Some(Value::String(s)) => s.contains("conventional"),
        Some(Value::Array(items)) => items
            .iter()
            .any(|v| v.as_str().is_some_and(|s| s.contains("conventional"))),
        _ => false,
    };
    if mentions_conventional {
        rules.types = Some(CONVENTIONAL_TYPES.iter().map(|s| s.to_string()).collect());
    }

    if let Some(table) = config.get("rules") {
        if let Some(types) = enum_rule(table, "type-enum") {
            rules.types = Some(types);
        }
        if let Some(scopes) = enum_rule(table, "scope-enum") {
            rules.scopes = Some(scopes);
        }
        if let Some(n) = length_rule(table, "header-max-length") {
            rules.max_header_length = Some(n);
        }
        if let Some(n) = length_rule(table, "body-max-line-length") {
            rules.body_max_line_length = Some(n);
        }
    }

    rules
}

/// Commitlint rules are `[level, applicability, value]` triples.
fn rule_value<'a>(table: &'a Value, name: &str) -> Option<&'a Value> {
    table.get(name)?.as_array()?.get(2)
}

fn enum_rule(table: &Value, name: &str) -> Option<Vec<String>> {
    let values: Vec<String> = rule_value(table, name)?
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    if values.is_empty() { None } else { Some(values) }
}

fn length_rule(table: &Value, name: &str) -> Option<u32> {
    rule_value(table, name)?.as_u64().map(|n| n as u32)
}
