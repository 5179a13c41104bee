// SPDX-FileCopyrightText: 2026 gitmsg contributors
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Commitlint rules relevant to message generation. A read-only hint for the
/// prompt; never enforced on the generated output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitlintRules {
    pub types: Option<Vec<String>>,
    pub scopes: Option<Vec<String>>,
    pub max_header_length: Option<u32>,
    pub body_max_line_length: Option<u32>,
}

impl CommitlintRules {
    pub fn is_empty(&self) -> bool {
        self.types.is_none()
            && self.scopes.is_none()
            && self.max_header_length.is_none()
            && self.body_max_line_length.is_none()
    }
}

/// Render rules as prompt-ready bullet lines. Empty string when there is
/// nothing to say, which collapses the template's conditional section.
pub fn format_rules_for_prompt(rules: Option<&CommitlintRules>) -> String {
    let Some(rules) = rules else {
        return String::new();
    };

    let mut lines = Vec::new();

    if let Some(types) = &rules.types
        && !types.is_empty()
    {
        lines.push(format!("- Allowed types: {}", types.join(", ")));
    }

    if let Some(scopes) = &rules.scopes
        && !scopes.is_empty()
    {
        lines.push(format!("- Allowed scopes: {}", scopes.join(", ")));
    }

    if let Some(max) = rules.max_header_length {
        lines.push(format!("- Maximum header length: {max} characters"));
    }

    if let Some(max) = rules.body_max_line_length {
        lines.push(format!("- Maximum body line length: {max} characters"));
    }

    lines.join("\n")
}
