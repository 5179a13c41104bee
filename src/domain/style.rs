// SPDX-FileCopyrightText: 2026 gitmsg contributors
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Output shape for generated messages. Read once per generation attempt;
/// selects both the template branch and the post-stream stop policy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputStyle {
    /// Single subject line only. Enables the early-stop optimization.
    HeaderOnly,
    /// Subject line plus an optional body.
    #[default]
    HeaderAndBody,
}

impl OutputStyle {
    pub fn header_only(&self) -> bool {
        matches!(self, Self::HeaderOnly)
    }
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeaderOnly => write!(f, "header-only"),
            Self::HeaderAndBody => write!(f, "header-and-body"),
        }
    }
}
