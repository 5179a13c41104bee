// SPDX-FileCopyrightText: 2026 gitmsg contributors
// SPDX-License-Identifier: MIT

/// Where the diff was read from. Logged per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSource {
    Staged,
    Unstaged,
}

impl std::fmt::Display for DiffSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Staged => write!(f, "staged"),
            Self::Unstaged => write!(f, "unstaged"),
        }
    }
}

/// Immutable input to one prompt build. `files` keeps the order git reported.
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub diff: String,
    pub files: Vec<String>,
    pub branch: String,
    pub source: DiffSource,
}
