// SPDX-FileCopyrightText: 2026 gitmsg contributors
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{DiffSource, PromptContext};
use crate::error::{Error, Result};

pub struct GitService {
    work_dir: PathBuf,
}

impl GitService {
    pub fn discover() -> Result<Self> {
        let repo = gix::discover(".").map_err(|_| Error::NotAGitRepo)?;

        let work_dir = repo
            .work_dir()
            .ok_or_else(|| Error::Git("Bare repository not supported".into()))?
            .to_path_buf();

        Ok(Self { work_dir })
    }

    /// For tests and callers that already know the repository root.
    pub fn at(work_dir: PathBuf) -> Self {
        Self { work_dir }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Diff, file list (in git's report order), and branch for one attempt.
    pub fn collect_context(&self, source: DiffSource) -> Result<PromptContext> {
        let files = self.changed_files(source)?;
        if files.is_empty() {
            return Err(Error::NoStagedChanges);
        }

        let diff = self.diff(source)?;
        let branch = self.branch();
        debug!(files = files.len(), branch = %branch, source = %source, "collected change set");

        Ok(PromptContext {
            diff,
            files,
            branch,
            source,
        })
    }

    pub fn diff(&self, source: DiffSource) -> Result<String> {
        // --no-ext-diff: never route through external diff tools
        match source {
            DiffSource::Staged => self.run(&["diff", "--cached", "--no-ext-diff"]),
            DiffSource::Unstaged => self.run(&["diff", "--no-ext-diff"]),
        }
    }

    pub fn changed_files(&self, source: DiffSource) -> Result<Vec<String>> {
        let output = match source {
            DiffSource::Staged => self.run(&["diff", "--cached", "--name-only"])?,
            DiffSource::Unstaged => self.run(&["diff", "--name-only"])?,
        };

        Ok(output
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn branch(&self) -> String {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).map(|_| ())
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = std::process::Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
