// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Top-level directories that carry no scope information themselves; the
/// segment below them is the better candidate.
const IGNORED_ROOTS: &[&str] = &[
    "src", "app", "lib", "packages", "test", "tests", "docs", ".github",
];

const BUILD_FILES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "pnpm-lock.yaml",
    "yarn.lock",
    "tsconfig.json",
    "Cargo.toml",
    "go.mod",
    "pyproject.toml",
    "requirements.txt",
    "poetry.lock",
];

fn is_docs_file(f: &str) -> bool {
    f == "README.md"
        || f.ends_with(".md")
        || f.starts_with("docs/")
        || f.starts_with("doc/")
        || f.starts_with("documentation/")
        || f == "CHANGELOG.md"
        || f == "LICENSE"
}

fn is_test_file(f: &str) -> bool {
    let name = f.rsplit('/').next().unwrap_or(f);
    f.starts_with("test/")
        || f.starts_with("tests/")
        || f.contains("__tests__/")
        || name.contains(".test.")
        || name.contains(".spec.")
        || f.ends_with(".snap")
}

fn is_ci_file(f: &str) -> bool {
    f.starts_with(".github/workflows/") || f.starts_with(".github/actions/") || f.starts_with("ci/")
}

fn is_build_file(f: &str) -> bool {
    BUILD_FILES.contains(&f) || f.ends_with(".gradle")
}

/// Guess a conventional-commit type from the changed file list.
///
/// Any CI file wins, then any build file; docs/test only apply when every
/// file matches; everything else defaults to `feat`. When an allowed-type
/// set is supplied and excludes the guess, fall back to `chore` if allowed,
/// else the first allowed entry.
pub fn infer_type(files: &[String], allowed_types: Option<&[String]>) -> String {
    let normalized: Vec<String> = files.iter().map(|f| f.replace('\\', "/")).collect();

    let any_ci = normalized.iter().any(|f| is_ci_file(f));
    let any_build = normalized.iter().any(|f| is_build_file(f));
    let all_docs = !normalized.is_empty() && normalized.iter().all(|f| is_docs_file(f));
    let all_tests = !normalized.is_empty() && normalized.iter().all(|f| is_test_file(f));

    let inferred = if any_ci {
        "ci"
    } else if any_build {
        "build"
    } else if all_docs {
        "docs"
    } else if all_tests {
        "test"
    } else {
        "feat"
    };

    if let Some(allowed) = allowed_types
        && !allowed.is_empty()
    {
        if allowed.iter().any(|t| t == inferred) {
            return inferred.to_string();
        }
        if allowed.iter().any(|t| t == "chore") {
            return "chore".to_string();
        }
        return allowed[0].clone();
    }

    inferred.to_string()
}

/// Guess a scope from the dominant path segment of the changed files.
///
/// A tie between the top two candidates returns the empty string: no scope
/// is safer than a wrong guess.
pub fn infer_scope(files: &[String], allowed_scopes: Option<&[String]>) -> String {
    let mut candidates: Vec<String> = Vec::new();

    for file in files {
        let normalized = file.replace('\\', "/");
        let parts: Vec<&str> = normalized.split('/').filter(|p| !p.is_empty()).collect();
        let Some(&first) = parts.first() else {
            continue;
        };

        if first == "packages" && parts.len() >= 2 {
            candidates.push(parts[1].to_string());
            continue;
        }

        if parts.len() >= 2 && IGNORED_ROOTS.contains(&first) {
            candidates.push(parts[1].to_string());
            continue;
        }

        candidates.push(first.to_string());
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for candidate in &candidates {
        let cleaned: String = candidate
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect::<String>()
            .to_lowercase();
        if cleaned.is_empty() {
            continue;
        }
        *counts.entry(cleaned).or_insert(0) += 1;
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let Some((best, best_count)) = sorted.first() else {
        return String::new();
    };
    if let Some((_, second_count)) = sorted.get(1)
        && second_count == best_count
    {
        return String::new();
    }

    if let Some(allowed) = allowed_scopes
        && !allowed.is_empty()
    {
        // Map back to the originally-cased allowed entry; first match wins
        // on duplicate case-insensitive entries.
        return allowed
            .iter()
            .find(|s| s.to_lowercase() == *best)
            .cloned()
            .unwrap_or_default();
    }

    best.clone()
}
