// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use once_cell::sync::Lazy;
use regex::Regex;

/// Per-file header lines kept verbatim (everything before the first `@@`).
const MAX_HEADER_LINES: usize = 12;
/// Changed (`+`/`-`) lines kept verbatim per hunk.
const MAX_HUNK_CHANGES: usize = 6;

const TRIMMED_MARKER: &str = "\n\n... (diff trimmed)";
const TRUNCATED_MARKER: &str = "\n\n... (diff truncated)";

static FILE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^diff --git .*$").unwrap());

// Declaration-shaped lines carry structural signal cheaply, so they are kept
// past the per-hunk cap. Covers Rust plus the JS/TS, Python, Go and
// class-language forms a polyglot repo's diff will contain.
static SIGNATURE_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)^(?:[+\-\ ]\s*)?(?:
            (?:pub(?:\(crate\))?\s+)?(?:async\s+)?(?:fn|struct|enum|trait|impl)\b
            |(?:export\s+)?(?:default\s+)?(?:async\s+)?(?:function|class|interface|type|enum)\b
            |(?:def|class)\s+\w+
            |func\s+\w+
            |(?:public|private|protected)\b
        )",
    )
    .unwrap()
});

static COMMENT_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[+\- ]\s*)?(?://|#|/\*|\*|\s*\*/)").unwrap());

static IMPORT_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[+\- ]\s*)?(?:import\s|from\s+\S+\s+import\s|use\s+\w)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimmedDiff {
    pub text: String,
    pub trimmed: bool,
}

/// Bound a unified diff to `max_chars` characters while keeping signal.
///
/// Budget is distributed across per-file blocks in original order instead of
/// naive prefix truncation, which would bias toward the first file only.
/// Retained lines are byte-exact and never reordered. The returned text,
/// marker included, never exceeds `max_chars`.
pub fn trim_diff(diff: &str, max_chars: usize) -> TrimmedDiff {
    if char_len(diff) <= max_chars {
        return TrimmedDiff {
            text: diff.to_string(),
            trimmed: false,
        };
    }

    let blocks = split_by_file(diff);
    if blocks.len() <= 1 {
        let keep = max_chars.saturating_sub(char_len(TRUNCATED_MARKER));
        let mut text = take_chars(diff, keep).to_string();
        text.push_str(TRUNCATED_MARKER);
        return TrimmedDiff {
            text: cap_chars(text, max_chars),
            trimmed: true,
        };
    }

    let budget = (max_chars.saturating_sub(40)).max(200);
    let mut out = String::new();

    for block in &blocks {
        let used = char_len(&out);
        if used >= budget {
            break;
        }
        let summarized = summarize_block(block, budget - used);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&summarized);
    }

    // This branch only runs when the input exceeded max_chars, so the capped
    // output is always shorter than the input.
    let keep = max_chars.saturating_sub(char_len(TRIMMED_MARKER));
    let mut text = cap_chars(out, keep);
    text.push_str(TRIMMED_MARKER);
    TrimmedDiff {
        text: cap_chars(text, max_chars),
        trimmed: true,
    }
}

/// One block per `diff --git` header, in original order. Text before the
/// first header (if any) is not a file block and is dropped.
fn split_by_file(diff: &str) -> Vec<&str> {
    let starts: Vec<usize> = FILE_HEADER.find_iter(diff).map(|m| m.start()).collect();
    if starts.is_empty() {
        return vec![diff];
    }

    let mut blocks = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(diff.len());
        blocks.push(diff[start..end].trim_end());
    }
    blocks
}

/// Compress one file block into `remaining` characters: header lines, the
/// first few changed lines of each hunk, and any structurally interesting
/// line past that cap.
fn summarize_block(block: &str, remaining: usize) -> String {
    if char_len(block) <= remaining {
        return block.to_string();
    }

    let mut header: Vec<&str> = Vec::new();
    let mut important: Vec<&str> = Vec::new();

    let mut in_hunk = false;
    let mut hunk_changes = 0usize;

    for line in block.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)) {
        if !in_hunk && header.len() < MAX_HEADER_LINES && !line.starts_with("@@") {
            header.push(line);
            continue;
        }

        if line.starts_with("@@") {
            in_hunk = true;
            hunk_changes = 0;
            important.push(line);
            continue;
        }

        if !in_hunk {
            continue;
        }

        let is_change = line.starts_with('+') || line.starts_with('-');
        if is_change {
            hunk_changes += 1;
        }

        if is_change && hunk_changes <= MAX_HUNK_CHANGES {
            important.push(line);
            continue;
        }

        if SIGNATURE_LIKE.is_match(line) || COMMENT_LIKE.is_match(line) || IMPORT_LIKE.is_match(line)
        {
            important.push(line);
        }
    }

    let mut combined = header;
    combined.extend(important);
    cap_chars(combined.join("\n"), remaining)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Prefix of `s` holding at most `n` characters.
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn cap_chars(s: String, n: usize) -> String {
    if char_len(&s) <= n {
        s
    } else {
        take_chars(&s, n).to_string()
    }
}
