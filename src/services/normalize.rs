// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::OutputStyle;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());

static LEADING_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:commit message|message)\s*:\s*").unwrap());

static WRAPPING_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^["'`]+|["'`]+$"#).unwrap());

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Clean a raw model response into a canonical commit message.
///
/// Models wrap answers in fences, prefix labels, or quote the whole thing;
/// all of that is presentation, not message. Header-only mode reduces the
/// result to the first non-blank line and is a fixed point: extracting the
/// header can expose another label or quote layer, so the pass repeats until
/// nothing changes (each changing pass strictly shrinks the text, so this
/// terminates).
pub fn normalize(raw: &str, style: OutputStyle) -> String {
    let mut text = normalize_once(raw, style);

    if style.header_only() {
        loop {
            let again = normalize_once(&text, style);
            if again == text {
                break;
            }
            text = again;
        }
    }

    text
}

fn normalize_once(raw: &str, style: OutputStyle) -> String {
    // Fenced blocks keep their inner lines when the fence is well-formed
    // (first and last line both open with the marker); anything else is
    // dropped wholesale.
    let mut text = CODE_FENCE
        .replace_all(raw, |caps: &regex::Captures| {
            let block = &caps[0];
            let lines: Vec<&str> = block
                .split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l))
                .collect();
            if lines.len() >= 2
                && lines[0].starts_with("```")
                && lines[lines.len() - 1].starts_with("```")
            {
                lines[1..lines.len() - 1].join("\n")
            } else {
                String::new()
            }
        })
        .into_owned();

    // Stacked labels ("Message: commit message: …") peel in one pass
    loop {
        let stripped = LEADING_LABEL.replace(&text, "").into_owned();
        if stripped == text {
            break;
        }
        text = stripped;
    }

    text = text.replace("\r\n", "\n").trim().to_string();
    text = WRAPPING_QUOTES.replace_all(&text, "").trim().to_string();

    if style.header_only() {
        return text
            .split('\n')
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string();
    }

    BLANK_RUNS.replace_all(&text, "\n\n").trim().to_string()
}
