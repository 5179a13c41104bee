// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use serde::Deserialize;

const FRAME_SEPARATOR: &[u8] = b"\n\n";
const DATA_PREFIX: &str = "data:";
const DONE_SENTINEL: &str = "[DONE]";

/// One streamed completion chunk. The three content locations cover the
/// OpenAI-compatible dialects seen in the wild: streaming deltas, full
/// message objects, and legacy text completions.
#[derive(Deserialize)]
struct Frame {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    delta: Option<Content>,
    #[serde(default)]
    message: Option<Content>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    content: Option<String>,
}

/// Incremental server-sent-event decoder.
///
/// Bytes go in as they arrive from the transport; complete frames (separated
/// by a blank line) come out as text deltas. The separator is ASCII, so a
/// chunk boundary that splits a multi-byte character can never split a frame
/// boundary; the trailing partial frame simply waits for more bytes.
/// Malformed frames are skipped: one bad frame must not abort a good stream.
#[derive(Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
    acc: String,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed transport bytes; returns the deltas completed by this chunk, in
    /// stream order. After the `[DONE]` sentinel all further input is ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.done {
            return Vec::new();
        }

        self.buf.extend_from_slice(chunk);
        let mut deltas = Vec::new();

        while let Some(sep) = self
            .buf
            .windows(FRAME_SEPARATOR.len())
            .position(|w| w == FRAME_SEPARATOR)
        {
            let frame: Vec<u8> = self.buf.drain(..sep + FRAME_SEPARATOR.len()).collect();
            let frame = String::from_utf8_lossy(&frame[..sep]);

            if self.decode_frame(&frame, &mut deltas) {
                self.done = true;
                break;
            }
        }

        deltas
    }

    /// True once the `[DONE]` sentinel has been observed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Everything accumulated so far.
    pub fn text(&self) -> &str {
        &self.acc
    }

    pub fn into_text(self) -> String {
        self.acc
    }

    /// Returns true when the frame carried the end-of-stream sentinel.
    fn decode_frame(&mut self, frame: &str, deltas: &mut Vec<String>) -> bool {
        for line in frame.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)) {
            let line = line.trim();
            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                continue;
            };

            let payload = payload.trim();
            if payload.is_empty() {
                continue;
            }
            if payload == DONE_SENTINEL {
                return true;
            }

            let Ok(parsed) = serde_json::from_str::<Frame>(payload) else {
                continue;
            };

            let delta = parsed.choices.first().and_then(|choice| {
                choice
                    .delta
                    .as_ref()
                    .and_then(|d| d.content.clone())
                    .or_else(|| choice.message.as_ref().and_then(|m| m.content.clone()))
                    .or_else(|| choice.text.clone())
            });

            if let Some(delta) = delta
                && !delta.is_empty()
            {
                self.acc.push_str(&delta);
                deltas.push(delta);
            }
        }

        false
    }
}
