// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use std::io::Write;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Maximum latency before buffered tokens become visible.
pub const FLUSH_DEBOUNCE: Duration = Duration::from_millis(60);

#[derive(Debug, Default)]
pub struct SinkResult {
    /// Accumulated text; in header-only mode, cut at the first newline.
    pub text: String,
    /// The request was aborted because the header was already complete.
    /// A disguised success, not a cancellation failure.
    pub early_stopped: bool,
}

/// Consumes the provider's token channel.
///
/// Tokens are appended to the accumulator immediately but echoed through a
/// debounce: the display flushes when no new token arrives within the
/// debounce window, and unconditionally once the channel closes, so every
/// exit path ends with a final flush. In header-only mode the first newline
/// observed inside a delta completes the message and cancels the in-flight
/// request via the supplied child token.
pub struct TokenSink {
    header_only: bool,
    echo: bool,
    debounce: Duration,
}

impl TokenSink {
    pub fn new(header_only: bool, echo: bool) -> Self {
        Self {
            header_only,
            echo,
            debounce: FLUSH_DEBOUNCE,
        }
    }

    /// Override the debounce window (tests shrink it).
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub async fn drain(
        self,
        mut rx: mpsc::Receiver<String>,
        request_cancel: CancellationToken,
    ) -> SinkResult {
        let mut text = String::new();
        let mut pending = String::new();
        let mut early_stopped = false;

        loop {
            tokio::select! {
                token = rx.recv() => {
                    let Some(token) = token else { break };

                    // Late tokens can still arrive between the early-stop
                    // cancel and the provider noticing it.
                    if early_stopped {
                        continue;
                    }

                    let take = if self.header_only
                        && let Some(pos) = token.find('\n')
                    {
                        early_stopped = true;
                        debug!("header complete, stopping stream early");
                        request_cancel.cancel();
                        &token[..pos]
                    } else {
                        token.as_str()
                    };

                    text.push_str(take);
                    pending.push_str(take);
                }
                _ = tokio::time::sleep(self.debounce), if !pending.is_empty() => {
                    self.flush(&mut pending);
                }
            }
        }

        self.flush(&mut pending);
        SinkResult {
            text,
            early_stopped,
        }
    }

    fn flush(&self, pending: &mut String) {
        if pending.is_empty() {
            return;
        }
        if self.echo {
            eprint!("{pending}");
            let _ = std::io::stderr().flush();
        }
        pending.clear();
    }
}
