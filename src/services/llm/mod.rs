// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

pub mod claude;
pub mod custom;
pub mod gemini;
pub mod openai;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::stream::SseDecoder;

/// Closed set of generation backends. Each variant owns its default
/// endpoint/model and its request/response mapping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Claude,
    Gemini,
    Custom,
}

impl ProviderKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "claude" | "anthropic" => Some(Self::Claude),
            "gemini" => Some(Self::Gemini),
            "custom" | "ollama" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Claude => write!(f, "claude"),
            Self::Gemini => write!(f, "gemini"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate with streaming tokens and cancellation support. Returns the
    /// full raw response; tokens are additionally delivered through
    /// `token_tx` in stream order.
    async fn generate(
        &self,
        prompt: &str,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String>;

    /// Cheap configuration/reachability check before the first request.
    async fn verify(&self) -> Result<()>;

    fn name(&self) -> &'static str;

    /// Scheme+host of the endpoint, safe for log lines.
    fn host(&self) -> String;
}

/// Construct the configured provider. Each constructor validates its own
/// required settings and fails with a configuration error before any
/// network traffic.
pub fn create_provider(config: &Config) -> Result<Box<dyn LlmProvider>> {
    match config.provider {
        ProviderKind::OpenAi => Ok(Box::new(openai::OpenAiProvider::new(config)?)),
        ProviderKind::Claude => Ok(Box::new(claude::ClaudeProvider::new(config)?)),
        ProviderKind::Gemini => Ok(Box::new(gemini::GeminiProvider::new(config)?)),
        ProviderKind::Custom => Ok(Box::new(custom::CustomProvider::new(config)?)),
    }
}

/// Drive an OpenAI-style SSE response body to completion: decode frames,
/// forward deltas, observe cancellation between reads. Shared by the
/// variants that speak the chat-completions dialect.
pub(crate) async fn drain_sse_response(
    response: reqwest::Response,
    token_tx: &mpsc::Sender<String>,
    cancel: &CancellationToken,
) -> Result<String> {
    let mut stream = response.bytes_stream();
    let mut decoder = SseDecoder::new();

    loop {
        tokio::select! {
            // Check the signal first so an already-set cancellation is
            // observed before the next read.
            biased;
            _ = cancel.cancelled() => {
                return Err(Error::Cancelled);
            }
            chunk = stream.next() => {
                let Some(chunk) = chunk else { break };
                let chunk = chunk.map_err(|e| Error::Transport(e.to_string()))?;

                for delta in decoder.feed(&chunk) {
                    let _ = token_tx.send(delta).await;
                }
                if decoder.is_done() {
                    break;
                }
            }
        }
    }

    Ok(decoder.into_text())
}

/// Map a reqwest send/connect failure onto the transport taxonomy.
pub(crate) fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Transport("request timed out".into())
    } else {
        Error::Transport(e.to_string())
    }
}
