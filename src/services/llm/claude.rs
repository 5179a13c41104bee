// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use super::{LlmProvider, transport_error};
use crate::config::Config;
use crate::error::{Error, Result, redacted_host};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
const API_VERSION: &str = "2023-06-01";

pub struct ClaudeProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

/// The Anthropic stream is event-typed rather than `[DONE]`-terminated:
/// deltas arrive as `content_block_delta`, the end as `message_stop`.
#[derive(Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    event_type: String,
    delta: Option<ContentDelta>,
}

#[derive(Deserialize)]
struct ContentDelta {
    text: Option<String>,
}

impl ClaudeProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            Error::Config(
                "Claude API key is not configured. Set api_key, ANTHROPIC_API_KEY, or run `gitmsg set-key claude`".into(),
            )
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn generate(
        &self,
        prompt: &str,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String> {
        let url = format!("{}/v1/messages", self.base_url);

        let request = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&MessagesRequest {
                model: self.model.clone(),
                messages: vec![Message {
                    role: "user".into(),
                    content: prompt.to_string(),
                }],
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                stream: true,
            });

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            resp = request.send() => resp.map_err(transport_error)?,
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status, &body));
        }

        let mut stream = response.bytes_stream();
        let mut full_response = String::new();
        let mut line_buffer = String::new();

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(Error::Cancelled);
                }
                chunk = stream.next() => {
                    let Some(chunk) = chunk else { break };
                    let chunk = chunk.map_err(|e| Error::Transport(e.to_string()))?;

                    line_buffer.push_str(&String::from_utf8_lossy(&chunk));

                    while let Some(newline_pos) = line_buffer.find('\n') {
                        let line = line_buffer[..newline_pos].to_string();
                        line_buffer = line_buffer[newline_pos + 1..].to_string();

                        let line = line.trim();
                        // SSE format: "event: <type>" followed by "data: <json>"
                        let Some(data) = line.strip_prefix("data: ") else {
                            continue;
                        };

                        let Ok(event) = serde_json::from_str::<StreamEvent>(data) else {
                            continue;
                        };

                        match event.event_type.as_str() {
                            "content_block_delta" => {
                                if let Some(text) = event.delta.and_then(|d| d.text)
                                    && !text.is_empty()
                                {
                                    let _ = token_tx.send(text.clone()).await;
                                    full_response.push_str(&text);
                                }
                            }
                            "message_stop" => {
                                return Ok(full_response);
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        Ok(full_response)
    }

    async fn verify(&self) -> Result<()> {
        // No lightweight verification endpoint exists; the constructor has
        // already confirmed a key is present.
        Ok(())
    }

    fn name(&self) -> &'static str {
        "claude"
    }

    fn host(&self) -> String {
        redacted_host(&self.base_url)
    }
}
