// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

//! Any OpenAI-compatible server: Ollama, LocalAI, vLLM, proxies. No default
//! endpoint or model exists for this variant, and the API key is optional
//! because local servers usually run unauthenticated.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{LlmProvider, drain_sse_response, transport_error};
use crate::config::Config;
use crate::error::{Error, Result, redacted_host};

pub struct CustomProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest {
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

impl CustomProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url.clone().ok_or_else(|| {
            Error::Config("Base URL is not configured. Set base_url for the custom provider".into())
        })?;

        let model = config.model.clone().ok_or_else(|| {
            Error::Config("Model is not configured. Set model for the custom provider".into())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for CustomProvider {
    async fn generate(
        &self,
        prompt: &str,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut request = self.client.post(&url).json(&ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".into(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: true,
        });

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key.expose_secret()));
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            resp = request.send() => resp.map_err(transport_error)?,
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status, &body));
        }

        drain_sse_response(response, &token_tx, &cancel).await
    }

    async fn verify(&self) -> Result<()> {
        // Shape-only: compatible servers disagree on which side endpoints
        // exist, so constructor validation is the whole check.
        Ok(())
    }

    fn name(&self) -> &'static str {
        "custom"
    }

    fn host(&self) -> String {
        redacted_host(&self.base_url)
    }
}
