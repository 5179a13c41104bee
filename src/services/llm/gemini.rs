// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

//! Gemini answers with a single JSON document rather than a stream. The full
//! text is forwarded as one token so the sink, debounce, and early-stop
//! policies behave uniformly across variants.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{LlmProvider, transport_error};
use crate::config::Config;
use crate::error::{Error, Result, redacted_host};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<ContentPart>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct ContentPart {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            Error::Config(
                "Gemini API key is not configured. Set api_key, GEMINI_API_KEY, or run `gitmsg set-key gemini`".into(),
            )
        })?;

        let model = config.model.clone().ok_or_else(|| {
            Error::Config("Model is not configured. Set model for the gemini provider".into())
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
            model,
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(
        &self,
        prompt: &str,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String> {
        // Key travels as a query parameter on this API; host() never
        // includes it.
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            self.api_key.expose_secret()
        );

        let request = self.client.post(&url).json(&GenerateRequest {
            contents: vec![ContentPart {
                parts: vec![TextPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
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

        let parsed: GenerateResponse = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            body = response.json() => body.map_err(|e| Error::Transport(e.to_string()))?,
        };

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.clone())
            .unwrap_or_default();

        if !text.is_empty() {
            let _ = token_tx.send(text.clone()).await;
        }

        Ok(text)
    }

    async fn verify(&self) -> Result<()> {
        // Constructor validation (key + model) is the whole check.
        Ok(())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn host(&self) -> String {
        redacted_host(&self.base_url)
    }
}
