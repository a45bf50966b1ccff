// ABOUTME: Ollama text generator calling the local /api/generate endpoint
// ABOUTME: Non-streaming request with the coach persona as system prompt and a bounded timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ollama Generator
//!
//! Talks to a local Ollama server (default `http://localhost:11434`, model
//! `gemma:latest`) through its native generate API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use runbuddy_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::{CoachPrompt, CoachTextGenerator};
use crate::config::{CoachConfig, LlmConfig};

/// Service name used in error messages
const SERVICE_NAME: &str = "Ollama";

/// Connection timeout for the local server
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

/// Coaching text generator backed by Ollama
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    client: Client,
    config: LlmConfig,
}

impl OllamaGenerator {
    /// Create a generator with the given settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: LlmConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a generator from `RUNBUDDY_LLM_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn from_env() -> AppResult<Self> {
        let config = CoachConfig::from_env()?.llm;
        info!(
            "Initializing Ollama generator: base_url={}, model={}",
            config.base_url, config.model
        );
        Self::new(config)
    }

    /// Settings in use
    #[must_use]
    pub const fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        if let Ok(error_response) = serde_json::from_str::<OllamaErrorResponse>(body) {
            return match status.as_u16() {
                404 => AppError::external_service(
                    SERVICE_NAME,
                    format!(
                        "Model not found (pull it with `ollama pull`): {}",
                        error_response.error
                    ),
                ),
                _ => AppError::external_service(
                    SERVICE_NAME,
                    format!("API error ({status}): {}", error_response.error),
                ),
            };
        }
        AppError::external_service(
            SERVICE_NAME,
            format!(
                "API error ({status}): {}",
                body.chars().take(200).collect::<String>()
            ),
        )
    }
}

#[async_trait]
impl CoachTextGenerator for OllamaGenerator {
    fn name(&self) -> &'static str {
        "ollama"
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model, event = %prompt.event))]
    async fn generate(&self, prompt: &CoachPrompt) -> AppResult<String> {
        let request = GenerateRequest {
            model: &self.config.model,
            system: &prompt.system,
            prompt: &prompt.prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.api_url("generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Ollama: {}", e);
                if e.is_timeout() {
                    AppError::external_timeout(SERVICE_NAME, self.config.timeout_secs)
                } else if e.is_connect() {
                    AppError::external_service(
                        SERVICE_NAME,
                        format!(
                            "Cannot connect to Ollama. Is the server running at {}?",
                            self.config.base_url
                        ),
                    )
                } else {
                    AppError::external_service(SERVICE_NAME, format!("Failed to connect: {e}"))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Ollama response: {}", e);
            AppError::external_service(SERVICE_NAME, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let generated: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Ollama response: {}", e);
            AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
        })?;

        let text = generated.response.trim().to_owned();
        if text.is_empty() {
            return Err(AppError::external_service(
                SERVICE_NAME,
                "Model returned an empty response",
            ));
        }

        debug!(
            "Received response from Ollama: {} chars, done: {}",
            text.len(),
            generated.done
        );
        Ok(text)
    }
}
